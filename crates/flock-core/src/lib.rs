//! Shared building blocks for the flock workspace.
//!
//! Settings loading, the core error type, the injectable clock and the HTTP
//! route constants used by both the app and the integration tests.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
