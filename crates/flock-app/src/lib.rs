//! HTTP surface of the flock congregation server.

pub mod app;
pub mod error;
pub mod state;
