//! flock congregation server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! one `flock_test::` root.

pub mod component {
    pub use flock_calendar as calendar;
    pub use flock_core::{clock, config, constants, error};
    pub use flock_service as service;
}

// Re-export top-level modules for convenience
pub mod app {
    pub use flock_app::*;

    pub mod api {
        pub use flock_app::app::api::*;
    }
}
