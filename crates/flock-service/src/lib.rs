//! Event, member and calendar services for flock.
//!
//! The persistence seam is the pair of traits in [`repository`]; the
//! in-memory [`store::InMemoryStore`] backs both the server and the tests.

pub mod calendar;
pub mod error;
pub mod event;
pub mod members;
pub mod model;
pub mod repository;
pub mod store;
