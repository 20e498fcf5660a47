//! Event CRUD and listing.

pub mod service;

pub use service::{EventDetails, EventIndex, EventService};
