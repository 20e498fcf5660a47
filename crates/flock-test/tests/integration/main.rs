//! HTTP integration tests for the flock server.

mod events;
mod members;
