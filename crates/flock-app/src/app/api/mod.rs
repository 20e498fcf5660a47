mod calendar;
mod events;
mod healthcheck;
mod members;
mod response;

use salvo::Router;

pub use flock_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CALENDAR_ROUTE_COMPONENT, CALENDAR_ROUTE_PREFIX,
    EVENTS_ROUTE_COMPONENT, EVENTS_ROUTE_PREFIX, MEMBERS_ROUTE_COMPONENT, MEMBERS_ROUTE_PREFIX,
};
pub use response::ErrorResponse;

/// ## Summary
/// Constructs the API router with every resource handler.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(events::routes())
        .push(calendar::routes())
        .push(members::routes())
}
