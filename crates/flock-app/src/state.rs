//! Shared state hoops and the per-request service constructors built on them.

use std::any::type_name;
use std::sync::Arc;

use salvo::async_trait;

use flock_core::clock::Clock;
use flock_core::config::Settings;
use flock_core::error::CoreError;
use flock_service::calendar::CalendarService;
use flock_service::event::EventService;
use flock_service::members::MemberService;
use flock_service::repository::{EventRepository, MemberRepository};
use flock_service::store::InMemoryStore;

use crate::error::AppResult;

/// ## Summary
/// Hoop that places a clone of a shared value into every request's depot.
///
/// The server installs one for the store, one for the clock and one for the
/// settings; handlers read them back with the `get_*_from_depot` functions.
pub struct Inject<T>(pub T);

#[async_trait]
impl<T: Clone + Send + Sync + 'static> salvo::Handler for Inject<T> {
    #[tracing::instrument(skip_all, fields(value = type_name::<T>()))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.0.clone());
    }
}

fn obtain<T: Clone + Send + Sync + 'static>(
    depot: &salvo::Depot,
    missing: &'static str,
) -> AppResult<T> {
    depot
        .obtain::<T>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation(missing).into())
}

/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<InMemoryStore>> {
    obtain(depot, "Store not found in depot")
}

/// ## Errors
/// Returns an error if the clock is not found in the depot.
pub fn get_clock_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn Clock>> {
    obtain(depot, "Clock not found in depot")
}

/// ## Errors
/// Returns an error if the configuration is not found in the depot.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    obtain(depot, "Configuration not found in depot")
}

/// ## Errors
/// Returns an error if the store, clock or configuration is missing.
pub fn calendar_service(depot: &salvo::Depot) -> AppResult<CalendarService> {
    let store = get_store_from_depot(depot)?;
    let clock = get_clock_from_depot(depot)?;
    let settings = get_config_from_depot(depot)?;
    Ok(CalendarService::from_config(store, clock, &settings.calendar))
}

/// ## Errors
/// Returns an error if the store, clock or configuration is missing.
pub fn event_service(depot: &salvo::Depot) -> AppResult<EventService> {
    let store = get_store_from_depot(depot)?;
    let events = Arc::clone(&store) as Arc<dyn EventRepository>;
    Ok(EventService::new(events, store, calendar_service(depot)?))
}

/// ## Errors
/// Returns an error if the store is missing.
pub fn member_service(depot: &salvo::Depot) -> AppResult<MemberService> {
    let store = get_store_from_depot(depot)?;
    let members = Arc::clone(&store) as Arc<dyn MemberRepository>;
    Ok(MemberService::new(members, store))
}
