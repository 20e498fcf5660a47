use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use flock_service::error::ServiceError;
use flock_service::event::{EventDetails, EventIndex};
use flock_service::model::{EventId, EventTemplate, NewEvent};

use super::EVENTS_ROUTE_COMPONENT;
use super::response::{date_param, render_error};
use crate::error::{AppError, AppResult};
use crate::state::event_service;

fn event_id(req: &Request) -> AppResult<EventId> {
    let raw = req.param::<String>("id").unwrap_or_default();
    raw.parse::<EventId>()
        .ok()
        .ok_or_else(|| ServiceError::NotFound(format!("event {raw}")).into())
}

async fn payload(req: &mut Request) -> AppResult<NewEvent> {
    req.parse_json::<NewEvent>()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid event body: {err}")))
}

fn list(req: &Request, depot: &Depot) -> AppResult<EventIndex> {
    let start = date_param(req, "start_time")?;
    let end = date_param(req, "end_time")?;
    Ok(event_service(depot)?.list(start, end)?)
}

async fn create(req: &mut Request, depot: &Depot) -> AppResult<EventTemplate> {
    let new_event = payload(req).await?;
    Ok(event_service(depot)?.create(&new_event)?)
}

fn show(req: &Request, depot: &Depot) -> AppResult<EventDetails> {
    let id = event_id(req)?;
    Ok(event_service(depot)?.show(id)?)
}

async fn update(req: &mut Request, depot: &Depot) -> AppResult<EventTemplate> {
    let id = event_id(req)?;
    let new_event = payload(req).await?;
    Ok(event_service(depot)?.update(id, &new_event)?)
}

fn delete(req: &Request, depot: &Depot) -> AppResult<EventTemplate> {
    let id = event_id(req)?;
    Ok(event_service(depot)?.delete(id)?)
}

/// ## Summary
/// GET /api/events - events starting inside the month grids spanned by
/// `start_time` and `end_time`, with their recurring occurrences.
///
/// ## Errors
/// Returns HTTP 400 if either date cannot be parsed.
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match list(req, depot) {
        Ok(index) => res.render(Json(index)),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// POST /api/events - creates an event.
///
/// ## Errors
/// Returns HTTP 422 with the validation sentence, or 400 for a malformed body.
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match create(req, depot).await {
        Ok(event) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(event));
        }
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn show_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match show(req, depot) {
        Ok(details) => res.render(Json(details)),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// PUT /api/events/{id} - replaces an event's fields.
///
/// ## Errors
/// Returns HTTP 404 for an unknown id and 422 for an invalid payload.
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match update(req, depot).await {
        Ok(event) => res.render(Json(event)),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match delete(req, depot) {
        Ok(event) => {
            tracing::debug!(event_id = %event.id, "Deleted via API");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => render_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(
            Router::with_path("{id}")
                .get(show_event)
                .put(update_event)
                .delete(delete_event),
        )
}
