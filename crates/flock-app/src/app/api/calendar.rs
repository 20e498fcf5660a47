use chrono::NaiveDate;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;

use flock_service::calendar::MonthView;

use super::CALENDAR_ROUTE_COMPONENT;
use super::response::{date_param, render_error};
use crate::error::AppResult;
use crate::state::calendar_service;

/// Month view plus the grid rows a client needs to lay it out.
#[derive(Debug, Serialize)]
struct CalendarResponse {
    #[serde(flatten)]
    view: MonthView,
    weeks: Vec<Vec<NaiveDate>>,
}

fn month(req: &Request, depot: &Depot) -> AppResult<CalendarResponse> {
    let date = date_param(req, "date")?;
    let view = calendar_service(depot)?.month(date)?;
    let weeks = view.weeks();
    Ok(CalendarResponse { view, weeks })
}

/// ## Summary
/// GET /api/calendar?date=YYYY-MM-DD - occurrences for the month grid that
/// contains `date` (today when omitted).
///
/// ## Errors
/// Returns HTTP 400 if `date` cannot be parsed.
#[handler]
async fn show_month(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match month(req, depot) {
        Ok(body) => res.render(Json(body)),
        Err(err) => render_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDAR_ROUTE_COMPONENT).get(show_month)
}
