use salvo::Response;
use salvo::writing::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Writes `err` as a JSON error with its mapped status.
pub fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status = %status, "Request rejected");
    }
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.client_message(),
    }));
}

/// Parses an optional date query parameter.
pub fn date_param(req: &salvo::Request, name: &str) -> AppResult<Option<chrono::NaiveDate>> {
    req.query::<String>(name)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| flock_calendar::parse_date(&raw))
        .transpose()
        .map_err(AppError::from)
}
