use salvo::http::StatusCode;
use thiserror::Error;

use flock_calendar::CalendarError;
use flock_core::error::CoreError;
use flock_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CalendarError(#[from] CalendarError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error to the status code a client should see.
    ///
    /// Validation failures are 422, missing records 404, unparseable input
    /// 400 and everything else 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(ServiceError::ValidationError(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::ParseError(_) | ServiceError::CalendarError(_))
            | Self::CalendarError(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message rendered in the `error` field of a response body.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::ServiceError(ServiceError::ValidationError(message)) => message.clone(),
            _ if self.status_code().is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
