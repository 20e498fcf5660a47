use thiserror::Error;

/// Recurrence and calendar-window errors
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    CoreError(#[from] flock_core::error::CoreError),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
