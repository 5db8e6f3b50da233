use thiserror::Error;

/// Calendar and recurrence errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid ISO-8601 week date `{input}`: {reason}")]
    Format { input: String, reason: &'static str },

    #[error(transparent)]
    Core(#[from] trove_core::error::CoreError),
}

pub type DateResult<T> = std::result::Result<T, DateError>;
