use thiserror::Error;

/// Search and similarity errors.
#[derive(Error, Debug)]
pub enum TextError {
    #[error(transparent)]
    Core(#[from] trove_core::error::CoreError),

    #[error("Failed to read search input: {0}")]
    Io(#[from] std::io::Error),
}

pub type TextResult<T> = std::result::Result<T, TextError>;
