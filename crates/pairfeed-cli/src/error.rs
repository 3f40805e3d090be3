use thiserror::Error;

use pairfeed_core::{CoreError, StreamError, StreamValidationError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    StreamValidation(#[from] StreamValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Core(CoreError::Validation(_)) => 2,
            Self::Core(CoreError::Serialization(_)) => 4,
            Self::Command(_) => 2,
            Self::StreamValidation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
            Self::Stream(StreamError::Io(_)) => 10,
            Self::Stream(_) => 6,
        }
    }
}
