use thiserror::Error;

use crate::error::{ErrorCode, PipelineError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Pipeline(error) => error.error_code(),
        }
    }
}
