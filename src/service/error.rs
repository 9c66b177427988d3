use thiserror::Error;

use crate::core::DbError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ReportError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
