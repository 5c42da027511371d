use thiserror::Error;

use crate::auth::AuthError;

/// Failure of a tracker operation. Every variant maps to exactly one client-facing class.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Deprecated(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl TrackerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }

    pub fn not_found(what: &str) -> Self {
        TrackerError::NotFound(format!("{} not found", what))
    }

    pub fn access_denied() -> Self {
        TrackerError::Forbidden("Access denied".to_string())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        TrackerError::Conflict(msg.into())
    }
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
