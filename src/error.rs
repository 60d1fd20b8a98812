use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccessError {
    #[error("permission store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("permission query failed: {0}")]
    QueryError(String),

    #[error("Poisoned lock error: {0}")]
    PoisonedLockError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::ConfigError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AccessError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AccessError::PoisonedLockError(err.to_string())
    }
}
