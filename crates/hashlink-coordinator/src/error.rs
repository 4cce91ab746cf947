use hashlink_core::{CacheError, ShortCode, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoordinatorError>;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("cache operation failed: {0}")]
    Cache(
        #[from]
        #[source]
        CacheError,
    ),
    #[error("storage operation failed: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
    /// Two distinct long URLs truncate to the same short code.
    #[error("short code {code} already maps to '{existing}', refusing to map '{requested}'")]
    Collision {
        code: ShortCode,
        existing: String,
        requested: String,
    },
    #[error("store task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for CoordinatorError {
    fn from(err: tokio::task::JoinError) -> Self {
        CoordinatorError::TaskFailed(err.to_string())
    }
}
