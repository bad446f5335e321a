//! Storage error type.
//!
//! Store operations never retry. Any of these variants reaching the HTTP layer
//! is reported as a 500.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode tags: {0}")]
    Encode(#[from] serde_json::Error),
}
