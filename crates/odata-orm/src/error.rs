//! Error types for query execution.

use thiserror::Error;

/// Errors surfaced by the query builder's execution methods.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for builder operations.
pub type Result<T> = std::result::Result<T, OrmError>;
