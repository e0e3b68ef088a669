//! Session store error types.

use thiserror::Error;

/// Errors that can occur during session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
