//! Store error types.

use std::path::PathBuf;

use crate::domain::ParseError;

/// Errors that can occur while loading or querying the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file contains a malformed row
    #[error("malformed source data: {0}")]
    Parse(#[from] ParseError),

    /// Background import task panicked or was cancelled
    #[error("import task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
