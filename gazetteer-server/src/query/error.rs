//! Query error types.

use crate::store::StoreError;

/// Errors returned by the query layer.
///
/// A comparison where only one side resolved is not an error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Nothing matched a singular lookup; the message is client-facing
    #[error("{0}")]
    NotFound(String),

    /// Stored data could not be interpreted (e.g. unknown time zone)
    #[error("data integrity fault: {0}")]
    DataIntegrity(String),

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
