//! Read-only storage for gazetteer records.
//!
//! The query layer only sees the [`Store`] trait. Two implementations are
//! provided:
//! - [`SqliteStore`] keeps the dataset in an embedded SQLite database and is
//!   what the server runs on
//! - [`MemoryStore`] holds records in a sorted `Vec`, for tests and tooling
//!
//! Every multi-row read returns records in ascending id order.

mod error;
mod memory;
mod sqlite;
mod tsv;

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{GeoNameId, PlaceRecord};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use tsv::{parse_source, read_source};

/// What a call to [`Store::load_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The source file was imported.
    Loaded { rows: usize },
    /// The store was already populated; nothing was read.
    Skipped,
}

/// Query capability over the gazetteer.
#[async_trait]
pub trait Store: Send + Sync {
    /// Import `source` unless the store already holds the dataset.
    ///
    /// Runs once at bootstrap, before any query is served.
    async fn load_if_empty(&self, source: &Path) -> Result<LoadOutcome, StoreError>;

    /// Look up a record by id.
    async fn by_id(&self, id: GeoNameId) -> Result<Option<PlaceRecord>, StoreError>;

    /// All records whose name equals `name` exactly (case-sensitive).
    async fn by_name(&self, name: &str) -> Result<Vec<PlaceRecord>, StoreError>;

    /// Names of all records whose name starts with `prefix` (case-sensitive).
    async fn by_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Up to `limit` records starting at zero-based `offset`.
    async fn page(&self, offset: i64, limit: i64) -> Result<Vec<PlaceRecord>, StoreError>;

    /// Total number of records.
    async fn count(&self) -> Result<i64, StoreError>;
}
