//! In-memory store.
//!
//! Holds the whole dataset in a `Vec` sorted by id. Useful for tests and
//! for small datasets that do not warrant a database file.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{GeoNameId, PlaceRecord};

use super::error::StoreError;
use super::tsv::load_source;
use super::{LoadOutcome, Store};

/// Store backed by a sorted vector of records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<PlaceRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    ///
    /// Records are sorted by id; when an id repeats, the first one wins.
    pub fn with_records(records: impl IntoIterator<Item = PlaceRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(sorted(records.into_iter().collect()))),
        }
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn sorted(mut records: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    records.sort_by_key(|r| r.geo_name_id);
    records.dedup_by_key(|r| r.geo_name_id);
    records
}

#[async_trait]
impl Store for MemoryStore {
    async fn load_if_empty(&self, source: &Path) -> Result<LoadOutcome, StoreError> {
        let mut guard = self.records.write().await;
        if !guard.is_empty() {
            return Ok(LoadOutcome::Skipped);
        }

        let records = load_source(source).await?;
        let rows = records.len();
        *guard = sorted(records);

        Ok(LoadOutcome::Loaded { rows })
    }

    async fn by_id(&self, id: GeoNameId) -> Result<Option<PlaceRecord>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard
            .binary_search_by_key(&id, |r| r.geo_name_id)
            .ok()
            .map(|idx| guard[idx].clone()))
    }

    async fn by_name(&self, name: &str) -> Result<Vec<PlaceRecord>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.iter().filter(|r| r.name == name).cloned().collect())
    }

    async fn by_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard
            .iter()
            .filter(|r| r.name.starts_with(prefix))
            .map(|r| r.name.clone())
            .collect())
    }

    async fn page(&self, offset: i64, limit: i64) -> Result<Vec<PlaceRecord>, StoreError> {
        let guard = self.records.read().await;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(guard.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.len() as i64)
    }
}
