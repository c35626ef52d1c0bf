//! "Did you mean" search over place names.

use tracing::debug;

use crate::store::Store;
use crate::translit::transliterate;

use super::error::QueryError;

/// Lists place names that start with a typed prefix.
pub struct PrefixSearch<'a> {
    store: &'a dyn Store,
}

impl<'a> PrefixSearch<'a> {
    /// Create a search reading from `store`.
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Names starting with `prefix`, in store order.
    ///
    /// The prefix is transliterated like comparison input and matched
    /// case-sensitively. Namesakes each get their own entry. No match is an
    /// empty list, not an error.
    pub async fn search(&self, prefix: &str) -> Result<Vec<String>, QueryError> {
        let key = transliterate(prefix);
        let names = self.store.by_prefix(&key).await?;
        debug!(prefix = %key, matches = names.len(), "prefix search");
        Ok(names)
    }
}
