//! Single-record lookup and paged listing.

use url::Url;

use crate::domain::{GeoNameId, PageResult, PlaceRecord};
use crate::store::Store;

use super::error::QueryError;
use super::paginate::paginate;

/// Message returned when a page has no rows.
const NO_PLACES: &str = "No places found.";

/// Fetch one record by id.
pub async fn get_by_id(store: &dyn Store, id: GeoNameId) -> Result<PlaceRecord, QueryError> {
    store
        .by_id(id)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("GeoNameId {id} not found.")))
}

/// Fetch one page of the listing, with markers built from `url`.
///
/// A page without rows (past the end, or an empty table) is NotFound.
pub async fn list_page(
    store: &dyn Store,
    page: i64,
    limit: i64,
    url: &Url,
) -> Result<PageResult, QueryError> {
    let total = store.count().await?;
    let window = paginate(page, limit, total, url);
    let result = store.page(window.offset, window.limit).await?;
    if result.is_empty() {
        return Err(QueryError::NotFound(NO_PLACES.to_string()));
    }

    Ok(PageResult {
        next: window.next,
        previous: window.previous,
        result,
    })
}
