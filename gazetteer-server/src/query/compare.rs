//! Comparison of two named places.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::domain::{ComparisonResult, PlaceRecord};
use crate::store::Store;
use crate::translit::{has_cyrillic, transliterate};

use super::error::QueryError;

const SECONDS_PER_HOUR: u32 = 60 * 60;

/// Message returned when neither name resolves.
const NOT_FOUND: &str = "No cities found.";

/// Resolves two place names and compares them.
pub struct PlaceComparator<'a> {
    store: &'a dyn Store,
}

impl<'a> PlaceComparator<'a> {
    /// Create a comparator reading from `store`.
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Compare two places as of now.
    pub async fn compare(&self, first: &str, second: &str) -> Result<ComparisonResult, QueryError> {
        self.compare_at(first, second, Utc::now()).await
    }

    /// Compare two places, evaluating time zones at `now`.
    ///
    /// - neither name resolves: [`QueryError::NotFound`]
    /// - one resolves: that side is populated, everything else is `None`
    /// - both resolve: `north_city` and `timezone_diff_hours` are filled in
    pub async fn compare_at(
        &self,
        first: &str,
        second: &str,
        now: DateTime<Utc>,
    ) -> Result<ComparisonResult, QueryError> {
        let (first, second) = tokio::join!(self.resolve(first), self.resolve(second));

        match (first?, second?) {
            (None, None) => Err(QueryError::NotFound(NOT_FOUND.to_string())),
            (Some(first), Some(second)) => {
                let north_city = north_of(&first, &second).name.clone();
                let diff = timezone_diff_hours(&first.timezone, &second.timezone, now)?;
                Ok(ComparisonResult {
                    first_city: Some(first),
                    second_city: Some(second),
                    north_city: Some(north_city),
                    timezone_diff_hours: Some(diff),
                })
            }
            (first, second) => Ok(ComparisonResult::partial(first, second)),
        }
    }

    /// Transliterate `name` and pick the most populous exact match.
    async fn resolve(&self, name: &str) -> Result<Option<PlaceRecord>, QueryError> {
        let key = transliterate(name);
        if has_cyrillic(name) {
            debug!(input = name, key = %key, "transliterated place name");
        }
        let candidates = self.store.by_name(&key).await?;
        Ok(most_populous(candidates))
    }
}

/// The record with the largest population.
///
/// On a tie the earliest record wins, so callers get the store's first
/// match.
pub fn most_populous(candidates: impl IntoIterator<Item = PlaceRecord>) -> Option<PlaceRecord> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(best) if candidate.population <= best.population => Some(best),
        _ => Some(candidate),
    })
}

/// The first place if it lies strictly further north, else the second.
fn north_of<'p>(first: &'p PlaceRecord, second: &'p PlaceRecord) -> &'p PlaceRecord {
    if first.latitude > second.latitude {
        first
    } else {
        second
    }
}

/// Whole hours between the civil offsets of two zones at `now`.
///
/// Offsets include any daylight-saving rule in force at that instant. The
/// result truncates toward zero, so a 5h30 difference gives 5.
pub fn timezone_diff_hours(
    first_zone: &str,
    second_zone: &str,
    now: DateTime<Utc>,
) -> Result<u32, QueryError> {
    let first = civil_offset_secs(first_zone, now)?;
    let second = civil_offset_secs(second_zone, now)?;
    Ok((first - second).unsigned_abs() / SECONDS_PER_HOUR)
}

fn civil_offset_secs(zone: &str, now: DateTime<Utc>) -> Result<i32, QueryError> {
    let tz: Tz = zone
        .parse()
        .map_err(|_| QueryError::DataIntegrity(format!("unknown time zone {zone:?}")))?;
    Ok(tz
        .offset_from_utc_datetime(&now.naive_utc())
        .fix()
        .local_minus_utc())
}
