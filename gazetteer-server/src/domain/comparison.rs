//! Result of comparing two named places.

use serde::{Deserialize, Serialize};

use super::PlaceRecord;

/// Two resolved places plus the facts derived from them.
///
/// `north_city` and `timezone_diff_hours` are only present when both
/// places resolved. A one-sided result is a success, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    #[serde(alias = "first_city")]
    pub first_city: Option<PlaceRecord>,

    #[serde(alias = "second_city")]
    pub second_city: Option<PlaceRecord>,

    /// Name of the place with the larger latitude.
    #[serde(alias = "north_city")]
    pub north_city: Option<String>,

    /// Whole hours between the two places' current civil offsets.
    #[serde(alias = "timezone_diff_hours", alias = "timezone")]
    pub timezone_diff_hours: Option<u32>,
}

impl ComparisonResult {
    /// Result for a comparison where at most one side resolved.
    pub fn partial(first_city: Option<PlaceRecord>, second_city: Option<PlaceRecord>) -> Self {
        Self {
            first_city,
            second_city,
            north_city: None,
            timezone_diff_hours: None,
        }
    }

    /// True when both places resolved.
    pub fn is_complete(&self) -> bool {
        self.first_city.is_some() && self.second_city.is_some()
    }
}
