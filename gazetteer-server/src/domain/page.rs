//! One page of the canonical listing.

use serde::{Deserialize, Serialize};

use super::PlaceRecord;

/// Records of one page plus the URLs of its neighbours.
///
/// Markers are absolute request URLs with `page` and `limit` replaced.
/// A missing neighbour is `None`, serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub result: Vec<PlaceRecord>,
}
