//! Data transfer objects for web requests and responses.
//!
//! Response bodies for places, pages and comparisons are the domain types
//! themselves; this module only holds what is specific to the HTTP layer.

use serde::{Deserialize, Serialize};

/// Query string of `GET /items`.
#[derive(Debug, Deserialize)]
pub struct ItemsRequest {
    /// 1-based page; 0 and negatives mean the first page
    #[serde(default)]
    pub page: i64,

    /// Rows per page
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// Query string of `GET /cities`.
#[derive(Debug, Deserialize)]
pub struct CitiesRequest {
    /// Name of the first place (Latin or Cyrillic)
    pub first_city: String,

    /// Name of the second place (Latin or Cyrillic)
    pub second_city: String,
}

/// Query string of `GET /help`.
#[derive(Debug, Deserialize)]
pub struct HelpRequest {
    /// Beginning of a place name
    pub city: String,
}

/// Response of `GET /help`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HelpResponse {
    /// Matching names, one per record
    pub cities: Vec<String>,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
