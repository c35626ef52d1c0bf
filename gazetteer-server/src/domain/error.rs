//! Domain error types.
//!
//! These errors describe malformed source data. They are distinct from
//! storage and query errors.

use super::GeoNameId;

/// Errors raised while parsing gazetteer source rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Row does not have the declared number of tab-separated fields
    #[error("line {line}: expected {expected} tab-separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A typed field could not be parsed
    #[error("line {line}: invalid {field}: {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The same id appears on more than one row
    #[error("line {line}: duplicate GeoNameId {id}")]
    DuplicateId { line: usize, id: GeoNameId },
}
