//! Gazetteer identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid GeoNames id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid GeoNameId {input:?}: {reason}")]
pub struct InvalidGeoNameId {
    input: String,
    reason: &'static str,
}

/// Primary key of a gazetteer row.
///
/// Ids are unique across the dataset and ascending id order is the
/// canonical listing order.
///
/// # Examples
///
/// ```
/// use gazetteer_server::domain::GeoNameId;
///
/// let id = GeoNameId::parse("524901").unwrap();
/// assert_eq!(id.get(), 524901);
/// assert_eq!(id.to_string(), "524901");
///
/// assert!(GeoNameId::parse("moscow").is_err());
/// assert!(GeoNameId::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoNameId(i64);

impl GeoNameId {
    /// Wrap a raw id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Parse an id from decimal text, with an optional leading sign.
    pub fn parse(s: &str) -> Result<Self, InvalidGeoNameId> {
        let invalid = |reason| InvalidGeoNameId {
            input: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("must not be empty"));
        }

        let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a decimal integer"));
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|_| invalid("out of range"))
    }

    /// Returns the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for GeoNameId {
    type Err = InvalidGeoNameId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for GeoNameId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for GeoNameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoNameId({})", self.0)
    }
}

impl fmt::Display for GeoNameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert_eq!(GeoNameId::parse("524901").unwrap().get(), 524901);
        assert_eq!(GeoNameId::parse("0").unwrap().get(), 0);
        assert_eq!(GeoNameId::parse("-7").unwrap().get(), -7);
        assert_eq!(GeoNameId::parse("+7").unwrap().get(), 7);
    }

    #[test]
    fn reject_non_numeric() {
        assert!(GeoNameId::parse("").is_err());
        assert!(GeoNameId::parse("-").is_err());
        assert!(GeoNameId::parse("12a").is_err());
        assert!(GeoNameId::parse(" 12").is_err());
        assert!(GeoNameId::parse("1.5").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        let err = GeoNameId::parse("99999999999999999999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid GeoNameId \"99999999999999999999\": out of range"
        );
    }

    #[test]
    fn display_and_debug() {
        let id = GeoNameId::new(1496153);
        assert_eq!(format!("{}", id), "1496153");
        assert_eq!(format!("{:?}", id), "GeoNameId(1496153)");
    }

    #[test]
    fn serializes_as_bare_number() {
        let id = GeoNameId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: GeoNameId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(GeoNameId::new(1) < GeoNameId::new(2));
        assert!(GeoNameId::new(-1) < GeoNameId::new(0));
    }
}
