//! Domain types for the gazetteer.
//!
//! Places are immutable once loaded. Comparison and page results are built
//! fresh for every request.

mod comparison;
mod error;
mod id;
mod page;
mod place;

pub use comparison::ComparisonResult;
pub use error::ParseError;
pub use id::{GeoNameId, InvalidGeoNameId};
pub use page::PageResult;
pub use place::{FIELD_COUNT, PlaceRecord};
