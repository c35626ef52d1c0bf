//! Decision logic over the store.
//!
//! Each query normalizes its input, reads raw records from a [`Store`]
//! and applies one policy:
//! - [`PlaceComparator`] resolves two names and derives north/south and the
//!   time-zone difference
//! - [`PrefixSearch`] lists names starting with a prefix
//! - [`paginate`] computes slice bounds and neighbour markers
//!
//! [`Store`]: crate::store::Store

mod compare;
mod error;
mod help;
mod items;
mod paginate;

pub use compare::{PlaceComparator, most_populous, timezone_diff_hours};
pub use error::QueryError;
pub use help::PrefixSearch;
pub use items::{get_by_id, list_page};
pub use paginate::{PageWindow, paginate};
