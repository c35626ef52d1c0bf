//! Web layer for the gazetteer.
//!
//! Provides HTTP endpoints for place lookup, paged listing, city
//! comparison and name suggestions.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
