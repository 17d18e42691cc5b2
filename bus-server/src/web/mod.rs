//! Web layer for the bus route resolver.
//!
//! A thin JSON boundary over the resolution pipeline. Map rendering,
//! autocomplete, geolocation, and voice capture all live in the caller;
//! this layer only ever sees final origin/destination strings.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
