//! Static bus route catalog.
//!
//! The catalog is a read-only table of named routes, each with an ordered
//! stop sequence. It is loaded once at process start from a JSON document
//! and shared read-only for the lifetime of the process; nothing mutates it
//! at runtime.

mod error;
mod route;
mod store;

pub use error::CatalogError;
pub use route::{BusRoute, InvalidRoute};
pub use store::RouteCatalog;
