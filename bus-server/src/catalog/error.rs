//! Catalog loading error types.

use super::route::InvalidRoute;

/// Errors from loading or constructing the route catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog document failed
    #[error("failed to read catalog file {path}: {message}")]
    Io { path: String, message: String },

    /// The catalog document is not valid JSON of the expected shape
    #[error("failed to parse catalog document: {message}")]
    Parse { message: String },

    /// A route in the document violates route invariants
    #[error(transparent)]
    InvalidRoute(#[from] InvalidRoute),

    /// Two routes share a name
    #[error("duplicate route name in catalog: {0}")]
    DuplicateName(String),

    /// The document contains no routes at all
    #[error("catalog contains no routes")]
    Empty,
}
