//! Route catalog loading and lookup.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::error::CatalogError;
use super::route::BusRoute;

/// Wrapper for the catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDoc {
    routes: Vec<RouteDoc>,
}

/// One route entry as it appears in the document.
#[derive(Debug, Deserialize)]
struct RouteDoc {
    name: String,
    stops: Vec<String>,
}

/// The static route catalog.
///
/// Loaded once at startup and never mutated afterwards, so it can be shared
/// freely across concurrent searches without locking.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<BusRoute>,
}

impl RouteCatalog {
    /// Construct a catalog from pre-validated routes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty or two routes share a name.
    pub fn new(routes: Vec<BusRoute>) -> Result<Self, CatalogError> {
        if routes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.name().to_string()) {
                return Err(CatalogError::DuplicateName(route.name().to_string()));
            }
        }

        Ok(RouteCatalog { routes })
    }

    /// Load the catalog from a JSON document on disk.
    ///
    /// The document shape is `{"routes": [{"name": "...", "stops": ["..."]}]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Parse the catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })?;

        let routes = doc
            .routes
            .into_iter()
            .map(|r| BusRoute::new(r.name, r.stops))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(routes)
    }

    /// Returns all routes in document order.
    pub fn routes(&self) -> &[BusRoute] {
        &self.routes
    }

    /// Exact lookup by route name.
    pub fn find(&self, name: &str) -> Option<&BusRoute> {
        self.routes.iter().find(|r| r.name() == name)
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the catalog has no routes.
    ///
    /// Construction rejects empty catalogs, so this is false for any
    /// catalog obtained through `new`/`load`.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Flattens every route to a `"<name>: <stop>, <stop>, …"` line.
    ///
    /// These lines are the only knowledge of the network given to the
    /// suggestion model.
    pub fn describe_lines(&self) -> Vec<String> {
        self.routes.iter().map(|r| r.describe_line()).collect()
    }
}
