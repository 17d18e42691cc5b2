//! Request and response types for the suggestion collaborator.

use serde::{Deserialize, Serialize};

use crate::catalog::RouteCatalog;

/// Input to one suggestion request.
///
/// Origin and destination are free-form strings: a geocoded address, a stop
/// name as typed, or the literal sentinel `"Your Current Location"`. The
/// `available_routes` lines carry the full catalog flattened to
/// `"<name>: <stop>, <stop>, …"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionQuery {
    pub origin: String,
    pub destination: String,
    pub available_routes: Vec<String>,
}

impl ConnectionQuery {
    /// Build a query for the given endpoints over the full catalog.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        catalog: &RouteCatalog,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            available_routes: catalog.describe_lines(),
        }
    }
}

/// One candidate connection proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSuggestion {
    /// The suggested route, usually echoing a catalog name (possibly with
    /// surrounding prose, e.g. `"Take the D-3"`).
    pub route: String,

    /// Human-readable directions, step-structured when multi-leg.
    pub details: String,
}

/// The validated response shape.
///
/// Deserialization is the schema validation: a payload without
/// `nearbyConnections` does not produce this type. Candidate order is
/// preserved; the first candidate is treated as best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub nearby_connections: Vec<ConnectionSuggestion>,
}
