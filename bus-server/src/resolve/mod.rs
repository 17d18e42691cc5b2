//! Route resolution pipeline.
//!
//! Given an origin and a destination, the pipeline first checks the static
//! catalog for a single route serving both endpoints, and only when that
//! fails asks the suggestion model for a multi-leg connection. The chosen
//! suggestion is parsed into navigation steps and reconciled back against
//! the catalog for display.

mod matcher;
mod reconcile;
mod session;
mod steps;

use std::sync::Arc;

use crate::catalog::{BusRoute, RouteCatalog};
use crate::gemini::{ConnectionQuery, ConnectionSuggester, ConnectionSuggestion, SuggestError};

pub use matcher::direct_match;
pub use reconcile::{extract_minutes, reconcile};
pub use session::{SearchOutcome, SearchSession, SearchState, SearchToken};
pub use steps::{NavigationStep, StepClassifier, StepKind, parse_steps, parse_steps_with};

/// The terminal artifact handed to the display layer.
///
/// Either a direct catalog route (`is_ai_suggestion = false`, stops drawn
/// verbatim from one catalog entry) or a reconciled model suggestion
/// (`is_ai_suggestion = true`, stops borrowed from a name match or empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Display name: catalog name when known, raw suggestion text otherwise
    pub name: String,
    /// Route number: catalog name when known, `"N/A"` otherwise
    pub number: String,
    /// Authoritative stop list, possibly empty for AI-only routes
    pub stops: Vec<String>,
    /// The origin as searched
    pub start: String,
    /// The destination as searched
    pub end: String,
    /// Display string, best-effort extracted, `"N/A"` when absent
    pub estimated_time: String,
    /// Whether this came from the suggestion model
    pub is_ai_suggestion: bool,
    /// The model's directions, kept verbatim for display and re-parsing
    pub ai_details: Option<String>,
}

impl ResolvedRoute {
    /// Build a resolved route straight from a catalog entry (the direct
    /// match path; the suggestion model is not involved).
    pub fn from_catalog(route: &BusRoute, origin: &str, destination: &str) -> Self {
        Self {
            name: route.name().to_string(),
            number: route.name().to_string(),
            stops: route.stops().to_vec(),
            start: origin.to_string(),
            end: destination.to_string(),
            estimated_time: "N/A".to_string(),
            is_ai_suggestion: false,
            ai_details: None,
        }
    }

    /// Navigation steps derived from the model's directions.
    ///
    /// Recomputed on each call; empty for direct catalog routes.
    pub fn steps(&self) -> Vec<NavigationStep> {
        self.ai_details
            .as_deref()
            .map(parse_steps)
            .unwrap_or_default()
    }
}

/// Outcome of a successful resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A route was resolved; alternates are the remaining model candidates
    /// in response order (always empty on the direct-match path).
    Resolved {
        route: ResolvedRoute,
        alternates: Vec<ConnectionSuggestion>,
    },
    /// The model found no reasonable connection. Terminal, not an error.
    NotFound,
}

/// Errors from the resolution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Origin or destination was empty; rejected before any external call
    #[error("missing {field}: both origin and destination are required")]
    MissingInput { field: &'static str },

    /// The suggestion collaborator failed (transport or schema validation)
    #[error("could not get route suggestions: {0}")]
    Suggest(#[from] SuggestError),
}

/// The route resolution pipeline.
///
/// Holds the immutable catalog and the suggester seam, both injected so
/// the pipeline is independently testable with synthetic catalogs and a
/// mock suggester.
pub struct RoutePlanner {
    catalog: Arc<RouteCatalog>,
    suggester: Arc<dyn ConnectionSuggester>,
}

impl RoutePlanner {
    /// Create a planner over the given catalog and suggester.
    pub fn new(catalog: Arc<RouteCatalog>, suggester: Arc<dyn ConnectionSuggester>) -> Self {
        Self { catalog, suggester }
    }

    /// The catalog this planner resolves against.
    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    /// Resolve a route between two endpoints.
    ///
    /// Input validation happens first: a blank origin or destination is
    /// rejected without touching the suggester. A direct catalog match
    /// short-circuits the model entirely. Otherwise the first model
    /// candidate is reconciled against the catalog; an empty candidate
    /// list is the `NotFound` outcome.
    pub async fn resolve(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Resolution, ResolveError> {
        let origin = origin.trim();
        let destination = destination.trim();

        if origin.is_empty() {
            return Err(ResolveError::MissingInput { field: "origin" });
        }
        if destination.is_empty() {
            return Err(ResolveError::MissingInput {
                field: "destination",
            });
        }

        if let Some(route) = direct_match(origin, destination, &self.catalog) {
            tracing::info!(route = route.name(), "direct catalog match");
            return Ok(Resolution::Resolved {
                route: ResolvedRoute::from_catalog(route, origin, destination),
                alternates: Vec::new(),
            });
        }

        tracing::debug!(%origin, %destination, "no direct match, asking suggestion model");

        let query = ConnectionQuery::new(origin, destination, &self.catalog);
        let response = self.suggester.suggest(&query).await?;

        let mut candidates = response.nearby_connections.into_iter();
        let Some(first) = candidates.next() else {
            return Ok(Resolution::NotFound);
        };

        Ok(Resolution::Resolved {
            route: reconcile(&first, origin, destination, &self.catalog),
            alternates: candidates.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::MockSuggester;

    fn catalog() -> Arc<RouteCatalog> {
        Arc::new(
            RouteCatalog::new(vec![
                BusRoute::new(
                    "W-11",
                    vec!["Dockyard".into(), "Tower".into(), "Saddar".into()],
                )
                .unwrap(),
                BusRoute::new(
                    "D-3",
                    vec!["Malir".into(), "Drigh Road".into(), "Karachi Airport".into()],
                )
                .unwrap(),
            ])
            .unwrap(),
        )
    }

    fn planner(mock: &MockSuggester) -> RoutePlanner {
        RoutePlanner::new(catalog(), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn ai_suggestion_reconciled_against_catalog() {
        // Origin is on W-11 only, destination on D-3 only: no direct match,
        // so the pipeline falls back to the model.
        let mock = MockSuggester::with_connections(vec![ConnectionSuggestion {
            route: "D-3".into(),
            details: "Step 1: Take D-3 to Drigh Road. About 30-45 minutes.".into(),
        }]);

        let resolution = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap();

        let Resolution::Resolved { route, alternates } = resolution else {
            panic!("expected a resolved route");
        };
        assert!(route.is_ai_suggestion);
        assert_eq!(route.stops, vec!["Malir", "Drigh Road", "Karachi Airport"]);
        assert_eq!(route.estimated_time, "30 mins");
        assert!(alternates.is_empty());

        let steps = route.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, StepKind::Board);

        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_connection_list_is_not_found() {
        let mock = MockSuggester::empty();
        let resolution = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn malformed_payload_is_validation_failure() {
        let mock = MockSuggester::failing_validation();
        let err = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Suggest(e) if e.is_validation()));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let mock = MockSuggester::failing_transport();
        let err = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Suggest(e) if !e.is_validation()));
    }

    #[tokio::test]
    async fn missing_input_rejected_before_any_external_call() {
        let mock = MockSuggester::empty();
        let planner = planner(&mock);

        let err = planner.resolve("", "Karachi Airport").await.unwrap_err();
        assert!(matches!(err, ResolveError::MissingInput { field: "origin" }));

        let err = planner.resolve("Saddar", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingInput {
                field: "destination"
            }
        ));

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn direct_match_short_circuits_the_model() {
        let mock = MockSuggester::empty();
        let resolution = planner(&mock).resolve("Tower", "Saddar").await.unwrap();

        let Resolution::Resolved { route, .. } = resolution else {
            panic!("expected a resolved route");
        };
        assert!(!route.is_ai_suggestion);
        assert_eq!(route.name, "W-11");
        assert_eq!(route.stops, vec!["Dockyard", "Tower", "Saddar"]);
        assert!(route.steps().is_empty());

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn remaining_candidates_become_alternates() {
        let mock = MockSuggester::with_connections(vec![
            ConnectionSuggestion {
                route: "D-3".into(),
                details: "Step 1: Take D-3.".into(),
            },
            ConnectionSuggestion {
                route: "W-11".into(),
                details: "Step 1: Take W-11. Step 2: Transfer to D-3.".into(),
            },
        ]);

        let resolution = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap();

        let Resolution::Resolved { route, alternates } = resolution else {
            panic!("expected a resolved route");
        };
        assert_eq!(route.name, "D-3");
        assert_eq!(alternates.len(), 1);
        assert_eq!(alternates[0].route, "W-11");
    }

    #[tokio::test]
    async fn unmatched_suggestion_is_opaque_ai_route() {
        let mock = MockSuggester::with_connections(vec![ConnectionSuggestion {
            route: "Orange Line".into(),
            details: "No steps here".into(),
        }]);

        let resolution = planner(&mock)
            .resolve("Saddar", "Karachi Airport")
            .await
            .unwrap();

        let Resolution::Resolved { route, .. } = resolution else {
            panic!("expected a resolved route");
        };
        assert_eq!(route.name, "Orange Line");
        assert_eq!(route.number, "N/A");
        assert!(route.stops.is_empty());
    }
}
