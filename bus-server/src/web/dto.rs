//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::BusRoute;
use crate::gemini::ConnectionSuggestion;
use crate::resolve::{NavigationStep, ResolvedRoute, SearchState};

/// Request to resolve a route.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Origin as free text, a geocoded address, or the literal
    /// "Your Current Location" sentinel
    pub origin: String,

    /// Destination as free text or a geocoded address
    pub destination: String,
}

/// A resolved route in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub name: String,
    pub number: String,
    pub stops: Vec<String>,
    pub start: String,
    pub end: String,
    pub estimated_time: String,
    pub is_ai_suggestion: bool,
    pub ai_details: Option<String>,
    /// Navigation steps derived from the AI details; empty for direct
    /// catalog routes
    pub steps: Vec<StepResult>,
}

impl From<&ResolvedRoute> for RouteResult {
    fn from(route: &ResolvedRoute) -> Self {
        Self {
            name: route.name.clone(),
            number: route.number.clone(),
            stops: route.stops.clone(),
            start: route.start.clone(),
            end: route.end.clone(),
            estimated_time: route.estimated_time.clone(),
            is_ai_suggestion: route.is_ai_suggestion,
            ai_details: route.ai_details.clone(),
            steps: route.steps().iter().map(StepResult::from).collect(),
        }
    }
}

/// One navigation step in responses.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub label: Option<String>,
    pub text: String,
    pub kind: &'static str,
}

impl From<&NavigationStep> for StepResult {
    fn from(step: &NavigationStep) -> Self {
        Self {
            label: step.label.clone(),
            text: step.text.clone(),
            kind: step.kind.as_str(),
        }
    }
}

/// An alternate (non-first) model candidate in responses.
#[derive(Debug, Serialize)]
pub struct AlternateResult {
    pub route: String,
    pub details: String,
}

impl From<&ConnectionSuggestion> for AlternateResult {
    fn from(suggestion: &ConnectionSuggestion) -> Self {
        Self {
            route: suggestion.route.clone(),
            details: suggestion.details.clone(),
        }
    }
}

/// Response for route resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    /// `"resolved"` or `"notFound"`
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteResult>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<AlternateResult>,
}

/// One catalog route in the listing.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub name: String,
    pub stops: Vec<String>,
}

impl From<&BusRoute> for RouteInfo {
    fn from(route: &BusRoute) -> Self {
        Self {
            name: route.name().to_string(),
            stops: route.stops().to_vec(),
        }
    }
}

/// Response for the catalog listing.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteInfo>,
}

/// Response for the current session state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRouteResponse {
    /// `"idle"`, `"searching"`, `"resolved"`, `"notFound"`, or `"failed"`
    pub state: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteResult>,
}

impl From<&SearchState> for CurrentRouteResponse {
    fn from(state: &SearchState) -> Self {
        let route = match state {
            SearchState::Resolved(route) => Some(RouteResult::from(route)),
            _ => None,
        };
        Self {
            state: state.as_str(),
            route,
        }
    }
}

/// Error body returned by failing endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
