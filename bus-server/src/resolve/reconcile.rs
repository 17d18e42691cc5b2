//! Suggestion reconciliation.
//!
//! Maps a chosen model suggestion back onto the authoritative catalog: when
//! the suggestion names a known route, the display gets the catalog's stop
//! list and route number; otherwise the suggestion stands alone as an
//! AI-only route. Reconciliation is total: it never fails, whatever the
//! model produced.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::RouteCatalog;
use crate::gemini::ConnectionSuggestion;

use super::ResolvedRoute;

/// First number attached to a minutes unit, tolerating a range ("30-45
/// minutes") and unit spellings (min/mins/minute/minutes).
static MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)(?:\s*-\s*\d+)?\s*min(?:ute)?s?\b")
        .expect("minutes pattern is valid")
});

/// Best-effort travel-time extraction from suggestion details.
///
/// Returns `"<n> mins"` for the first minutes phrase found, or `None` when
/// the details carry no recognizable time.
pub fn extract_minutes(details: &str) -> Option<String> {
    MINUTES
        .captures(details)
        .map(|caps| format!("{} mins", &caps[1]))
}

/// Reconcile a model suggestion against the catalog.
///
/// Looks up a catalog route whose name appears within `suggestion.route`
/// (the model usually echoes the name, sometimes with surrounding prose).
/// On a match, the resolved route takes the catalog's name, number, and
/// stop list; otherwise the raw suggestion text stands in for the name,
/// the number is `"N/A"`, and the stop list is empty.
pub fn reconcile(
    suggestion: &ConnectionSuggestion,
    origin: &str,
    destination: &str,
    catalog: &RouteCatalog,
) -> ResolvedRoute {
    let matched = catalog
        .routes()
        .iter()
        .find(|route| suggestion.route.contains(route.name()));

    let (name, number, stops) = match matched {
        Some(route) => (
            route.name().to_string(),
            route.name().to_string(),
            route.stops().to_vec(),
        ),
        None => (suggestion.route.clone(), "N/A".to_string(), Vec::new()),
    };

    ResolvedRoute {
        name,
        number,
        stops,
        start: origin.to_string(),
        end: destination.to_string(),
        estimated_time: extract_minutes(&suggestion.details).unwrap_or_else(|| "N/A".to_string()),
        is_ai_suggestion: true,
        ai_details: Some(suggestion.details.clone()),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::BusRoute;
    use proptest::prelude::*;

    proptest! {
        /// Reconciliation is total: arbitrary suggestion text never panics
        /// and always yields a displayable time string.
        #[test]
        fn reconcile_never_fails(route in ".{0,60}", details in ".{0,200}") {
            let catalog = RouteCatalog::new(vec![
                BusRoute::new("D-3", vec!["Malir".into()]).unwrap(),
            ])
            .unwrap();

            let resolved = reconcile(
                &ConnectionSuggestion { route, details },
                "origin",
                "destination",
                &catalog,
            );
            prop_assert!(!resolved.estimated_time.is_empty());
            prop_assert!(resolved.is_ai_suggestion);
        }

        /// The extractor never panics on arbitrary input.
        #[test]
        fn extract_never_panics(details in ".{0,300}") {
            let _ = extract_minutes(&details);
        }
    }
}
