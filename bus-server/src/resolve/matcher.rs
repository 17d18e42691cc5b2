//! Direct route matching.
//!
//! Before paying for a model round-trip, check whether a single catalog
//! route already serves both endpoints. Matching is a pure function of its
//! inputs; the catalog is immutable per process.

use crate::catalog::{BusRoute, RouteCatalog};

/// Find a catalog route that plausibly serves both endpoints.
///
/// An endpoint "lands on" a stop when, after lowercasing and trimming,
/// either string contains the other. Geocoded input is usually a superstring
/// of the stop name ("Saddar, Karachi, Pakistan" lands on "Saddar"), and a
/// terse query can be a substring of a long stop name. Origin and
/// destination must land on different stop positions of the route; a route
/// where both endpoints collapse onto the same stop does not serve the trip.
///
/// Returns the first matching route in catalog order, or `None` to signal
/// the caller to fall back to the suggestion model.
pub fn direct_match<'a>(
    origin: &str,
    destination: &str,
    catalog: &'a RouteCatalog,
) -> Option<&'a BusRoute> {
    let origin = origin.trim().to_lowercase();
    let destination = destination.trim().to_lowercase();

    if origin.is_empty() || destination.is_empty() {
        return None;
    }

    catalog
        .routes()
        .iter()
        .find(|route| serves_both(route, &origin, &destination))
}

/// True when the route has distinct stop positions for the two endpoints.
fn serves_both(route: &BusRoute, origin: &str, destination: &str) -> bool {
    let origin_stops = matching_positions(route, origin);
    if origin_stops.is_empty() {
        return false;
    }
    let destination_stops = matching_positions(route, destination);

    origin_stops
        .iter()
        .any(|i| destination_stops.iter().any(|j| i != j))
}

/// Stop indices of the route that the endpoint lands on.
fn matching_positions(route: &BusRoute, endpoint: &str) -> Vec<usize> {
    route
        .stops()
        .iter()
        .enumerate()
        .filter(|(_, stop)| {
            let stop = stop.to_lowercase();
            stop.contains(endpoint) || endpoint.contains(&stop)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RouteCatalog {
        RouteCatalog::new(vec![
            BusRoute::new(
                "W-11",
                vec!["Dockyard".into(), "Tower".into(), "Saddar".into()],
            )
            .unwrap(),
            BusRoute::new(
                "D-3",
                vec![
                    "Karachi Cantt".into(),
                    "Drigh Road".into(),
                    "Malir".into(),
                    "Karachi Airport".into(),
                ],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn matches_route_serving_both_endpoints() {
        let catalog = catalog();
        let route = direct_match("Tower", "Saddar", &catalog).unwrap();
        assert_eq!(route.name(), "W-11");
    }

    #[test]
    fn matches_case_insensitively() {
        let catalog = catalog();
        assert!(direct_match("tower", "SADDAR", &catalog).is_some());
    }

    #[test]
    fn matches_geocoded_superstring() {
        let catalog = catalog();
        let route = direct_match("Saddar, Karachi, Pakistan", "Tower, Karachi", &catalog).unwrap();
        assert_eq!(route.name(), "W-11");
    }

    #[test]
    fn matches_partial_stop_name() {
        let catalog = catalog();
        // "Cantt" is a substring of the stop "Karachi Cantt".
        let route = direct_match("Cantt", "Malir", &catalog).unwrap();
        assert_eq!(route.name(), "D-3");
    }

    #[test]
    fn no_match_across_routes() {
        let catalog = catalog();
        // Origin on W-11, destination on D-3: no single route serves both.
        assert!(direct_match("Dockyard", "Malir", &catalog).is_none());
    }

    #[test]
    fn no_match_when_endpoints_collapse_to_same_stop() {
        let catalog = catalog();
        assert!(direct_match("Saddar", "Saddar", &catalog).is_none());
    }

    #[test]
    fn same_stop_text_different_positions_still_matches() {
        let catalog = RouteCatalog::new(vec![
            BusRoute::new(
                "L-1",
                vec!["Tower".into(), "Empress Market".into(), "Tower Gate".into()],
            )
            .unwrap(),
        ])
        .unwrap();
        // "Tower" lands on positions 0 and 2; the endpoints can use
        // different ones.
        assert!(direct_match("Tower", "Tower Gate", &catalog).is_some());
    }

    #[test]
    fn unknown_endpoints_do_not_match() {
        let catalog = catalog();
        assert!(direct_match("Lahore", "Saddar", &catalog).is_none());
        assert!(direct_match("Tower", "Islamabad", &catalog).is_none());
    }

    #[test]
    fn blank_endpoints_do_not_match() {
        let catalog = catalog();
        assert!(direct_match("", "Saddar", &catalog).is_none());
        assert!(direct_match("Tower", "   ", &catalog).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Matching is pure: two calls with identical arguments agree.
        #[test]
        fn matching_is_pure(origin in ".{0,40}", destination in ".{0,40}") {
            let catalog = RouteCatalog::new(vec![
                BusRoute::new(
                    "W-11",
                    vec!["Dockyard".into(), "Tower".into(), "Saddar".into()],
                )
                .unwrap(),
            ])
            .unwrap();

            let first = direct_match(&origin, &destination, &catalog).map(|r| r.name().to_string());
            let second = direct_match(&origin, &destination, &catalog).map(|r| r.name().to_string());
            prop_assert_eq!(first, second);
        }
    }
}
