//! Bus route type.

use std::fmt;

/// Error returned when constructing an invalid bus route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bus route: {reason}")]
pub struct InvalidRoute {
    reason: &'static str,
}

/// A named bus route with its ordered stop sequence.
///
/// Route names are short line identifiers like `"W-11"` or `"D-3"` and are
/// unique within a catalog. Every route has at least one stop. Both
/// invariants are enforced at construction, so code that receives a
/// `BusRoute` can trust them.
///
/// # Examples
///
/// ```
/// use bus_server::catalog::BusRoute;
///
/// let route = BusRoute::new("W-11", vec!["Dockyard".into(), "Saddar".into()]).unwrap();
/// assert_eq!(route.name(), "W-11");
/// assert_eq!(route.stops().len(), 2);
///
/// // A route with no stops is rejected
/// assert!(BusRoute::new("X-1", vec![]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BusRoute {
    name: String,
    stops: Vec<String>,
}

impl BusRoute {
    /// Construct a route, validating its invariants.
    ///
    /// The name and every stop must be non-blank; the stop list must be
    /// non-empty. Surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>, stops: Vec<String>) -> Result<Self, InvalidRoute> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(InvalidRoute {
                reason: "route name must not be blank",
            });
        }

        if stops.is_empty() {
            return Err(InvalidRoute {
                reason: "route must have at least one stop",
            });
        }

        let mut trimmed = Vec::with_capacity(stops.len());
        for stop in stops {
            let stop = stop.trim().to_string();
            if stop.is_empty() {
                return Err(InvalidRoute {
                    reason: "stop names must not be blank",
                });
            }
            trimmed.push(stop);
        }

        Ok(BusRoute {
            name,
            stops: trimmed,
        })
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered stop sequence.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Flattens the route to the `"<name>: <stop>, <stop>, …"` line format
    /// used when serializing the catalog for the suggestion model.
    pub fn describe_line(&self) -> String {
        format!("{}: {}", self.name, self.stops.join(", "))
    }
}

impl fmt::Debug for BusRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusRoute({})", self.name)
    }
}

impl fmt::Display for BusRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
