//! Application state for the web layer.

use std::sync::Arc;

use crate::resolve::{RoutePlanner, SearchSession};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The resolution pipeline
    pub planner: Arc<RoutePlanner>,

    /// The single-user search session (current displayed route)
    pub session: SearchSession,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: RoutePlanner, session: SearchSession) -> Self {
        Self {
            planner: Arc::new(planner),
            session,
        }
    }
}
