//! Per-session search state.
//!
//! Tracks the single contended resource in the system: the currently
//! displayed route. One search is in flight per session; starting a new
//! search supersedes any pending one. Each search gets a generation token,
//! and a completion carrying a stale token is dropped, so a slow response
//! from an abandoned search can never overwrite a newer result.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::ResolvedRoute;

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// No search yet, or the result was cleared.
    Idle,
    /// A search is in flight.
    Searching,
    /// The latest search resolved a route.
    Resolved(ResolvedRoute),
    /// The latest search found no reasonable connection. Terminal, not an
    /// error.
    NotFound,
    /// The latest search failed (transport or validation). Terminal for
    /// that attempt.
    Failed(String),
}

impl SearchState {
    /// Lowercase name for serialization and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Searching => "searching",
            SearchState::Resolved(_) => "resolved",
            SearchState::NotFound => "notFound",
            SearchState::Failed(_) => "failed",
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Resolved(ResolvedRoute),
    NotFound,
    Failed(String),
}

/// Token identifying one search attempt.
///
/// Obtained from [`SearchSession::begin`]; must be presented back when the
/// search completes. Completions with a superseded token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

#[derive(Debug)]
struct Inner {
    state: SearchState,
    generation: u64,
}

/// Thread-safe search session.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    inner: Arc<RwLock<Inner>>,
}

impl SearchSession {
    /// Create a session in the `Idle` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: SearchState::Idle,
                generation: 0,
            })),
        }
    }

    /// Start a new search, superseding any search still in flight.
    pub async fn begin(&self) -> SearchToken {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.state = SearchState::Searching;
        SearchToken(guard.generation)
    }

    /// Record the outcome of the search identified by `token`.
    ///
    /// Returns `true` if the outcome was applied, `false` if the token was
    /// stale (a newer search has started, or the session was cleared) and
    /// the outcome was dropped.
    pub async fn complete(&self, token: SearchToken, outcome: SearchOutcome) -> bool {
        let mut guard = self.inner.write().await;
        if token.0 != guard.generation {
            tracing::debug!(token = token.0, current = guard.generation, "dropping stale search outcome");
            return false;
        }

        guard.state = match outcome {
            SearchOutcome::Resolved(route) => SearchState::Resolved(route),
            SearchOutcome::NotFound => SearchState::NotFound,
            SearchOutcome::Failed(message) => SearchState::Failed(message),
        };
        true
    }

    /// Abandon the search identified by `token` without recording an
    /// outcome, returning the session to `Idle`.
    ///
    /// Used when a search is rejected before it really starts (e.g. input
    /// validation). A stale token is a no-op.
    pub async fn abandon(&self, token: SearchToken) {
        let mut guard = self.inner.write().await;
        if token.0 == guard.generation {
            guard.state = SearchState::Idle;
        }
    }

    /// Clear the displayed result and return to `Idle`.
    ///
    /// Also invalidates any search still in flight.
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.state = SearchState::Idle;
    }

    /// The current state.
    pub async fn state(&self) -> SearchState {
        self.inner.read().await.state.clone()
    }

    /// The currently displayed route, if any.
    pub async fn current_route(&self) -> Option<ResolvedRoute> {
        match &self.inner.read().await.state {
            SearchState::Resolved(route) => Some(route.clone()),
            _ => None,
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str) -> ResolvedRoute {
        ResolvedRoute {
            name: name.into(),
            number: name.into(),
            stops: vec!["Saddar".into()],
            start: "Tower".into(),
            end: "Saddar".into(),
            estimated_time: "N/A".into(),
            is_ai_suggestion: false,
            ai_details: None,
        }
    }

    #[tokio::test]
    async fn begins_idle() {
        let session = SearchSession::new();
        assert_eq!(session.state().await, SearchState::Idle);
        assert!(session.current_route().await.is_none());
    }

    #[tokio::test]
    async fn search_lifecycle() {
        let session = SearchSession::new();

        let token = session.begin().await;
        assert_eq!(session.state().await, SearchState::Searching);

        assert!(
            session
                .complete(token, SearchOutcome::Resolved(route("W-11")))
                .await
        );
        assert_eq!(session.current_route().await.unwrap().name, "W-11");
    }

    #[tokio::test]
    async fn not_found_and_failed_are_terminal_states() {
        let session = SearchSession::new();

        let token = session.begin().await;
        session.complete(token, SearchOutcome::NotFound).await;
        assert_eq!(session.state().await, SearchState::NotFound);

        let token = session.begin().await;
        session
            .complete(token, SearchOutcome::Failed("timed out".into()))
            .await;
        assert_eq!(session.state().await, SearchState::Failed("timed out".into()));
        assert!(session.current_route().await.is_none());
    }

    #[tokio::test]
    async fn stale_outcome_cannot_overwrite_newer_search() {
        let session = SearchSession::new();

        let old = session.begin().await;
        let new = session.begin().await;

        // The abandoned search finishes late; its outcome is dropped.
        assert!(
            !session
                .complete(old, SearchOutcome::Resolved(route("OLD")))
                .await
        );
        assert_eq!(session.state().await, SearchState::Searching);

        assert!(
            session
                .complete(new, SearchOutcome::Resolved(route("NEW")))
                .await
        );
        assert_eq!(session.current_route().await.unwrap().name, "NEW");
    }

    #[tokio::test]
    async fn clear_returns_to_idle_and_invalidates_in_flight() {
        let session = SearchSession::new();

        let token = session.begin().await;
        session.clear().await;
        assert_eq!(session.state().await, SearchState::Idle);

        // The cleared search completes late; still idle.
        assert!(
            !session
                .complete(token, SearchOutcome::Resolved(route("LATE")))
                .await
        );
        assert_eq!(session.state().await, SearchState::Idle);
    }

    #[tokio::test]
    async fn clear_from_terminal_state() {
        let session = SearchSession::new();

        let token = session.begin().await;
        session
            .complete(token, SearchOutcome::Resolved(route("W-11")))
            .await;

        session.clear().await;
        assert_eq!(session.state().await, SearchState::Idle);
        assert!(session.current_route().await.is_none());
    }

    #[tokio::test]
    async fn abandon_returns_current_search_to_idle() {
        let session = SearchSession::new();

        let token = session.begin().await;
        session.abandon(token).await;
        assert_eq!(session.state().await, SearchState::Idle);
    }

    #[tokio::test]
    async fn abandon_with_stale_token_is_noop() {
        let session = SearchSession::new();

        let old = session.begin().await;
        let _new = session.begin().await;

        session.abandon(old).await;
        assert_eq!(session.state().await, SearchState::Searching);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let session = SearchSession::new();
        let clone = session.clone();

        let token = session.begin().await;
        clone
            .complete(token, SearchOutcome::Resolved(route("W-11")))
            .await;

        assert_eq!(session.current_route().await.unwrap().name, "W-11");
    }
}
