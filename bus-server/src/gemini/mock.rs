//! Mock suggester for testing and keyless development.
//!
//! Serves a canned response for every query, or fails on demand, and counts
//! how many times it was invoked so tests can assert the collaborator was
//! (or was not) reached.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::ConnectionSuggester;
use super::error::SuggestError;
use super::types::{ConnectionQuery, ConnectionSuggestion, SuggestionResponse};

/// What the mock does when invoked.
#[derive(Debug, Clone)]
enum MockBehavior {
    /// Return this response for every query.
    Respond(SuggestionResponse),
    /// Fail with a schema-validation error.
    FailValidation,
    /// Fail with a transport error.
    FailTransport,
}

/// Mock suggester with a fixed behavior.
#[derive(Debug, Clone)]
pub struct MockSuggester {
    behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockSuggester {
    /// A mock that returns the given candidate connections, in order.
    pub fn with_connections(connections: Vec<ConnectionSuggestion>) -> Self {
        Self::respond(SuggestionResponse {
            nearby_connections: connections,
        })
    }

    /// A mock that returns an empty connection list (the NotFound outcome).
    pub fn empty() -> Self {
        Self::with_connections(Vec::new())
    }

    /// A mock that fails every call with a schema-validation error.
    pub fn failing_validation() -> Self {
        Self {
            behavior: MockBehavior::FailValidation,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock that fails every call with a transport error.
    pub fn failing_transport() -> Self {
        Self {
            behavior: MockBehavior::FailTransport,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a canned [`SuggestionResponse`] from a JSON file.
    ///
    /// Useful for running the server without an API key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SuggestError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SuggestError::Api {
            status: 0,
            message: format!("failed to read mock suggestions from {}: {}", path.display(), e),
        })?;

        let response: SuggestionResponse =
            serde_json::from_str(&json).map_err(|e| SuggestError::Schema {
                message: format!("failed to parse {}: {}", path.display(), e),
                body: Some(json.chars().take(500).collect()),
            })?;

        Ok(Self::respond(response))
    }

    fn respond(response: SuggestionResponse) -> Self {
        Self {
            behavior: MockBehavior::Respond(response),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `suggest` has been called on this mock (shared across
    /// clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionSuggester for MockSuggester {
    async fn suggest(&self, _query: &ConnectionQuery) -> Result<SuggestionResponse, SuggestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Respond(response) => Ok(response.clone()),
            MockBehavior::FailValidation => Err(SuggestError::Schema {
                message: "missing field `nearbyConnections`".to_string(),
                body: Some("{}".to_string()),
            }),
            MockBehavior::FailTransport => Err(SuggestError::Timeout),
        }
    }
}
