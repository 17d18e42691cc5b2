//! Connection suggestion collaborator.
//!
//! This module provides the client for the generative model that proposes
//! multi-leg bus connections when the catalog has no direct route.
//!
//! Key characteristics of the collaborator:
//! - The serialized catalog lines in the request are the model's **only**
//!   knowledge of the network; it is instructed never to invent routes
//!   outside that list.
//! - The response must deserialize into [`SuggestionResponse`] or the call
//!   fails; an empty `nearbyConnections` list is a valid "no reasonable
//!   connection exists" result, not an error.
//! - Multi-leg directions are requested as numbered `Step 1: …` steps with
//!   Take/Transfer/Arrive wording. The step parser depends on this format,
//!   so it is a contract, not a style preference.
//! - One request per call; no retries at this layer.

mod client;
mod error;
mod mock;
mod prompt;
mod types;

use async_trait::async_trait;

pub use client::{GeminiClient, GeminiConfig};
pub use error::SuggestError;
pub use mock::MockSuggester;
pub use prompt::build_prompt;
pub use types::{ConnectionQuery, ConnectionSuggestion, SuggestionResponse};

/// The suggester seam the resolution pipeline depends on.
///
/// Implemented by the HTTP client, the caching wrapper, and the mock, so
/// the pipeline can be exercised offline with synthetic responses.
#[async_trait]
pub trait ConnectionSuggester: Send + Sync {
    /// Request connection suggestions for one origin/destination pair.
    async fn suggest(&self, query: &ConnectionQuery) -> Result<SuggestionResponse, SuggestError>;
}
