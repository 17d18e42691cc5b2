//! Suggestion collaborator error types.

/// Errors from the suggestion collaborator.
///
/// `Http`/`Timeout` are transport failures; `Schema` is a validation
/// failure. The caller surfaces both the same way ("could not get
/// suggestions") and never retries internally.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error reaching the suggestion model: {0}")]
    Http(reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("suggestion request timed out")]
    Timeout,

    /// The API returned a non-success status
    #[error("suggestion API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the suggestion API")]
    RateLimited,

    /// The response did not match the declared output schema
    #[error("suggestion response failed schema validation: {message}")]
    Schema {
        message: String,
        /// Truncated response body, kept for logs
        body: Option<String>,
    },
}

impl SuggestError {
    /// True for schema-validation failures, false for transport failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, SuggestError::Schema { .. })
    }
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SuggestError::Timeout
        } else {
            SuggestError::Http(err)
        }
    }
}
