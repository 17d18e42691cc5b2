//! Caching layer for connection suggestions.
//!
//! A suggestion request is one round-trip to the generative model, which is
//! slow and metered. Identical origin/destination pairs within the TTL are
//! served from cache. Failures are never cached, so a transient collaborator
//! error does not poison later searches.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::gemini::{ConnectionQuery, ConnectionSuggester, SuggestError, SuggestionResponse};

/// Cache key: normalized (origin, destination).
type QueryKey = (String, String);

/// Configuration for the suggestion cache.
#[derive(Debug, Clone)]
pub struct SuggestCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for SuggestCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 500,
        }
    }
}

/// Suggester with caching.
///
/// Wraps any [`ConnectionSuggester`] and caches successful responses,
/// including empty ones: "no reasonable connection" is as cacheable an
/// answer as a real connection.
pub struct CachedSuggester {
    inner: Arc<dyn ConnectionSuggester>,
    cache: MokaCache<QueryKey, Arc<SuggestionResponse>>,
}

impl CachedSuggester {
    /// Create a new cached suggester around `inner`.
    pub fn new(inner: Arc<dyn ConnectionSuggester>, config: &SuggestCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Compute the cache key for a query.
    ///
    /// Case and surrounding whitespace don't change the answer, so they
    /// don't change the key. The catalog lines are excluded: the catalog is
    /// immutable for the process lifetime.
    fn key(query: &ConnectionQuery) -> QueryKey {
        (
            query.origin.trim().to_lowercase(),
            query.destination.trim().to_lowercase(),
        )
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl ConnectionSuggester for CachedSuggester {
    async fn suggest(&self, query: &ConnectionQuery) -> Result<SuggestionResponse, SuggestError> {
        let key = Self::key(query);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(origin = %query.origin, destination = %query.destination, "suggestion cache hit");
            return Ok((*cached).clone());
        }

        let response = self.inner.suggest(query).await?;

        self.cache.insert(key, Arc::new(response.clone())).await;

        Ok(response)
    }
}
