use std::sync::Arc;

use tracing::debug;

use crate::cache::EnrichmentCache;
use crate::error::ProviderError;
use crate::model::EnrichmentResult;
use crate::provider::StatsProvider;

/// Fetches per-project statistics, consulting the session cache first.
///
/// Only successful lookups are cached, a failed project is asked again the
/// next time it is requested.
pub struct EnrichmentClient<P> {
    provider: P,
    cache: Arc<EnrichmentCache>,
}

impl<P: StatsProvider> EnrichmentClient<P> {
    pub fn new(provider: P, cache: Arc<EnrichmentCache>) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &Arc<EnrichmentCache> {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn fetch_enrichment(&self, repo: &str) -> Result<EnrichmentResult, ProviderError> {
        if let Some(hit) = self.cache.get(repo) {
            debug!(repo, "enrichment cache hit");
            return Ok(hit);
        }

        let result = self.provider.lookup(repo).await?;

        Ok(self.cache.insert(repo, result))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};

    use super::*;

    /// In-memory provider answering from a fixed table and counting calls.
    /// Repositories missing from the table fail with a 404.
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        pub(crate) table: HashMap<String, EnrichmentResult>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeProvider {
        pub(crate) fn with(mut self, repo: &str, stars: u64) -> Self {
            self.table.insert(repo.to_string(), stats(repo, stars));
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatsProvider for FakeProvider {
        async fn lookup(&self, repo: &str) -> Result<EnrichmentResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.table
                .get(repo)
                .cloned()
                .ok_or(ProviderError::Status(404))
        }
    }

    pub(crate) fn stats(repo: &str, stars: u64) -> EnrichmentResult {
        EnrichmentResult {
            stars,
            forks: stars / 2,
            language: Some("Rust".to_string()),
            url: format!("https://github.com/{repo}"),
            homepage: None,
            updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let provider = FakeProvider::default().with("acme/alpha", 5);
        let client = EnrichmentClient::new(provider, Arc::new(EnrichmentCache::new()));

        let first = client.fetch_enrichment("acme/alpha").await.unwrap();
        let second = client.fetch_enrichment("acme/alpha").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.provider().calls(), 1);
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let client = EnrichmentClient::new(FakeProvider::default(), Arc::new(EnrichmentCache::new()));

        let err = client.fetch_enrichment("acme/gone").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status(404)));
        assert!(client.fetch_enrichment("acme/gone").await.is_err());

        assert_eq!(client.provider().calls(), 2);
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_shared_cache() {
        let cache = Arc::new(EnrichmentCache::new());
        cache.insert("acme/alpha", stats("acme/alpha", 9));

        let client = EnrichmentClient::new(FakeProvider::default(), cache);
        let result = client.fetch_enrichment("acme/alpha").await.unwrap();

        assert_eq!(result.stars, 9);
        assert_eq!(client.provider().calls(), 0);
    }
}
