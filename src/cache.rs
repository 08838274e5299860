use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::EnrichmentResult;

/// Session-wide memo of successful enrichment lookups, keyed by repository
/// coordinate.
///
/// Entries are never evicted and never replaced: the first stored result for
/// an identifier wins for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct EnrichmentCache {
    map: Mutex<HashMap<String, EnrichmentResult>>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, repo: &str) -> Option<EnrichmentResult> {
        self.map.lock().unwrap().get(repo).cloned()
    }

    /// Stores `result` unless an entry already exists, returning whatever the
    /// cache holds afterwards.
    pub fn insert(&self, repo: &str, result: EnrichmentResult) -> EnrichmentResult {
        self.map
            .lock()
            .unwrap()
            .entry(repo.to_string())
            .or_insert(result)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn stats(stars: u64) -> EnrichmentResult {
        EnrichmentResult {
            stars,
            forks: 0,
            language: None,
            url: "https://github.com/acme/alpha".to_string(),
            homepage: None,
            updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_first_entry_wins() {
        let cache = EnrichmentCache::new();

        assert_eq!(cache.insert("acme/alpha", stats(1)).stars, 1);
        assert_eq!(cache.insert("acme/alpha", stats(2)).stars, 1);
        assert_eq!(cache.get("acme/alpha").unwrap().stars, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss() {
        let cache = EnrichmentCache::new();
        assert!(cache.get("acme/alpha").is_none());
        assert!(cache.is_empty());
    }
}
