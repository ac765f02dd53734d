use crate::{config::Config, domain::normalize, WhoisRecord};
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: WhoisRecord,
    pub fetched_at: Instant,
}

/// In-memory WHOIS result cache keyed by normalized domain.
///
/// Entries are never swept; staleness is decided when an entry is read.
#[derive(Clone)]
pub struct CacheService {
    cache: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl CacheService {
    pub fn new(config: &Config) -> Self {
        Self::with_ttl(config.cache_ttl())
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();
        Self { cache, ttl }
    }

    pub async fn get(&self, domain: &str) -> Option<WhoisRecord> {
        let key = normalize(domain);

        match self.cache.get(&key).await {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                debug!("Cache hit for domain: {}", key);
                Some(entry.record)
            }
            Some(_) => {
                debug!("Cache entry for {} is stale", key);
                self.cache.invalidate(&key).await;
                None
            }
            None => {
                debug!("Cache miss for domain: {}", key);
                None
            }
        }
    }

    pub async fn put(&self, domain: &str, record: WhoisRecord) {
        let key = normalize(domain);
        let entry = CacheEntry {
            record,
            fetched_at: Instant::now(),
        };
        self.cache.insert(key.clone(), entry).await;
        debug!("Cached WHOIS record for domain: {}", key);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(registrar: &str) -> WhoisRecord {
        WhoisRecord {
            registrar: Some(registrar.to_string()),
            raw_text: format!("Registrar: {}", registrar),
            ..WhoisRecord::default()
        }
    }

    #[tokio::test]
    async fn test_get_after_put_returns_same_record() {
        let cache = CacheService::new(&Config::default());
        let stored = record("Example Registrar, Inc.");

        cache.put("example.com", stored.clone()).await;

        assert_eq!(cache.get("example.com").await, Some(stored));
    }

    #[tokio::test]
    async fn test_keys_are_normalized() {
        let cache = CacheService::new(&Config::default());
        cache.put("https://www.Example.COM/", record("A")).await;

        assert!(cache.get("example.com").await.is_some());
        assert!(cache.get("EXAMPLE.com").await.is_some());
        assert!(cache.get("example.org").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_entry() {
        let cache = CacheService::new(&Config::default());
        cache.put("example.com", record("First")).await;
        cache.put("example.com", record("Second")).await;

        let cached = cache.get("example.com").await.unwrap();
        assert_eq!(cached.registrar.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = CacheService::with_ttl(Duration::from_millis(50));
        cache.put("example.com", record("A")).await;
        assert!(cache.get("example.com").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(cache.get("example.com").await.is_none());
    }
}
