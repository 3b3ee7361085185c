use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;
use crate::errors::Result;

declare_object_cache_plugin!("moka", MokaObjectCache);

#[derive(Clone)]
struct CachedEntry {
    value: String,
    ttl: Duration,
}

// 每个条目使用插入时指定的 TTL
struct EntryExpiry;

impl Expiry<String, CachedEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

pub struct MokaObjectCache {
    inner: Cache<String, CachedEntry>,
    default_ttl: Duration,
}

impl MokaObjectCache {
    pub async fn new() -> Result<Self> {
        let config = &AppConfig::get().cache;
        Ok(Self::with_settings(
            config.memory.max_capacity,
            Duration::from_secs(config.default_ttl),
        ))
    }

    pub fn with_settings(max_capacity: u64, default_ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();
        debug!(
            "MokaObjectCache initialized (max capacity: {}, default ttl: {:?})",
            max_capacity, default_ttl
        );
        Self { inner, default_ttl }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, CachedEntry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaObjectCache::with_settings(100, Duration::from_secs(60));
        cache.insert_raw("user:a".into(), "1".into(), 0).await;
        assert_eq!(cache.get_raw("user:a").await, CacheResult::Found("1".into()));

        cache.remove("user:a").await;
        assert_eq!(cache.get_raw("user:a").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl() {
        let cache = MokaObjectCache::with_settings(100, Duration::from_secs(60));
        cache.insert_raw("short".into(), "x".into(), 1).await;
        cache.insert_raw("long".into(), "y".into(), 0).await;

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("long").await, CacheResult::Found("y".into()));
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let cache: Box<dyn ObjectCache> =
            Box::new(MokaObjectCache::with_settings(10, Duration::from_secs(60)));
        cache.insert("nums".into(), &vec![1, 2, 3], 0).await;
        assert_eq!(
            cache.get::<Vec<i32>>("nums").await,
            CacheResult::Found(vec![1, 2, 3])
        );
        cache.insert_raw("bad".into(), "not json".into(), 0).await;
        assert_eq!(
            cache.get::<Vec<i32>>("bad").await,
            CacheResult::ExistsButNoValue
        );
    }
}
