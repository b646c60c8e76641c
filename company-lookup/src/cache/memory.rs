//! In-process cache backend.
//!
//! Clones share the same storage, so several loaders built over clones of
//! one `MemoryCache` see each other's entries. That makes it a stand-in for
//! a persistent cache shared between runs.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::error::CacheError;
use super::key::CacheKey;
use super::CacheBackend;

/// Configuration for the in-memory cache.
///
/// Both limits are off by default. A loader reseeds from its source when a
/// record it needs has expired or been evicted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheConfig {
    /// TTL for cached entries.
    pub ttl: Option<Duration>,

    /// Maximum number of cached entries.
    pub max_capacity: Option<u64>,
}

impl MemoryCacheConfig {
    /// Set a TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set a maximum entry count.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }
}

/// Cache backend backed by a moka cache.
#[derive(Clone)]
pub struct MemoryCache {
    entries: MokaCache<CacheKey, String>,
}

impl MemoryCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(max_capacity) = config.max_capacity {
            builder = builder.max_capacity(max_capacity);
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Remove a single entry.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.entries.invalidate(key).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(&MemoryCacheConfig::default())
    }
}

impl CacheBackend for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).await)
    }

    async fn set(&self, key: CacheKey, value: String) -> Result<(), CacheError> {
        self.entries.insert(key, value).await;
        Ok(())
    }
}
