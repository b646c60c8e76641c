//! Disk-based cache backend.
//!
//! Each entry is a small JSON file named after its digest key, so the cache
//! survives process restarts and can be shared between processes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::CacheError;
use super::key::CacheKey;
use super::CacheBackend;

/// Distinguishes temporary files written concurrently by one process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A cached value with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedValue {
    /// Unix timestamp when the entry was written.
    cached_at_secs: i64,
    /// The cached value.
    value: String,
}

/// Configuration for the disk cache.
#[derive(Debug, Clone)]
pub struct FileCacheConfig {
    /// Directory holding the cache files.
    pub dir: PathBuf,
    /// How long an entry remains valid. `None` keeps entries forever.
    pub ttl: Option<Duration>,
}

impl FileCacheConfig {
    /// Create a new cache config with the given directory and no expiry.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: None,
        }
    }

    /// Expire entries once they are older than `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        // Default to a cache directory under the current directory
        Self::new("company_cache")
    }
}

/// Disk cache backend.
#[derive(Debug, Clone)]
pub struct FileCache {
    config: FileCacheConfig,
}

impl FileCache {
    /// Create a new disk cache with the given config.
    pub fn new(config: FileCacheConfig) -> Self {
        Self { config }
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Get the cache TTL, if entries expire.
    pub fn ttl(&self) -> Option<Duration> {
        self.config.ttl
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.config.dir.join(format!("{key}.json"))
    }

    /// A sibling path that no other writer uses.
    fn temp_path_for(&self, path: &Path) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()))
    }

    fn is_expired(&self, cached_at_secs: i64) -> bool {
        let Some(ttl) = self.config.ttl else {
            return false;
        };
        let age_secs = Utc::now().timestamp().saturating_sub(cached_at_secs).max(0) as u64;
        age_secs >= ttl.as_secs()
    }
}

impl CacheBackend for FileCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key);

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let cached: CachedValue =
            serde_json::from_str(&contents).map_err(|e| CacheError::Corrupt {
                message: format!("{}: {}", path.display(), e),
            })?;

        if self.is_expired(cached.cached_at_secs) {
            return Ok(None);
        }

        Ok(Some(cached.value))
    }

    /// Write an entry, creating the cache directory if it doesn't exist.
    ///
    /// The entry is written to a temporary file and renamed into place, so
    /// readers see either the old or the new envelope.
    async fn set(&self, key: CacheKey, value: String) -> Result<(), CacheError> {
        let dir = &self.config.dir;
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| CacheError::Io {
                    message: format!("failed to create cache directory: {}", e),
                })?;
        }

        let cached = CachedValue {
            cached_at_secs: Utc::now().timestamp(),
            value,
        };

        let json = serde_json::to_string(&cached).map_err(|e| CacheError::Corrupt {
            message: format!("failed to serialize cache entry: {}", e),
        })?;

        let path = self.path_for(&key);
        let temp_path = self.temp_path_for(&path);
        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|e| CacheError::Io {
                message: format!("failed to write {}: {}", temp_path.display(), e),
            })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(CacheError::Io {
                message: format!("failed to replace {}: {}", path.display(), e),
            });
        }

        Ok(())
    }
}
