//! Optional cache layer in front of the company dataset.
//!
//! A backend is a plain key-value store with hit/miss semantics. The loader
//! seeds it once with the ordered key list, one entry per company and an
//! "initialized" flag, so later runs sharing a persistent backend can skip
//! parsing the source entirely.

mod error;
mod file;
mod key;
mod memory;

use std::future::Future;

pub use error::CacheError;
pub use file::{FileCache, FileCacheConfig};
pub use key::CacheKey;
pub use memory::{MemoryCache, MemoryCacheConfig};

/// Trait for an external key-value cache.
///
/// `get` returns `Ok(None)` on a miss. Writing the same value twice must be
/// harmless: concurrent loaders may seed the same entries.
pub trait CacheBackend: Send + Sync {
    /// Fetch a value.
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = Result<Option<String>, CacheError>> + Send;

    /// Store a value.
    fn set(
        &self,
        key: CacheKey,
        value: String,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// Marker for a loader without a cache backend.
///
/// Has no values, so a loader parameterized with it can never hold a backend.
#[derive(Debug, Clone, Copy)]
pub enum NoCache {}

impl CacheBackend for NoCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        match *self {}
    }

    async fn set(&self, _key: CacheKey, _value: String) -> Result<(), CacheError> {
        match *self {}
    }
}
