//! Digest keys for cache entries.

use std::fmt;

use sha2::{Digest, Sha512};

/// Prefix for per-company record entries.
const RECORD_PREFIX: &str = "company-cache-";

/// Input for the ordered key list entry.
const KEY_LIST: &str = "company-cache";

/// Input for the "is initialized" flag entry.
const INITIALIZED: &str = "company-cache is initialized";

/// A cache key: the lowercase hex SHA-512 digest of a fixed input string.
///
/// Digesting normalizes arbitrary company keys into file-name and
/// store-safe identifiers of a fixed length.
///
/// # Examples
///
/// ```
/// use company_lookup::cache::CacheKey;
///
/// let key = CacheKey::for_company("A6Corp");
/// assert_eq!(key.as_str().len(), 128);
/// assert_eq!(key, CacheKey::for_company("A6Corp"));
/// assert_ne!(key, CacheKey::key_list());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the cached record of one company.
    pub fn for_company(key: &str) -> Self {
        Self::digest(&format!("{RECORD_PREFIX}{key}"))
    }

    /// Key for the ordered list of all company keys.
    pub fn key_list() -> Self {
        Self::digest(KEY_LIST)
    }

    /// Key for the flag marking the cache as fully seeded.
    pub fn initialized() -> Self {
        Self::digest(INITIALIZED)
    }

    fn digest(input: &str) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(input.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", &self.0[..16])
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
