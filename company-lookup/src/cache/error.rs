//! Cache backend error types.

/// Errors from a cache backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Reading or writing the backing store failed
    #[error("cache I/O error: {message}")]
    Io { message: String },

    /// A stored value could not be decoded or encoded
    #[error("corrupt cache entry: {message}")]
    Corrupt { message: String },

    /// A company in the cached key list is neither cached nor in the source
    #[error("cache entry for company \"{key}\" is missing")]
    Missing { key: String },
}
