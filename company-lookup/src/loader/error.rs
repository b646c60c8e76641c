//! Loader error types.

use std::fmt;

use crate::cache::CacheError;
use crate::dataset::{ParseError, SourceError};

/// Which field a lookup searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Key,
    Name,
    BrandName,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupKind::Key => "key",
            LookupKind::Name => "name",
            LookupKind::BrandName => "brand name",
        })
    }
}

/// Errors from the company loader.
///
/// `NotFound` is an ordinary outcome of a lookup. Every other variant means
/// the loader could not build or read its index.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No company matched the lookup
    #[error("the company with {by} \"{value}\" was not found")]
    NotFound { by: LookupKind, value: String },

    /// The company source is malformed
    #[error("invalid company data: {0}")]
    Parse(#[from] ParseError),

    /// The company source could not be read
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The cache backend failed
    #[error("company cache failure: {0}")]
    Cache(#[from] CacheError),
}

impl LoadError {
    pub fn not_found(by: LookupKind, value: impl Into<String>) -> Self {
        LoadError::NotFound {
            by,
            value: value.into(),
        }
    }

    /// Whether this is a lookup miss rather than a structural failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}
