//! Loader configuration.

/// Key loaded by [`NotFoundPolicy::unknown`].
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// What a by-name or by-brand-name lookup does when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// Return `NotFound`.
    #[default]
    Fail,

    /// Load this company key instead.
    ///
    /// If the fallback key is itself missing, the original `NotFound` is
    /// returned.
    FallbackKey(String),
}

impl NotFoundPolicy {
    /// Fall back to the `"Unknown"` company.
    pub fn unknown() -> Self {
        NotFoundPolicy::FallbackKey(UNKNOWN_COMPANY.to_string())
    }
}

/// Configuration for a [`CompanyLoader`](super::CompanyLoader).
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Behaviour of name and brand name lookups that match nothing.
    /// Exact key lookups always fail with `NotFound`.
    pub not_found: NotFoundPolicy,
}

impl LoaderConfig {
    /// Create a new configuration with the given policy.
    pub fn new(not_found: NotFoundPolicy) -> Self {
        Self { not_found }
    }

    /// Set the not-found policy.
    pub fn with_not_found(mut self, not_found: NotFoundPolicy) -> Self {
        self.not_found = not_found;
        self
    }
}
