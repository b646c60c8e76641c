//! Dataset error types.

use std::path::PathBuf;

/// Errors that make a company source unusable.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source is not valid JSON or a record has the wrong shape
    #[error("malformed company JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The same company key appears more than once
    #[error("duplicate company key \"{key}\"")]
    DuplicateKey { key: String },

    /// A company key is the empty string
    #[error("company key must not be empty")]
    EmptyKey,
}

/// Errors from reading the raw company source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading the source file failed
    #[error("failed to read company data from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not produce any data
    #[error("company data unavailable: {message}")]
    Unavailable { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::DuplicateKey {
            key: "Google".into(),
        };
        assert_eq!(err.to_string(), "duplicate company key \"Google\"");

        let err = ParseError::EmptyKey;
        assert_eq!(err.to_string(), "company key must not be empty");

        let err = SourceError::Io {
            path: PathBuf::from("/data/companies.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read company data from /data/companies.json: no such file"
        );

        let err = SourceError::Unavailable {
            message: "offline".into(),
        };
        assert_eq!(err.to_string(), "company data unavailable: offline");
    }
}
