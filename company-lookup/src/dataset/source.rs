//! Where the company JSON comes from.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::error::SourceError;

/// The dataset bundled with the crate.
const BUNDLED_COMPANIES: &str = include_str!("../../data/companies.json");

/// Trait for providing the raw company JSON.
///
/// This abstraction allows the loader to be tested with in-memory data.
pub trait DatasetSource: Send + Sync {
    /// Read the full JSON text of the dataset.
    fn read(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// The company list shipped with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DatasetSource for EmbeddedSource {
    async fn read(&self) -> Result<String, SourceError> {
        Ok(BUNDLED_COMPANIES.to_string())
    }
}

/// A company JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source that reads the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    async fn read(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Company JSON held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    json: String,
}

impl InlineSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl DatasetSource for InlineSource {
    async fn read(&self) -> Result<String, SourceError> {
        Ok(self.json.clone())
    }
}
