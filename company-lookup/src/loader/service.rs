//! The company lookup service.

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheBackend, CacheError, CacheKey, NoCache};
use crate::company::CompanyRecord;
use crate::dataset::{Dataset, DatasetSource, EmbeddedSource};

use super::config::{LoaderConfig, NotFoundPolicy};
use super::error::{LoadError, LookupKind};

/// Selects the field a reverse lookup compares against.
type Field = for<'a> fn(&'a CompanyRecord) -> Option<&'a str>;

/// Ordered company keys; the records themselves live in the cache backend.
#[derive(Debug)]
struct KeyIndex {
    order: Vec<String>,
    members: HashSet<String>,
}

impl KeyIndex {
    fn new(order: Vec<String>) -> Self {
        let members = order.iter().cloned().collect();
        Self { order, members }
    }
}

/// State of an initialized loader.
#[derive(Debug)]
enum Index {
    /// The parsed dataset, held directly.
    Local(Dataset),

    /// Keys only; records are read from the cache backend.
    Cached(KeyIndex),
}

impl Index {
    fn contains(&self, key: &str) -> bool {
        match self {
            Index::Local(dataset) => dataset.contains(key),
            Index::Cached(keys) => keys.members.contains(key),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            Index::Local(dataset) => dataset.keys().map(String::from).collect(),
            Index::Cached(keys) => keys.order.clone(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Index::Local(dataset) => dataset.len(),
            Index::Cached(keys) => keys.order.len(),
        }
    }
}

/// Resolves company keys, names and brand names to [`CompanyRecord`]s.
///
/// The source is parsed lazily on the first call to any lookup and at most
/// once per loader. Concurrent first calls wait for a single parse. If
/// initialization fails, the error is logged and returned, and the next call
/// tries again.
///
/// With a [`CacheBackend`], the parsed records are written to the backend
/// together with an "initialized" flag. A later loader sharing a persistent
/// backend reads the key list from it and never touches the source.
///
/// A record that expired or was evicted from the backend is restored by
/// parsing the source again and reseeding the cache.
///
/// Structural failures (unreadable or malformed source, cache backend errors)
/// are propagated from every operation, including [`has`](Self::has).
///
/// # Examples
///
/// ```
/// use company_lookup::{CompanyLoader, InlineSource};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), company_lookup::LoadError> {
/// let loader = CompanyLoader::new(InlineSource::new(
///     r#"{"Google Inc.": {"name": "Google Inc.", "brandname": "Google"}}"#,
/// ));
///
/// assert!(loader.has("Google Inc.").await?);
///
/// let google = loader.load_by_brand_name("Google").await?;
/// assert_eq!(google.company_type(), "Google Inc.");
///
/// let err = loader.load("Alphabet").await.unwrap_err();
/// assert!(err.is_not_found());
/// # Ok(())
/// # }
/// ```
pub struct CompanyLoader<S, C = NoCache> {
    source: S,
    cache: Option<C>,
    config: LoaderConfig,
    index: OnceCell<Index>,
}

impl CompanyLoader<EmbeddedSource> {
    /// Create a loader over the dataset bundled with this crate.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSource)
    }
}

impl<S: DatasetSource> CompanyLoader<S> {
    /// Create a loader that keeps the parsed dataset in memory.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: None,
            config: LoaderConfig::default(),
            index: OnceCell::new(),
        }
    }
}

impl<S: DatasetSource, C: CacheBackend> CompanyLoader<S, C> {
    /// Create a loader fronted by a cache backend.
    pub fn with_cache(source: S, cache: C) -> Self {
        Self {
            source,
            cache: Some(cache),
            config: LoaderConfig::default(),
            index: OnceCell::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Whether the index has been built.
    pub fn is_initialized(&self) -> bool {
        self.index.initialized()
    }

    /// Whether a company with this key exists.
    pub async fn has(&self, key: &str) -> Result<bool, LoadError> {
        let index = self.index().await?;
        Ok(index.contains(key))
    }

    /// Load the company with this key.
    pub async fn load(&self, key: &str) -> Result<CompanyRecord, LoadError> {
        let index = self.index().await?;

        match self.record(index, key).await? {
            Some(record) => Ok(record),
            None => {
                debug!(company = key, "company key not found");
                Err(LoadError::not_found(LookupKind::Key, key))
            }
        }
    }

    /// Load the first company, in dataset order, whose name is exactly `name`.
    pub async fn load_by_name(&self, name: &str) -> Result<CompanyRecord, LoadError> {
        self.load_by(LookupKind::Name, CompanyRecord::name, name).await
    }

    /// Load the first company, in dataset order, whose brand name is exactly `brand_name`.
    pub async fn load_by_brand_name(&self, brand_name: &str) -> Result<CompanyRecord, LoadError> {
        self.load_by(LookupKind::BrandName, CompanyRecord::brand_name, brand_name)
            .await
    }

    /// All company keys in dataset order.
    pub async fn keys(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.index().await?.keys())
    }

    /// Number of companies.
    pub async fn len(&self) -> Result<usize, LoadError> {
        Ok(self.index().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, LoadError> {
        Ok(self.len().await? == 0)
    }

    async fn load_by(
        &self,
        by: LookupKind,
        field: Field,
        value: &str,
    ) -> Result<CompanyRecord, LoadError> {
        let index = self.index().await?;

        if let Some(key) = self.find_key(index, field, value).await? {
            return self.load(&key).await;
        }

        match &self.config.not_found {
            NotFoundPolicy::Fail => {
                debug!(%by, value, "no company matched");
                Err(LoadError::not_found(by, value))
            }
            NotFoundPolicy::FallbackKey(fallback) => {
                debug!(%by, value, fallback = fallback.as_str(), "no company matched, using fallback");
                match self.load(fallback).await {
                    Err(err) if err.is_not_found() => Err(LoadError::not_found(by, value)),
                    result => result,
                }
            }
        }
    }

    async fn index(&self) -> Result<&Index, LoadError> {
        self.index
            .get_or_try_init(|| self.build_index())
            .await
            .inspect_err(|err| error!(error = %err, "failed to initialize company index"))
    }

    async fn build_index(&self) -> Result<Index, LoadError> {
        match &self.cache {
            None => Ok(Index::Local(self.parse().await?)),
            Some(cache) => Ok(Index::Cached(self.seeded_keys(cache).await?)),
        }
    }

    async fn parse(&self) -> Result<Dataset, LoadError> {
        let json = self.source.read().await?;
        let dataset = Dataset::from_json(&json)?;
        info!(companies = dataset.len(), "parsed company dataset");
        Ok(dataset)
    }

    /// Read the key list from an already seeded cache, or parse and seed it.
    async fn seeded_keys(&self, cache: &C) -> Result<KeyIndex, LoadError> {
        if is_seeded(cache).await? {
            match cache.get(&CacheKey::key_list()).await? {
                Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                    Ok(keys) => {
                        debug!(companies = keys.len(), "using seeded company cache");
                        return Ok(KeyIndex::new(keys));
                    }
                    Err(e) => warn!(error = %e, "cached company key list is corrupt, reseeding"),
                },
                None => warn!("company cache is marked initialized but has no key list, reseeding"),
            }
        }

        let dataset = self.parse().await?;
        seed(cache, &dataset).await?;
        Ok(KeyIndex::new(dataset.keys().map(String::from).collect()))
    }

    async fn record(&self, index: &Index, key: &str) -> Result<Option<CompanyRecord>, LoadError> {
        match (index, &self.cache) {
            (Index::Local(dataset), _) => Ok(dataset.get(key).cloned()),
            (Index::Cached(keys), Some(cache)) if keys.members.contains(key) => {
                Ok(Some(self.cached_record(cache, key).await?))
            }
            (Index::Cached(_), _) => Ok(None),
        }
    }

    async fn find_key(
        &self,
        index: &Index,
        field: Field,
        value: &str,
    ) -> Result<Option<String>, LoadError> {
        match (index, &self.cache) {
            (Index::Local(dataset), _) => Ok(dataset.find_first(field, value).map(String::from)),
            (Index::Cached(keys), Some(cache)) => {
                for key in &keys.order {
                    let record = self.cached_record(cache, key).await?;
                    if field(&record) == Some(value) {
                        return Ok(Some(key.clone()));
                    }
                }
                Ok(None)
            }
            (Index::Cached(_), None) => Ok(None),
        }
    }

    /// Read a listed company from the cache, reseeding the cache from the
    /// source when the backend no longer holds the record.
    async fn cached_record(&self, cache: &C, key: &str) -> Result<CompanyRecord, LoadError> {
        if let Some(record) = fetch_cached(cache, key).await? {
            return Ok(record);
        }

        warn!(company = key, "cached company expired or was evicted, reseeding");
        self.reseed(cache, key)
            .await
            .inspect_err(|err| error!(company = key, error = %err, "failed to reseed company cache"))
    }

    async fn reseed(&self, cache: &C, key: &str) -> Result<CompanyRecord, LoadError> {
        let dataset = self.parse().await?;
        seed(cache, &dataset).await?;

        // The source may have dropped a company the cached key list still names
        match dataset.get(key) {
            Some(record) => Ok(record.clone()),
            None => Err(CacheError::Missing {
                key: key.to_string(),
            }
            .into()),
        }
    }
}

async fn is_seeded<C: CacheBackend>(cache: &C) -> Result<bool, CacheError> {
    let flag = cache.get(&CacheKey::initialized()).await?;
    Ok(flag.is_some_and(|raw| serde_json::from_str::<bool>(&raw).unwrap_or(false)))
}

/// Write the key list, every record and finally the initialized flag.
async fn seed<C: CacheBackend>(cache: &C, dataset: &Dataset) -> Result<(), CacheError> {
    let keys: Vec<&str> = dataset.keys().collect();
    cache.set(CacheKey::key_list(), encode(&keys)?).await?;

    for (key, record) in dataset.iter() {
        cache.set(CacheKey::for_company(key), encode(record)?).await?;
    }

    // The flag goes last so a partially seeded cache is never trusted
    cache.set(CacheKey::initialized(), encode(&true)?).await?;

    info!(companies = dataset.len(), "seeded company cache");
    Ok(())
}

/// Read one company from the cache. `Ok(None)` means the entry is gone.
async fn fetch_cached<C: CacheBackend>(
    cache: &C,
    key: &str,
) -> Result<Option<CompanyRecord>, CacheError> {
    let result = match cache.get(&CacheKey::for_company(key)).await {
        Ok(Some(raw)) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CacheError::Corrupt {
                message: format!("record for company \"{key}\": {e}"),
            }),
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    };

    result.inspect_err(|err| error!(company = key, error = %err, "failed to read company from cache"))
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|e| CacheError::Corrupt {
        message: format!("failed to encode cache entry: {e}"),
    })
}
