//! Company metadata lookup.
//!
//! Resolves a company key to its type, name and brand name from a static
//! JSON dataset, and finds companies by name or brand name. The dataset is
//! parsed once per loader and can be memoized in a pluggable cache backend.

pub mod cache;
pub mod company;
pub mod dataset;
pub mod loader;

pub use company::CompanyRecord;
pub use dataset::{DatasetSource, EmbeddedSource, FileSource, InlineSource};
pub use loader::{CompanyLoader, LoadError, LoaderConfig, LookupKind, NotFoundPolicy};
