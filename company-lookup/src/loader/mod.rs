//! Company lookup by key, name and brand name.
//!
//! [`CompanyLoader`] answers four questions against the dataset:
//! - does a key exist (`has`)
//! - which record belongs to a key (`load`)
//! - which record has a given name (`load_by_name`)
//! - which record has a given brand name (`load_by_brand_name`)
//!
//! Reverse lookups scan the dataset in source order and return the first
//! exact match.

mod config;
mod error;
mod service;


pub use config::{LoaderConfig, NotFoundPolicy, UNKNOWN_COMPANY};
pub use error::{LoadError, LookupKind};
pub use service::CompanyLoader;
