//! The static company dataset.
//!
//! The source is a JSON object whose top-level keys are company keys and
//! whose values hold nullable `name` and `brandname` fields:
//!
//! ```json
//! { "Google": { "name": "Google Inc.", "brandname": "Google" } }
//! ```
//!
//! A legacy layout also repeats the key as a `type` field inside each value.
//! Both layouts are accepted; an explicit non-empty `type` wins over the key.

mod error;
mod parse;
mod source;

pub use error::{ParseError, SourceError};
pub use parse::Dataset;
pub use source::{DatasetSource, EmbeddedSource, FileSource, InlineSource};
