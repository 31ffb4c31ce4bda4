//! Corpus builder for the Void Linux handbook: page fetch, HTML structure, manual pages.

pub mod args;
pub mod builder;
pub mod error;
pub mod fetch;
pub mod man;
pub mod parse;

pub use args::SourceArgs;
pub use builder::DocsCrawler;
pub use error::SourceError;
pub use fetch::{Fetcher, HttpFetcher};
pub use man::{ManPages, ReferenceLookup};
