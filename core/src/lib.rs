//! Documentation retrieval core: passages, chunking, BM25 ranking, and the on-disk index.

pub mod bm25;
pub mod chunk;
pub mod config;
pub mod engine;
pub mod index;
pub mod persist;
pub mod tokenizer;

pub use engine::{CorpusSource, Hit, SearchEngine};
pub use index::{Corpus, Passage, PassageId, MAN_SCHEME};
