//! Search engine lifecycle: load the cached index or build a fresh corpus, then rank.
//!
//! The engine starts `Unloaded`. The first query (or an explicit [`SearchEngine::warm`])
//! loads the index from the [`IndexStore`]; on a miss it asks its [`CorpusSource`] for a
//! new corpus and persists it. Once `Loaded`, queries reuse the ranking statistics
//! until [`SearchEngine::rebuild`] replaces them.

use crate::bm25::{Bm25, Bm25Params};
use crate::persist::IndexStore;
use crate::tokenizer::tokenize;
use crate::{Corpus, Passage, PassageId};
use serde::Serialize;

pub const DEFAULT_TOP_N: usize = 3;
pub const SNIPPET_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";
pub const EMPTY_INDEX_MESSAGE: &str = "Failed to build documentation index.";

/// Produces a fresh corpus. Implementations skip failing sources rather than erroring.
pub trait CorpusSource {
    fn build(&self) -> Corpus;
}

impl<T: CorpusSource + ?Sized> CorpusSource for Box<T> {
    fn build(&self) -> Corpus { (**self).build() }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub id: PassageId,
    pub score: f32,
    pub title: String,
    pub source: String,
    pub snippet: String,
}

impl Hit {
    /// Markdown block handed back to tool callers.
    pub fn render(&self) -> String {
        format!("### {}\nSource: {}\n\n{}{}", self.title, self.source, self.snippet, TRUNCATION_MARKER)
    }
}

/// First `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

enum State {
    Unloaded,
    Loaded { corpus: Corpus, ranker: Bm25 },
}

pub struct SearchEngine<S> {
    source: S,
    store: IndexStore,
    params: Bm25Params,
    state: State,
}

impl<S: CorpusSource> SearchEngine<S> {
    pub fn new(source: S, store: IndexStore) -> Self {
        Self { source, store, params: Bm25Params::default(), state: State::Unloaded }
    }

    pub fn is_loaded(&self) -> bool { matches!(self.state, State::Loaded { .. }) }

    /// Number of passages in the loaded corpus, 0 while unloaded.
    pub fn len(&self) -> usize {
        match &self.state {
            State::Loaded { corpus, .. } => corpus.len(),
            State::Unloaded => 0,
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn passage(&self, id: PassageId) -> Option<&Passage> {
        match &self.state {
            State::Loaded { corpus, .. } => corpus.get(id),
            State::Unloaded => None,
        }
    }

    /// Load from disk or build. Returns whether a non-empty corpus is now in memory.
    pub fn warm(&mut self) -> bool {
        if self.is_loaded() {
            return true;
        }
        match self.store.load() {
            Some(corpus) if !corpus.is_empty() => {
                self.install(corpus);
                return true;
            }
            Some(_) => tracing::warn!("cached index is empty, rebuilding"),
            None => tracing::info!("no usable cached index, building"),
        }
        let corpus = self.source.build();
        if corpus.is_empty() {
            tracing::warn!("corpus build produced no passages");
            return false;
        }
        self.store.save(&corpus);
        self.install(corpus);
        true
    }

    /// Rebuild unconditionally, overwriting the cached index and the in-memory state.
    ///
    /// An empty build is persisted too and leaves the engine `Unloaded`, so later
    /// queries report the empty index instead of serving the previous generation.
    pub fn rebuild(&mut self) -> usize {
        let corpus = self.source.build();
        let count = corpus.len();
        self.store.save(&corpus);
        if count == 0 {
            tracing::warn!("rebuild produced no passages, index cleared");
            self.state = State::Unloaded;
            return 0;
        }
        self.install(corpus);
        tracing::info!(passages = count, "index rebuilt");
        count
    }

    /// Ranked hits for a query, `None` when no corpus could be loaded or built.
    pub fn query(&mut self, text: &str, n: usize) -> Option<Vec<Hit>> {
        if !self.warm() {
            return None;
        }
        let State::Loaded { corpus, ranker } = &self.state else {
            return None;
        };
        let terms = tokenize(text);
        let hits = ranker
            .top_n(&terms, n)
            .into_iter()
            .filter_map(|(doc, score)| {
                let id = doc as PassageId;
                corpus.get(id).map(|p| Hit {
                    id,
                    score,
                    title: p.title.clone(),
                    source: p.source.clone(),
                    snippet: truncate_chars(&p.content, SNIPPET_CHARS).to_string(),
                })
            })
            .collect();
        Some(hits)
    }

    /// Formatted result blocks. Never fails: an unusable index yields one diagnostic.
    pub fn search(&mut self, text: &str, n: usize) -> Vec<String> {
        match self.query(text, n) {
            Some(hits) => hits.iter().map(Hit::render).collect(),
            None => vec![EMPTY_INDEX_MESSAGE.to_string()],
        }
    }

    fn install(&mut self, corpus: Corpus) {
        let ranker = Bm25::new(corpus.tokens(), self.params);
        self.state = State::Loaded { corpus, ranker };
    }
}
