use crate::tokenizer::tokenize;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub type PassageId = u32;

/// Locator prefix for passages that come from local manual pages.
pub const MAN_SCHEME: &str = "man://";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub content: String,
    /// Page URL for crawled passages, `man://<name>` for manual pages.
    pub source: String,
}

impl Passage {
    pub fn new(title: impl Into<String>, content: impl Into<String>, source: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), source: source.into() }
    }

    pub fn is_man_page(&self) -> bool { self.source.starts_with(MAN_SCHEME) }
}

/// Passages plus their token sequences, positionally aligned.
///
/// Fields are private so the two vectors can only grow together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    passages: Vec<Passage>,
    tokens: Vec<Vec<String>>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    /// Reassemble a corpus from stored parts. Fails when the parts are misaligned.
    pub fn from_parts(passages: Vec<Passage>, tokens: Vec<Vec<String>>) -> Result<Self> {
        if passages.len() != tokens.len() {
            bail!("corpus misaligned: {} passages, {} token sequences", passages.len(), tokens.len());
        }
        Ok(Self { passages, tokens })
    }

    /// Tokenize and append a passage. Passages with blank content are dropped.
    pub fn push(&mut self, passage: Passage) -> bool {
        if passage.content.trim().is_empty() {
            return false;
        }
        let tokens = tokenize(&passage.content);
        self.passages.push(passage);
        self.tokens.push(tokens);
        true
    }

    pub fn extend<I: IntoIterator<Item = Passage>>(&mut self, passages: I) {
        for p in passages {
            self.push(p);
        }
    }

    pub fn len(&self) -> usize { self.passages.len() }

    pub fn is_empty(&self) -> bool { self.passages.is_empty() }

    pub fn passages(&self) -> &[Passage] { &self.passages }

    pub fn tokens(&self) -> &[Vec<String>] { &self.tokens }

    pub fn get(&self, id: PassageId) -> Option<&Passage> { self.passages.get(id as usize) }
}
