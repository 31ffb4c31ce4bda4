//! Heading-driven segmentation of a page into passages.
//!
//! A page arrives as an ordered stream of [`Element`]s. The [`Chunker`] keeps the
//! current title and the paragraph texts accumulated under it; a heading closes
//! the open section and starts a new one, and [`Chunker::finish`] flushes the last.

use crate::index::Passage;

/// One structural element of a page's main content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Heading { level: u8, text: String },
    Paragraph(String),
}

/// Headings deeper than this are not section boundaries.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Title and element stream extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutline {
    pub title: Option<String>,
    pub elements: Vec<Element>,
}

#[derive(Debug)]
pub struct Chunker {
    source: String,
    title: String,
    pending: Vec<String>,
}

impl Chunker {
    /// Start a page. `title` is used for paragraphs that precede the first heading.
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self { source: source.into(), title: title.into(), pending: Vec::new() }
    }

    /// Feed one element; returns the passage closed by a heading, if any.
    pub fn feed(&mut self, element: Element) -> Option<Passage> {
        match element {
            Element::Heading { level, text } if (1..=MAX_HEADING_LEVEL).contains(&level) => {
                let closed = self.flush();
                self.title = text.trim().to_string();
                closed
            }
            Element::Heading { .. } => None,
            Element::Paragraph(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.pending.push(text.to_string());
                }
                None
            }
        }
    }

    /// End of page: emit whatever is still accumulated.
    pub fn finish(mut self) -> Option<Passage> { self.flush() }

    fn flush(&mut self) -> Option<Passage> {
        if self.pending.is_empty() {
            return None;
        }
        let content = self.pending.join(" ");
        self.pending.clear();
        Some(Passage::new(self.title.clone(), content, self.source.clone()))
    }
}

/// Segment a whole page. `fallback_title` is used when the outline carries no title.
pub fn chunk_page(source: &str, outline: PageOutline, fallback_title: &str) -> Vec<Passage> {
    let title = outline.title.unwrap_or_else(|| fallback_title.to_string());
    let mut chunker = Chunker::new(source, title);
    let mut out: Vec<Passage> = outline.elements.into_iter().filter_map(|el| chunker.feed(el)).collect();
    out.extend(chunker.finish());
    out
}
