use crate::error::SourceError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::man::{ManPages, ReferenceLookup};
use crate::parse::parse_page;
use reqwest::Url;
use voiddocs_core::chunk::chunk_page;
use voiddocs_core::config::DocsConfig;
use voiddocs_core::engine::truncate_chars;
use voiddocs_core::{Corpus, CorpusSource, Passage, MAN_SCHEME};

/// Manual pages are summarized by their opening characters.
pub const MAN_CONTENT_CHARS: usize = 2000;

/// Builds the handbook corpus from the configured pages and manual entries.
pub struct DocsCrawler<L = ManPages> {
    config: DocsConfig,
    lookup: L,
}

impl DocsCrawler<ManPages> {
    pub fn new(config: DocsConfig) -> Self { Self::with_lookup(config, ManPages) }
}

impl<L: ReferenceLookup> DocsCrawler<L> {
    pub fn with_lookup(config: DocsConfig, lookup: L) -> Self { Self { config, lookup } }

    pub fn page_url(&self, page: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.config.base_url.trim_end_matches('/'), page))
    }

    /// Fetch, parse and chunk one handbook page.
    pub fn crawl_page<F: Fetcher>(&self, fetcher: &F, url: &Url, page: &str) -> Result<Vec<Passage>, SourceError> {
        let bytes = fetcher.fetch(url)?;
        let outline = parse_page(&String::from_utf8_lossy(&bytes))?;
        Ok(chunk_page(url.as_str(), outline, page))
    }

    pub fn man_passage(&self, name: &str) -> Result<Passage, SourceError> {
        let text = self.lookup.lookup(name)?;
        Ok(Passage::new(
            format!("Man Page: {name}"),
            truncate_chars(&text, MAN_CONTENT_CHARS),
            format!("{MAN_SCHEME}{name}"),
        ))
    }

    /// Crawl every page with `fetcher`, then append manual pages. Failing sources are skipped.
    pub fn collect<F: Fetcher>(&self, fetcher: &F) -> Corpus {
        let mut corpus = Corpus::new();
        for page in &self.config.pages {
            let url = match self.page_url(page) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!(page = %page, error = %e, "skipping page with invalid url");
                    continue;
                }
            };
            tracing::info!(%url, "fetching");
            match self.crawl_page(fetcher, &url, page) {
                Ok(passages) => {
                    tracing::debug!(%url, passages = passages.len(), "chunked page");
                    corpus.extend(passages);
                }
                Err(e) => tracing::warn!(%url, error = %e, "skipping page"),
            }
        }
        self.collect_man_pages(&mut corpus);
        tracing::info!(passages = corpus.len(), "corpus built");
        corpus
    }

    fn collect_man_pages(&self, corpus: &mut Corpus) {
        for name in &self.config.man_pages {
            match self.man_passage(name) {
                Ok(p) => {
                    corpus.push(p);
                }
                Err(e) => tracing::warn!(page = %name, error = %e, "skipping man page"),
            }
        }
    }
}

impl<L: ReferenceLookup> CorpusSource for DocsCrawler<L> {
    fn build(&self) -> Corpus {
        match HttpFetcher::new(&self.config.user_agent, self.config.timeout) {
            Ok(fetcher) => self.collect(&fetcher),
            Err(e) => {
                tracing::error!(error = %e, "http client unavailable, indexing man pages only");
                let mut corpus = Corpus::new();
                self.collect_man_pages(&mut corpus);
                corpus
            }
        }
    }
}
