use std::cell::{Cell, RefCell};
use tempfile::tempdir;
use voiddocs_core::engine::{CorpusSource, SearchEngine, EMPTY_INDEX_MESSAGE, SNIPPET_CHARS, TRUNCATION_MARKER};
use voiddocs_core::persist::IndexStore;
use voiddocs_core::{Corpus, Passage};

/// Hands out a canned corpus and counts how often it was asked.
struct Canned {
    passages: RefCell<Vec<Passage>>,
    builds: Cell<usize>,
}

impl Canned {
    fn new(passages: Vec<Passage>) -> Self { Self { passages: RefCell::new(passages), builds: Cell::new(0) } }
}

impl CorpusSource for &Canned {
    fn build(&self) -> Corpus {
        self.builds.set(self.builds.get() + 1);
        let mut corpus = Corpus::new();
        corpus.extend(self.passages.borrow().iter().cloned());
        corpus
    }
}

fn handbook() -> Vec<Passage> {
    vec![
        Passage::new("Services", "runit manages services on void linux", "https://docs.voidlinux.org/config/services/index.html"),
        Passage::new("XBPS", "xbps-install installs packages from the repository", "https://docs.voidlinux.org/xbps/index.html"),
        Passage::new("Man Page: sv", "sv controls runit services: sv up sv down sv status", "man://sv"),
        Passage::new("Installation", "download the live image and boot it", "https://docs.voidlinux.org/installation/index.html"),
        Passage::new("Chroot", "chroot into the installed system", "man://chroot"),
    ]
}

#[test]
fn first_query_builds_and_persists() {
    let dir = tempdir().unwrap();
    let source = Canned::new(handbook());
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    assert!(!engine.is_loaded());

    let results = engine.search("sv status", 3);
    assert_eq!(results.len(), 3);
    assert!(results[0].starts_with("### Man Page: sv\nSource: man://sv\n\n"));
    assert!(engine.is_loaded());
    assert_eq!(source.builds.get(), 1);
    assert!(dir.path().join("search_index.bin").exists());

    // repeated queries reuse the loaded state
    engine.search("xbps-install", 1);
    engine.search("chroot", 1);
    assert_eq!(source.builds.get(), 1);
}

#[test]
fn cached_index_is_reused_across_engines() {
    let dir = tempdir().unwrap();
    let first = Canned::new(handbook());
    SearchEngine::new(&first, IndexStore::new(dir.path())).rebuild();

    let second = Canned::new(vec![]);
    let mut engine = SearchEngine::new(&second, IndexStore::new(dir.path()));
    let hits = engine.query("packages", 1).unwrap();
    assert_eq!(hits[0].title, "XBPS");
    assert_eq!(second.builds.get(), 0);
}

#[test]
fn empty_build_returns_single_diagnostic() {
    let dir = tempdir().unwrap();
    let source = Canned::new(vec![]);
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    assert_eq!(engine.search("anything", 3), vec![EMPTY_INDEX_MESSAGE.to_string()]);
    assert!(!engine.is_loaded());
    assert!(!dir.path().join("search_index.bin").exists());

    // the next query retries the build
    engine.search("anything", 3);
    assert_eq!(source.builds.get(), 2);
}

#[test]
fn top_n_orders_by_score_then_corpus_order() {
    let dir = tempdir().unwrap();
    let source = Canned::new(vec![
        Passage::new("a", "alpha beta", "man://a"),
        Passage::new("b", "gamma delta", "man://b"),
        Passage::new("c", "gamma delta", "man://c"),
        Passage::new("d", "epsilon zeta", "man://d"),
        Passage::new("e", "gamma delta", "man://e"),
    ]);
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    let hits = engine.query("gamma", 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits.iter().map(|h| h.title.as_str()).collect::<Vec<_>>(), vec!["b", "c"]);
    assert!(hits[0].score >= hits[1].score);
    assert!(engine.query("gamma", 0).unwrap().is_empty());
}

#[test]
fn unknown_terms_fall_back_to_corpus_order() {
    let dir = tempdir().unwrap();
    let source = Canned::new(handbook());
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    let hits = engine.query("wayland", 3).unwrap();
    assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn rendered_content_is_truncated() {
    let dir = tempdir().unwrap();
    let long = "runit ".repeat(400);
    let source = Canned::new(vec![Passage::new("Long", long.clone(), "man://runit")]);
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    let block = engine.search("runit", 3).remove(0);
    let body = block.split("\n\n").nth(1).unwrap();
    assert!(body.ends_with(TRUNCATION_MARKER));
    assert_eq!(body.chars().count(), SNIPPET_CHARS + TRUNCATION_MARKER.len());
    assert_eq!(&body[..SNIPPET_CHARS], &long[..SNIPPET_CHARS]);
}

#[test]
fn rebuild_overwrites_state_and_disk() {
    let dir = tempdir().unwrap();
    let source = Canned::new(handbook());
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    assert_eq!(engine.rebuild(), 5);
    assert_eq!(engine.len(), 5);

    *source.passages.borrow_mut() = vec![Passage::new("New", "fresh content", "man://new")];
    assert_eq!(engine.rebuild(), 1);
    assert_eq!(engine.passage(0).unwrap().title, "New");
    assert_eq!(IndexStore::new(dir.path()).load().unwrap().len(), 1);
}

#[test]
fn empty_rebuild_clears_previous_index() {
    let dir = tempdir().unwrap();
    let source = Canned::new(vec![Passage::new("Old", "stale content", "man://old")]);
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    assert_eq!(engine.rebuild(), 1);

    source.passages.borrow_mut().clear();
    assert_eq!(engine.rebuild(), 0);
    assert!(!engine.is_loaded());
    assert_eq!(engine.len(), 0);
    assert!(engine.passage(0).is_none());
    assert!(IndexStore::new(dir.path()).load().unwrap().is_empty());

    assert_eq!(engine.search("stale", 3), vec![EMPTY_INDEX_MESSAGE.to_string()]);
    // the emptied cache counts as absent, so the query tried another build
    assert_eq!(source.builds.get(), 3);
}

#[test]
fn corrupt_cache_triggers_transparent_rebuild() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("search_index.bin"), b"garbage").unwrap();
    let source = Canned::new(handbook());
    let mut engine = SearchEngine::new(&source, IndexStore::new(dir.path()));
    assert!(engine.query("live image", 1).is_some());
    assert_eq!(source.builds.get(), 1);
    assert_eq!(IndexStore::new(dir.path()).load().unwrap().len(), 5);
}
