use reqwest::Url;
use std::collections::HashMap;
use voiddocs_core::config::DocsConfig;
use voiddocs_crawler::{DocsCrawler, Fetcher, ReferenceLookup, SourceError};

struct StaticSite {
    pages: HashMap<String, &'static str>,
}

impl Fetcher for StaticSite {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, SourceError> {
        self.pages.get(url.as_str()).map(|html| html.as_bytes().to_vec()).ok_or(SourceError::Status(404))
    }
}

struct FakeMan;

impl ReferenceLookup for FakeMan {
    fn lookup(&self, name: &str) -> Result<String, SourceError> {
        match name {
            "sv" => Ok("SV(8)\n\nNAME\n  sv - control and manage services monitored by runsv".into()),
            "long" => Ok("x".repeat(5000)),
            _ => Err(SourceError::Lookup { name: name.into(), reason: "No manual entry".into() }),
        }
    }
}

const BASE: &str = "https://docs.example.org";

const SERVICES: &str = r#"<html><head><title>Services</title></head><body><main>
    <p>Void uses runit.</p>
    <h1>Managing Services</h1><p>Use sv to control services.</p>
    <h2>Enabling</h2><p>Link the service directory.</p><p>Then check sv status.</p>
</main></body></html>"#;

const XBPS: &str = r#"<html><head><title>XBPS</title></head><body><main>
    <p>The X Binary Package System.</p>
</main></body></html>"#;

const NO_MAIN: &str = "<html><body><p>nothing useful</p></body></html>";

fn config(pages: &[&str], man: &[&str]) -> DocsConfig {
    DocsConfig {
        base_url: format!("{BASE}/"),
        pages: pages.iter().map(|s| s.to_string()).collect(),
        man_pages: man.iter().map(|s| s.to_string()).collect(),
        ..DocsConfig::default()
    }
}

fn site() -> StaticSite {
    let mut pages = HashMap::new();
    pages.insert(format!("{BASE}/config/services/index.html"), SERVICES);
    pages.insert(format!("{BASE}/xbps/index.html"), XBPS);
    pages.insert(format!("{BASE}/broken.html"), NO_MAIN);
    StaticSite { pages }
}

#[test]
fn failing_sources_are_skipped() {
    let crawler = DocsCrawler::with_lookup(
        config(&["/config/services/index.html", "/missing.html", "/broken.html", "/xbps/index.html"], &["sv", "nonexistent"]),
        FakeMan,
    );
    let corpus = crawler.collect(&site());

    // 3 from services, 1 from xbps, 1 man page
    assert_eq!(corpus.len(), 5);
    let titles: Vec<&str> = corpus.passages().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Services", "Managing Services", "Enabling", "XBPS", "Man Page: sv"]);
    assert_eq!(corpus.passages()[2].content, "Link the service directory. Then check sv status.");
    assert_eq!(corpus.passages()[0].source, format!("{BASE}/config/services/index.html"));
    assert_eq!(corpus.passages()[4].source, "man://sv");
    assert_eq!(corpus.tokens()[4][0], "sv(8)");
}

#[test]
fn everything_failing_yields_empty_corpus() {
    let crawler = DocsCrawler::with_lookup(config(&["/missing.html"], &["nonexistent"]), FakeMan);
    assert!(crawler.collect(&site()).is_empty());
}

#[test]
fn man_content_is_capped() {
    let crawler = DocsCrawler::with_lookup(config(&[], &["long"]), FakeMan);
    let p = crawler.man_passage("long").unwrap();
    assert_eq!(p.content.chars().count(), 2000);
    assert_eq!(p.title, "Man Page: long");
    assert!(p.is_man_page());
}

#[test]
fn page_url_joins_base_and_path() {
    let crawler = DocsCrawler::with_lookup(config(&[], &[]), FakeMan);
    assert_eq!(crawler.page_url("/").unwrap().as_str(), "https://docs.example.org/");
    assert_eq!(crawler.page_url("/xbps/index.html").unwrap().as_str(), "https://docs.example.org/xbps/index.html");
}
