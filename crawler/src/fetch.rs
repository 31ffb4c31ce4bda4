use crate::error::SourceError;
use reqwest::blocking::Client;
use reqwest::{header, Url};
use std::time::Duration;

/// Pages larger than this are skipped.
pub const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

pub trait Fetcher {
    /// Raw body of a successfully fetched HTML page.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, SourceError>;
}

/// Blocking HTTP fetcher with a per-request timeout.
///
/// The underlying client owns a runtime of its own, so it must be created and
/// dropped outside any async context.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, SourceError> {
        let resp = self.client.get(url.clone()).send()?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }
        if let Some(ct) = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !ct.starts_with("text/html") {
                return Err(SourceError::ContentType(ct.to_string()));
            }
        }
        let bytes = resp.bytes()?;
        if bytes.len() > MAX_PAGE_BYTES {
            return Err(SourceError::TooLarge(bytes.len()));
        }
        Ok(bytes.to_vec())
    }
}
