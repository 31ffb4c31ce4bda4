/// Why a single page or manual entry was left out of the corpus.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("not an html page: {0}")]
    ContentType(String),
    #[error("page body too large: {0} bytes")]
    TooLarge(usize),
    #[error("page has no <main> region")]
    NoMainContent,
    #[error("lookup of {name} failed: {reason}")]
    Lookup { name: String, reason: String },
    #[error("lookup of {0} returned no text")]
    EmptyLookup(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
