use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://docs.voidlinux.org";
pub const DEFAULT_USER_AGENT: &str = "voiddocs/0.1 (+https://docs.voidlinux.org)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Handbook pages crawled on every build, relative to the base URL.
pub const HANDBOOK_PAGES: &[&str] = &[
    "/",
    "/installation/index.html",
    "/config/index.html",
    "/xbps/index.html",
    "/xbps/troubleshooting.html",
    "/config/services/index.html",
    "/config/services/user-services.html",
];

/// Manual pages folded into the corpus.
pub const MAN_PAGES: &[&str] = &["xbps-install", "xbps-query", "xbps-remove", "xbps-reconfigure", "sv", "runit", "chroot"];

#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub base_url: String,
    pub pages: Vec<String>,
    pub man_pages: Vec<String>,
    pub cache_dir: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pages: HANDBOOK_PAGES.iter().map(|s| s.to_string()).collect(),
            man_pages: MAN_PAGES.iter().map(|s| s.to_string()).collect(),
            cache_dir: default_cache_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// `$XDG_CACHE_HOME/voiddocs` or the platform equivalent, `./.cache/voiddocs` if unknown.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".cache")).join("voiddocs")
}
