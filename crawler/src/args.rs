use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use voiddocs_core::config::{DocsConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Flags shared by every binary that builds or reads the handbook index.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding search_index.bin (defaults to the user cache dir)
    #[arg(long, global = true, env = "VOIDDOCS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
    /// Documentation site the handbook pages are fetched from
    #[arg(long, global = true, env = "VOIDDOCS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Per-request timeout seconds
    #[arg(long, global = true, env = "VOIDDOCS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    /// User-Agent sent with every page request
    #[arg(long, global = true, env = "VOIDDOCS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl SourceArgs {
    pub fn into_config(self) -> DocsConfig {
        let defaults = DocsConfig::default();
        DocsConfig {
            base_url: self.base_url,
            cache_dir: self.cache_dir.unwrap_or(defaults.cache_dir),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent,
            ..defaults
        }
    }
}
