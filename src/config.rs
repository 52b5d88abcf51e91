//! Runtime configuration.
//!
//! Environment-driven with documented defaults; every knob has a sensible
//! value out of the box so the pipeline runs with zero setup.

use std::time::Duration;

/// Browser-like User-Agent sent with plain HTTP fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout for a single page fetch, HTTP or scripted.
    pub fetch_timeout: Duration,
    /// User-Agent header for plain HTTP fetches.
    pub user_agent: String,
    /// SQLite connection string for the fragment store.
    pub database_url: String,
    /// Where the JSON snapshot of each extraction is written.
    pub snapshot_path: String,
    /// Site keys routed to the scripted-rendering fetcher; every other site
    /// uses plain HTTP.
    pub browser_sites: Vec<String>,
    /// API key for the summarization service; summarization is skipped when
    /// unset.
    pub summary_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible summarization endpoint.
    pub summary_api_base: String,
    /// Model name used for summarization.
    pub summary_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            database_url: "sqlite:fragments.db?mode=rwc".to_string(),
            snapshot_path: "output.json".to_string(),
            browser_sites: vec!["nytimes".to_string()],
            summary_api_key: None,
            summary_api_base: "https://api.openai.com/v1".to_string(),
            summary_model: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from environment variables, falling back to the
    /// defaults above for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            fetch_timeout: std::env::var("GLEAN_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(default.fetch_timeout, Duration::from_secs),
            user_agent: std::env::var("GLEAN_USER_AGENT").unwrap_or(default.user_agent),
            database_url: std::env::var("GLEAN_DATABASE_URL").unwrap_or(default.database_url),
            snapshot_path: std::env::var("GLEAN_SNAPSHOT_PATH").unwrap_or(default.snapshot_path),
            browser_sites: std::env::var("GLEAN_BROWSER_SITES")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_lowercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.browser_sites),
            summary_api_key: std::env::var("GLEAN_SUMMARY_API_KEY").ok(),
            summary_api_base: std::env::var("GLEAN_SUMMARY_API_BASE")
                .unwrap_or(default.summary_api_base),
            summary_model: std::env::var("GLEAN_SUMMARY_MODEL").unwrap_or(default.summary_model),
        }
    }
}
