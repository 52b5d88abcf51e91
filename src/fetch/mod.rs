//! Page fetching: the capability trait, the site-key dispatcher, and the two
//! fetcher implementations.
//!
//! The dispatcher derives a site key from the URL, consults an injected
//! strategy table, and routes the request to either the plain HTTP fetcher or
//! the scripted-rendering fetcher. Selection happens once per request and
//! never affects extraction semantics — it only supplies the raw HTML bytes.

pub mod browser;
pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// A capability that turns a URL into raw HTML bytes.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Which fetcher handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Plain HTTP GET with a browser-like User-Agent.
    Http,
    /// Headless-browser rendering for JavaScript-heavy sites.
    Browser,
}

/// Derive the lowercase site key from a URL.
///
/// The key is the host's first label, or the second when the first is the
/// literal `www`. Returns `None` for URLs without a usable host.
#[must_use]
pub fn site_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let mut labels = host.split('.');
    let first = labels.next()?;
    let key = if first.eq_ignore_ascii_case("www") {
        labels.next()?
    } else {
        first
    };
    if key.is_empty() {
        return None;
    }
    Some(key.to_lowercase())
}

/// Site-key to fetch-strategy table with a documented default.
///
/// Unmapped sites (and URLs without a derivable site key) use the default
/// strategy, which is plain HTTP unless overridden.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    overrides: HashMap<String, FetchStrategy>,
    default: FetchStrategy,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            default: FetchStrategy::Http,
        }
    }
}

impl DispatchTable {
    #[must_use]
    pub fn new(default: FetchStrategy) -> Self {
        Self {
            overrides: HashMap::new(),
            default,
        }
    }

    /// Route one site key to a strategy.
    #[must_use]
    pub fn with_site(mut self, site: impl Into<String>, strategy: FetchStrategy) -> Self {
        self.overrides.insert(site.into().to_lowercase(), strategy);
        self
    }

    /// Build the table from configuration: every configured browser site maps
    /// to scripted rendering, everything else to plain HTTP.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut table = Self::default();
        for site in &config.browser_sites {
            table = table.with_site(site.clone(), FetchStrategy::Browser);
        }
        table
    }

    /// Strategy for a site key, or the default for `None`/unmapped keys.
    #[must_use]
    pub fn strategy_for(&self, site: Option<&str>) -> FetchStrategy {
        site.and_then(|s| self.overrides.get(s).copied())
            .unwrap_or(self.default)
    }
}

/// Routes each request to the fetcher its site is mapped to.
pub struct Dispatcher {
    table: DispatchTable,
    http: HttpFetcher,
    browser: BrowserFetcher,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            table: DispatchTable::from_config(config),
            http: HttpFetcher::new(config)?,
            browser: BrowserFetcher::new(config),
        })
    }

    /// Which strategy a URL would be routed to.
    #[must_use]
    pub fn strategy(&self, url: &str) -> FetchStrategy {
        let key = site_key(url);
        self.table.strategy_for(key.as_deref())
    }

    /// Fetch the page, returning the chosen strategy with the raw bytes.
    pub async fn fetch(&self, url: &str) -> Result<(FetchStrategy, Vec<u8>)> {
        let strategy = self.strategy(url);
        tracing::info!(url, ?strategy, "fetch.dispatch");
        let bytes = match strategy {
            FetchStrategy::Http => self.http.fetch(url).await?,
            FetchStrategy::Browser => self.browser.fetch(url).await?,
        };
        Ok((strategy, bytes))
    }
}

/// Map any error into the fetch taxonomy with context.
pub(crate) fn fetch_err(context: &str, err: impl std::fmt::Display) -> Error {
    Error::Fetch(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_key_strips_www() {
        assert_eq!(
            site_key("https://www.nytimes.com/section/world"),
            Some("nytimes".to_string())
        );
    }

    #[test]
    fn site_key_uses_first_label() {
        assert_eq!(site_key("https://example.com/a"), Some("example".to_string()));
        assert_eq!(
            site_key("https://news.example.co.uk/x"),
            Some("news".to_string())
        );
    }

    #[test]
    fn site_key_lowercases() {
        assert_eq!(site_key("https://WWW.NYTimes.com"), Some("nytimes".to_string()));
    }

    #[test]
    fn site_key_rejects_hostless_urls() {
        assert_eq!(site_key("not a url"), None);
        assert_eq!(site_key("file:///tmp/x.html"), None);
    }

    #[test]
    fn table_default_is_http() {
        let table = DispatchTable::default();
        assert_eq!(table.strategy_for(Some("anything")), FetchStrategy::Http);
        assert_eq!(table.strategy_for(None), FetchStrategy::Http);
    }

    #[test]
    fn table_override_routes_to_browser() {
        let table = DispatchTable::default().with_site("nytimes", FetchStrategy::Browser);
        assert_eq!(table.strategy_for(Some("nytimes")), FetchStrategy::Browser);
        assert_eq!(table.strategy_for(Some("example")), FetchStrategy::Http);
    }

    #[test]
    fn config_builds_table_from_browser_sites() {
        let config = Config::default();
        let table = DispatchTable::from_config(&config);
        assert_eq!(table.strategy_for(Some("nytimes")), FetchStrategy::Browser);
        assert_eq!(table.strategy_for(Some("example")), FetchStrategy::Http);
    }
}
