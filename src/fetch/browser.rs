//! Scripted-rendering page fetcher.
//!
//! Loads the URL in a headless Chromium instance, waits for navigation (and
//! with it script execution), and reads back the rendered HTML. The browser
//! process is released on every exit path, including render failures and
//! timeout expiry; expiry is reported as a fetch failure, never a crash.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{fetch_err, PageFetcher};

/// Fetches pages by rendering them in a headless browser.
///
/// Launching a browser is a blocking, resource-heavy operation that can take
/// seconds; callers needing responsiveness should keep it off their critical
/// path.
pub struct BrowserFetcher {
    render_timeout: Duration,
}

impl BrowserFetcher {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            render_timeout: config.fetch_timeout,
        }
    }

    async fn render(browser: &Browser, url: &str) -> Result<String> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| fetch_err("opening page", e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| fetch_err("waiting for navigation", e))?;
        let html = page
            .content()
            .await
            .map_err(|e| fetch_err("reading rendered HTML", e))?;
        debug!(url, chars = html.len(), "browser.render.done");
        Ok(html)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!(url, "browser.fetch.start");

        let browser_config = BrowserConfig::builder()
            .new_headless_mode()
            .args(vec![
                "--disable-gpu",
                "--no-sandbox",
                "--disable-dev-shm-usage",
            ])
            .build()
            .map_err(|e| fetch_err("configuring headless browser", e))?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| fetch_err("launching headless browser", e))?;

        // Drain CDP events in the background until the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        // Render under a deadline, then release the browser no matter how
        // rendering went.
        let outcome = match timeout(self.render_timeout, Self::render(&browser, url)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Fetch(format!(
                "scripted rendering timed out after {:?} for {url}",
                self.render_timeout
            ))),
        };

        if let Err(err) = browser.close().await {
            warn!(url, error = %err, "browser.close_failed");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        let html = outcome?;
        info!(url, bytes = html.len(), "browser.fetch.done");
        Ok(html.into_bytes())
    }
}
