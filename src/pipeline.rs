//! End-to-end request pipeline.
//!
//! One request runs synchronously and sequentially: fetch → transcode →
//! parse → extract → (best-effort) persist/summarize/snapshot → report.
//! Every request gets a response: fetch and parse failures degrade to an
//! empty extraction with an ERROR-level trace entry, never a crash.

use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::dom;
use crate::encoding;
use crate::error::Result;
use crate::extract::{self, ExtractionOutcome};
use crate::fetch::{site_key, Dispatcher, FetchStrategy};
use crate::result::Extraction;
use crate::store::FragmentStore;
use crate::summarize::Summarizer;
use crate::trace::Trace;

/// Everything a caller gets back for one URL.
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub url: String,
    pub site_key: Option<String>,
    pub strategy: FetchStrategy,
    /// Total extracted keys, the reserved `full_text` included.
    pub entry_count: usize,
    /// One-line result description for the presentation layer.
    pub abstract_line: String,
    pub summary: Option<String>,
    /// How many fragments actually reached the store.
    pub stored_fragments: usize,
    pub trace: Trace,
}

impl PageReport {
    /// Human-viewable summary: counts first, then the rendered trace.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.abstract_line));
        out.push_str(&format!(
            "Number of elements extracted: {}\n",
            self.entry_count
        ));
        out.push_str(&format!("Fragments persisted: {}\n", self.stored_fragments));
        if let Some(summary) = &self.summary {
            out.push_str(&format!("Summary: {summary}\n"));
        }
        out.push('\n');
        out.push_str(&self.trace.render());
        out
    }
}

/// Wires the dispatcher, store, and summarizer around the extraction engine.
pub struct Pipeline {
    config: Config,
    dispatcher: Dispatcher,
    store: FragmentStore,
    summarizer: Option<Summarizer>,
}

impl Pipeline {
    pub async fn new(config: Config) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config)?;
        let store = FragmentStore::connect(&config.database_url).await?;
        let summarizer = Summarizer::from_config(&config);
        Ok(Self {
            config,
            dispatcher,
            store,
            summarizer,
        })
    }

    /// Process one URL end to end. Always returns a report.
    pub async fn process(&self, url: &str) -> PageReport {
        let key = site_key(url);
        let strategy = self.dispatcher.strategy(url);

        let outcome = match self.dispatcher.fetch(url).await {
            Ok((_, bytes)) => self.extract_bytes(&bytes),
            Err(err) => {
                let mut trace = Trace::new();
                trace.error(format!("Fetch failed: {err}"));
                ExtractionOutcome {
                    extraction: Extraction::empty(),
                    trace,
                }
            }
        };

        self.finish(url, key, strategy, outcome).await
    }

    fn extract_bytes(&self, bytes: &[u8]) -> ExtractionOutcome {
        let html = encoding::transcode_to_utf8(bytes);
        match dom::parse_document(&html) {
            Ok(doc) => extract::extract_document(&doc),
            Err(err) => {
                let mut trace = Trace::new();
                trace.error(format!("Parse failed: {err}"));
                ExtractionOutcome {
                    extraction: Extraction::empty(),
                    trace,
                }
            }
        }
    }

    async fn finish(
        &self,
        url: &str,
        key: Option<String>,
        strategy: FetchStrategy,
        mut outcome: ExtractionOutcome,
    ) -> PageReport {
        let extraction = &outcome.extraction;
        let entry_count = extraction.len();

        let stored_fragments = self.store.store_extraction(extraction).await;

        let summary = match (&self.summarizer, extraction.has_content()) {
            (Some(summarizer), true) => match summarizer.summarize(extraction.full_text()).await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    warn!(url, error = %err, "pipeline.summarize_failed");
                    outcome.trace.warning(format!("Summarization failed: {err}"));
                    None
                }
            },
            _ => None,
        };

        if let Err(err) = extraction.write_snapshot(Path::new(&self.config.snapshot_path)) {
            warn!(url, error = %err, "pipeline.snapshot_failed");
            outcome.trace.warning(format!("Snapshot write failed: {err}"));
        }

        let abstract_line = if entry_count > 0 {
            format!("Parsed {url}")
        } else {
            format!("No results found for {url}")
        };

        info!(url, entry_count, stored_fragments, "pipeline.done");
        PageReport {
            url: url.to_string(),
            site_key: key,
            strategy,
            entry_count,
            abstract_line,
            summary,
            stored_fragments,
            trace: outcome.trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceLevel;

    fn report_for(outcome: ExtractionOutcome) -> PageReport {
        PageReport {
            url: "https://example.com".to_string(),
            site_key: Some("example".to_string()),
            strategy: FetchStrategy::Http,
            entry_count: outcome.extraction.len(),
            abstract_line: if outcome.extraction.is_empty() {
                "No results found for https://example.com".to_string()
            } else {
                "Parsed https://example.com".to_string()
            },
            summary: None,
            stored_fragments: 0,
            trace: outcome.trace,
        }
    }

    #[test]
    fn report_renders_counts_and_trace() {
        let mut trace = Trace::new();
        trace.error("Fetch failed: HTTP status 404");
        let report = report_for(ExtractionOutcome {
            extraction: Extraction::empty(),
            trace,
        });

        let text = report.render_text();
        assert!(text.contains("No results found"));
        assert!(text.contains("Number of elements extracted: 0"));
        assert!(text.contains("[ERROR]"));
    }

    #[test]
    fn report_serializes_with_trace() {
        let mut trace = Trace::new();
        trace.record(TraceLevel::Success, "ok");
        let report = report_for(ExtractionOutcome {
            extraction: Extraction::new(),
            trace,
        });

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""strategy":"http""#));
        assert!(json.contains(r#""level":"SUCCESS""#));
    }
}
