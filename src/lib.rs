//! # article-glean
//!
//! Extracts human-readable article content (headings, paragraphs, list items)
//! from web pages into a flat, deterministically keyed mapping, with an
//! auditable debug trace of every heuristic decision.
//!
//! The extraction engine locates candidate article containers with an ordered
//! selector list, pulls structured content out of each one, and falls back to
//! a whole-document text walk when the structured pass finds nothing. Around
//! the engine sit pluggable collaborators: a plain-HTTP and a
//! headless-browser page fetcher selected per site, a SQLite fragment store,
//! and an optional summarization call.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_glean::extract;
//!
//! let html = "<html><body><article><h1>Title</h1>\
//!             <p>Hello world</p></article></body></html>";
//!
//! let outcome = extract(html);
//! assert_eq!(outcome.extraction.get("heading_h1_0_0"), Some("Title"));
//! assert_eq!(outcome.extraction.full_text(), "Title\n\nHello world\n\n");
//! // Every heuristic decision is on the trace:
//! assert!(!outcome.trace.is_empty());
//! ```
//!
//! Extraction is deterministic: identical HTML input produces an identical
//! key set, values, and `full_text`, in identical order.

mod config;
mod error;
mod pipeline;
mod result;
mod summarize;
mod trace;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Structured extraction and the extraction orchestrator.
pub mod extract;

/// Whole-document fallback text walker.
pub mod fallback;

/// Page fetching: capability trait, dispatch, HTTP and browser fetchers.
pub mod fetch;

/// Typed container selectors and the container locator.
pub mod selector;

/// SQLite-backed fragment persistence.
pub mod store;

// Public API - re-exports
pub use config::{Config, DEFAULT_USER_AGENT};
pub use error::{Error, Result};
pub use extract::{extract_document, ExtractionOutcome};
pub use fetch::{site_key, DispatchTable, Dispatcher, FetchStrategy, PageFetcher};
pub use pipeline::{PageReport, Pipeline};
pub use result::{Extraction, FULL_TEXT_KEY};
pub use summarize::Summarizer;
pub use trace::{Trace, TraceEntry, TraceLevel};

/// Extract article content from an HTML string.
///
/// Never fails: unusable input yields an empty result and an ERROR-level
/// trace entry. The trace is created fresh for this call and returned with
/// the mapping.
#[must_use]
pub fn extract(html: &str) -> ExtractionOutcome {
    match dom::parse_document(html) {
        Ok(doc) => extract_document(&doc),
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

/// Extract article content from raw HTML bytes.
///
/// Sniffs the declared charset and transcodes to UTF-8 before parsing.
#[must_use]
pub fn extract_bytes(html: &[u8]) -> ExtractionOutcome {
    let html_str = encoding::transcode_to_utf8(html);
    extract(&html_str)
}
