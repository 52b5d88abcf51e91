//! Error types for article-glean.
//!
//! Each boundary of the pipeline (fetch, parse, persist, summarize) returns
//! an explicit variant so callers branch on the tag instead of catching
//! everything. Extraction itself never fails: an unusable input produces an
//! empty result plus an ERROR-level trace entry, not an `Err`.

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page fetch failed: non-200 status, network failure, or a
    /// browser-automation failure during scripted rendering.
    #[error("page fetch failed: {0}")]
    Fetch(String),

    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// A fragment could not be written to the relational store.
    #[error("fragment persistence failed: {0}")]
    Persistence(String),

    /// The summarization service call failed.
    #[error("summarization failed: {0}")]
    Summarize(String),

    /// The JSON snapshot could not be serialized or written.
    #[error("snapshot write failed: {0}")]
    Snapshot(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
