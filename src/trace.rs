//! Request-scoped extraction trace.
//!
//! Every extraction call builds its own [`Trace`]: an append-only list of
//! timestamped, leveled events describing what the heuristics saw. The trace
//! is created empty at the start of a call, appended to during it, and handed
//! back to the caller alongside the result. It is never shared between
//! requests, so concurrent extractions cannot interleave entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Severity of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    Info,
    Warning,
    Success,
    Error,
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraceLevel::Info => "INFO",
            TraceLevel::Warning => "WARNING",
            TraceLevel::Success => "SUCCESS",
            TraceLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One diagnostic event recorded during extraction.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub timestamp: DateTime<Utc>,
    pub level: TraceLevel,
    pub message: String,
}

/// Append-only log of extraction-time diagnostic events.
///
/// Entries are kept in emission order and are never edited or removed within
/// one extraction call.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the given level.
    ///
    /// Also mirrors the event onto the `tracing` subscriber at debug level
    /// for operational log correlation.
    pub fn record(&mut self, level: TraceLevel, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(level = %level, "{message}");
        self.entries.push(TraceEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(TraceLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.record(TraceLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.record(TraceLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(TraceLevel::Error, message);
    }

    /// Record a count-style entry: SUCCESS when `count > 0`, otherwise `fallback`.
    ///
    /// The locator and extractor report every probe this way, so a zero count
    /// is still visible in the trace at a softer level.
    pub fn count(&mut self, count: usize, fallback: TraceLevel, message: impl Into<String>) {
        let level = if count > 0 {
            TraceLevel::Success
        } else {
            fallback
        };
        self.record(level, message);
    }

    /// All entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the trace as a human-readable report.
    ///
    /// One line per entry, prefixed with the level. The structured form is
    /// available through `serde` serialization instead.
    #[must_use]
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "No debug trace recorded\n".to_string();
        }
        let mut out = String::from("Debug trace:\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "  [{}] {} {}\n",
                entry.level,
                entry.timestamp.format("%H:%M:%S%.3f"),
                entry.message
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_emission_order() {
        let mut trace = Trace::new();
        trace.info("first");
        trace.warning("second");
        trace.success("third");

        let messages: Vec<&str> = trace.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn count_picks_success_or_fallback() {
        let mut trace = Trace::new();
        trace.count(3, TraceLevel::Info, "found 3");
        trace.count(0, TraceLevel::Warning, "found 0");

        assert_eq!(trace.entries()[0].level, TraceLevel::Success);
        assert_eq!(trace.entries()[1].level, TraceLevel::Warning);
    }

    #[test]
    fn render_includes_levels_and_messages() {
        let mut trace = Trace::new();
        trace.error("boom");

        let rendered = trace.render();
        assert!(rendered.contains("[ERROR]"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn empty_trace_renders_placeholder() {
        let trace = Trace::new();
        assert_eq!(trace.render(), "No debug trace recorded\n");
    }

    #[test]
    fn serializes_levels_uppercase() {
        let mut trace = Trace::new();
        trace.success("done");

        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains(r#""level":"SUCCESS""#));
    }
}
