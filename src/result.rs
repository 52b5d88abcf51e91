//! Extraction result types.
//!
//! An [`Extraction`] is an insertion-ordered mapping from deterministic keys
//! to trimmed text fragments, plus the reserved `full_text` key holding the
//! concatenated narrative rendition. The mapping is produced fresh per
//! extraction call and never mutated after return.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};

/// Reserved key holding the concatenated narrative text.
pub const FULL_TEXT_KEY: &str = "full_text";

/// Insertion-ordered mapping of extracted fragments.
///
/// Keys are unique within one result on the structured path (positional
/// indices guarantee it); the fallback path's key scheme is deliberately
/// lossy, with later entries overwriting earlier ones that share a key.
/// JSON serialization preserves insertion order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Extraction {
    entries: IndexMap<String, String>,
}

impl Extraction {
    /// Create a result with the `full_text` key pre-seeded to the empty
    /// string, as every non-trivial extraction carries it.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(FULL_TEXT_KEY.to_string(), String::new());
        Self { entries }
    }

    /// A result with no keys at all, returned when the pipeline had no
    /// parseable input to extract from.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing entry under the same key is overwritten
    /// in place (last write wins), keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Append a fragment to the `full_text` rendition.
    pub fn append_full_text(&mut self, fragment: &str) {
        self.entries
            .entry(FULL_TEXT_KEY.to_string())
            .or_default()
            .push_str(fragment);
    }

    /// The concatenated narrative text, empty if nothing was appended.
    #[must_use]
    pub fn full_text(&self) -> &str {
        self.entries
            .get(FULL_TEXT_KEY)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Total number of keys, the reserved `full_text` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of content entries, excluding the reserved `full_text` key.
    #[must_use]
    pub fn content_entry_count(&self) -> usize {
        self.entries.keys().filter(|k| *k != FULL_TEXT_KEY).count()
    }

    /// Whether the structured path produced anything beyond `full_text`.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content_entry_count() > 0
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the mapping to pretty JSON, insertion order preserved.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Snapshot(e.to_string()))
    }

    /// Write the JSON snapshot to `path` for later inspection.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| {
            Error::Snapshot(format!("writing {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_seeds_full_text_first() {
        let extraction = Extraction::new();
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.full_text(), "");
        assert_eq!(extraction.iter().next(), Some((FULL_TEXT_KEY, "")));
    }

    #[test]
    fn empty_has_no_keys() {
        let extraction = Extraction::empty();
        assert!(extraction.is_empty());
        assert_eq!(extraction.full_text(), "");
    }

    #[test]
    fn content_count_excludes_full_text() {
        let mut extraction = Extraction::new();
        assert!(!extraction.has_content());

        extraction.insert("paragraph_0_0", "hello");
        assert_eq!(extraction.content_entry_count(), 1);
        assert_eq!(extraction.len(), 2);
        assert!(extraction.has_content());
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut extraction = Extraction::new();
        extraction.insert("span_0", "first");
        extraction.insert("p_1", "middle");
        extraction.insert("span_0", "second");

        assert_eq!(extraction.get("span_0"), Some("second"));
        let keys: Vec<&str> = extraction.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![FULL_TEXT_KEY, "span_0", "p_1"]);
    }

    #[test]
    fn json_preserves_insertion_order() {
        let mut extraction = Extraction::new();
        extraction.insert("heading_h1_0_0", "Title");
        extraction.insert("paragraph_0_0", "Body");

        let json = extraction.to_json().unwrap();
        let full_text_pos = json.find(FULL_TEXT_KEY).unwrap();
        let heading_pos = json.find("heading_h1_0_0").unwrap();
        let paragraph_pos = json.find("paragraph_0_0").unwrap();
        assert!(full_text_pos < heading_pos);
        assert!(heading_pos < paragraph_pos);
    }
}
