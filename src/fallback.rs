//! Fallback text walker.
//!
//! When the structured pass yields nothing, the whole document is walked
//! instead: every element node in document order, and under each element
//! every descendant text node, keyed by the enclosing element's tag plus the
//! text node's position among *all* of that element's descendants.
//!
//! The key scheme is deliberately lossy: two elements sharing a tag name and
//! a descendant index collide, and the later entry overwrites the earlier one
//! (last write wins). This is a documented, deterministic property of the
//! fallback path, not an error. A text node also surfaces once per ancestor
//! element, so the same fragment can appear under several keys.

use dom_query::Document;

use crate::dom;
use crate::result::Extraction;
use crate::trace::{Trace, TraceLevel};

/// How many extracted items get an individual trace entry before the
/// per-item log is cut off.
const TRACE_ITEM_LIMIT: usize = 5;

/// Preview length for per-item trace messages.
const TRACE_PREVIEW_CHARS: usize = 50;

/// Walk every element's descendant text nodes into a fresh extraction.
///
/// Returns the complete replacement result; fallback keys are never mixed
/// with structured ones.
#[must_use]
pub fn walk_text_nodes(doc: &Document, trace: &mut Trace) -> Extraction {
    let mut extraction = Extraction::new();
    let mut extracted = 0usize;

    for element in dom::document_elements(doc) {
        let Some(tag) = dom::node_tag_name(&element) else {
            continue;
        };
        for (index, child) in element.descendants().into_iter().enumerate() {
            if !child.is_text() {
                continue;
            }
            let text = child.text().trim().to_string();
            if text.is_empty() {
                continue;
            }

            extraction.append_full_text(&format!("{text}\n"));
            extraction.insert(format!("{tag}_{index}"), text.clone());
            extracted += 1;

            // Only the first few items get logged to bound trace volume.
            if extracted <= TRACE_ITEM_LIMIT {
                let preview: String = text.chars().take(TRACE_PREVIEW_CHARS).collect();
                trace.info(format!("Extracted text from {tag}: {preview}..."));
            }
        }
    }

    trace.count(
        extracted,
        TraceLevel::Error,
        format!("Fallback method extracted {extracted} text elements"),
    );

    extraction
}
