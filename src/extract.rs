//! Structured extraction and the extraction orchestrator.
//!
//! The structured extractor walks each located container pulling headings,
//! paragraphs, and list items into uniquely-keyed entries while accumulating
//! the `full_text` rendition. The orchestrator owns the trace lifecycle,
//! checks for emptiness, and hands the document to the fallback text walker
//! when the structured pass found nothing.
//!
//! Ordering contract: entries are emitted, and `full_text` is built, strictly
//! container by container, and within a container headings first, then
//! paragraphs, then lists. Positional indices count every found node, even
//! ones whose trimmed text is empty and which therefore emit no entry, so
//! indices in keys may skip — that skip is part of the key scheme.

use dom_query::{Document, Selection};

use crate::dom;
use crate::fallback;
use crate::result::Extraction;
use crate::selector;
use crate::trace::{Trace, TraceLevel};

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Everything one extraction call produces: the mapping and its trace.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub extraction: Extraction,
    pub trace: Trace,
}

/// Run the full extraction over a parsed document.
///
/// Owns the trace lifecycle: a fresh trace is created at entry, appended to
/// throughout, and returned with the result. Never fails — a document with
/// nothing extractable yields a result holding only an empty `full_text`.
#[must_use]
pub fn extract_document(doc: &Document) -> ExtractionOutcome {
    let mut trace = Trace::new();
    trace.info("Starting HTML content extraction");

    let containers = selector::locate_containers(doc, &mut trace);

    let mut extraction = Extraction::new();
    extract_structured(&containers, &mut extraction, &mut trace);

    if !extraction.has_content() {
        trace.warning(
            "No structured content found, falling back to extracting text from all elements",
        );
        extraction = fallback::walk_text_nodes(doc, &mut trace);
    }

    trace.count(
        extraction.len(),
        TraceLevel::Error,
        format!("Final result contains {} elements", extraction.len()),
    );

    ExtractionOutcome { extraction, trace }
}

/// Extract headings, paragraphs, and list items from each container into
/// deterministically keyed entries.
fn extract_structured(containers: &[Selection], extraction: &mut Extraction, trace: &mut Trace) {
    let mut total_headings = 0usize;
    let mut total_paragraphs = 0usize;
    let mut total_list_items = 0usize;

    for (container_idx, container) in containers.iter().enumerate() {
        trace.info(format!(
            "Processing container {}/{}",
            container_idx + 1,
            containers.len()
        ));

        // Headings, levels 1-6, subtree-wide
        let headings = dom::elements_by_tags(container, HEADING_TAGS);
        trace.count(
            headings.len(),
            TraceLevel::Info,
            format!(
                "Found {} headings in container {}",
                headings.len(),
                container_idx + 1
            ),
        );
        for (heading_idx, heading) in headings.iter().enumerate() {
            let text = dom::trimmed_text(heading);
            if text.is_empty() {
                continue;
            }
            let tag = dom::tag_name(heading).unwrap_or_default();
            extraction.insert(
                format!("heading_{tag}_{container_idx}_{heading_idx}"),
                text.clone(),
            );
            extraction.append_full_text(&format!("{text}\n\n"));
            total_headings += 1;
        }

        // Paragraphs
        let paragraphs = dom::elements_by_tags(container, &["p"]);
        trace.count(
            paragraphs.len(),
            TraceLevel::Info,
            format!(
                "Found {} paragraphs in container {}",
                paragraphs.len(),
                container_idx + 1
            ),
        );
        for (paragraph_idx, paragraph) in paragraphs.iter().enumerate() {
            let text = dom::trimmed_text(paragraph);
            if text.is_empty() {
                continue;
            }
            extraction.insert(format!("paragraph_{container_idx}_{paragraph_idx}"), text.clone());
            extraction.append_full_text(&format!("{text}\n\n"));
            total_paragraphs += 1;
        }

        // Ordered and unordered lists; items are bulleted in full_text and
        // each list with items gets one separating newline afterwards.
        let lists = dom::elements_by_tags(container, LIST_TAGS);
        trace.count(
            lists.len(),
            TraceLevel::Info,
            format!(
                "Found {} list elements in container {}",
                lists.len(),
                container_idx + 1
            ),
        );
        for (list_idx, list) in lists.iter().enumerate() {
            let list_tag = dom::tag_name(list).unwrap_or_default();
            let items = dom::elements_by_tags(list, &["li"]);
            trace.count(
                items.len(),
                TraceLevel::Info,
                format!("Found {} list items in list {}", items.len(), list_idx + 1),
            );
            for (item_idx, item) in items.iter().enumerate() {
                let text = dom::trimmed_text(item);
                if text.is_empty() {
                    continue;
                }
                extraction.insert(
                    format!("list_{list_tag}_{container_idx}_{list_idx}_{item_idx}"),
                    text.clone(),
                );
                extraction.append_full_text(&format!("\u{2022} {text}\n"));
                total_list_items += 1;
            }
            if !items.is_empty() {
                extraction.append_full_text("\n");
            }
        }
    }

    trace.count(
        total_headings + total_paragraphs + total_list_items,
        TraceLevel::Warning,
        format!(
            "Extracted content summary: {total_headings} headings, {total_paragraphs} paragraphs, {total_list_items} list items"
        ),
    );
}
