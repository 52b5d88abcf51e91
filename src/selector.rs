//! Container selectors and the container locator.
//!
//! The locator scans the whole document against an ordered list of typed
//! selectors for regions likely to hold the main article content. Candidates
//! accumulate in declared-selector order with no deduplication: a node
//! matching two selectors appears twice, and results from an earlier selector
//! always precede results from a later one. When nothing matches, the locator
//! falls back to the document body, then to the whole document.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::trace::{Trace, TraceLevel};

/// A typed container selector: a tag name plus an optional required class.
///
/// Built once from the static candidate list below; never re-parsed from
/// selector strings at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSelector {
    pub tag: &'static str,
    pub class: Option<&'static str>,
}

impl ContainerSelector {
    /// Selector matching a bare tag.
    #[must_use]
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag, class: None }
    }

    /// Selector matching a tag carrying a specific class token.
    #[must_use]
    pub const fn tag_with_class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class: Some(class),
        }
    }

    /// Test an element node against this selector.
    #[must_use]
    pub fn matches(&self, node: &NodeRef) -> bool {
        let Some(tag) = dom::node_tag_name(node) else {
            return false;
        };
        if !tag.eq_ignore_ascii_case(self.tag) {
            return false;
        }
        match self.class {
            Some(class) => dom::has_class_token(&Selection::from(*node), class),
            None => true,
        }
    }
}

/// Ordered candidate selectors for article containers.
///
/// Evaluated in declared order; the ordering is part of the extraction
/// contract because container indices feed into entry keys.
pub const CONTAINER_SELECTORS: &[ContainerSelector] = &[
    ContainerSelector::tag("article"),
    ContainerSelector::tag("main"),
    ContainerSelector::tag_with_class("div", "article"),
    ContainerSelector::tag_with_class("div", "content"),
    ContainerSelector::tag_with_class("div", "post"),
];

/// Locate candidate article containers in document order per selector.
///
/// Always returns at least one container: the body or, failing that, the
/// whole document stands in when no selector matched. Emits one trace entry
/// per selector attempted and a summary entry for the total.
pub fn locate_containers<'a>(doc: &'a Document, trace: &mut Trace) -> Vec<Selection<'a>> {
    trace.info("Looking for article containers...");

    let elements = dom::document_elements(doc);
    let mut containers: Vec<Selection<'a>> = Vec::new();

    for selector in CONTAINER_SELECTORS {
        let found: Vec<&NodeRef> = elements.iter().filter(|n| selector.matches(n)).collect();
        let message = match selector.class {
            Some(class) => format!(
                "Searching for {} with class {}: found {} elements",
                selector.tag,
                class,
                found.len()
            ),
            None => format!(
                "Searching for {} tag: found {} elements",
                selector.tag,
                found.len()
            ),
        };
        trace.count(found.len(), TraceLevel::Info, message);
        containers.extend(found.into_iter().map(|n| Selection::from(*n)));
    }

    trace.count(
        containers.len(),
        TraceLevel::Warning,
        format!("Total article containers found: {}", containers.len()),
    );

    if containers.is_empty() {
        trace.warning(
            "No specific article containers found, falling back to body or entire document",
        );
        if let Some(body) = dom::body(doc) {
            trace.info("Using body tag as container");
            containers.push(body);
        } else {
            trace.warning("No body tag found, using entire document");
            containers.push(dom::whole_document(doc));
        }
    }

    containers
}
