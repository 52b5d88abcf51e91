//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate providing the handful of
//! operations the extraction engine needs: parsing, tag inspection, trimmed
//! text, and deterministic document-order traversal. Keeping these behind one
//! module gives the rest of the crate a stable, testable surface.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for zero-copy text passing
pub use tendril::StrTendril;

use crate::error::{Error, Result};

/// Parse an HTML string into a document.
///
/// The underlying parser is permissive and structures any input, so this only
/// fails on pathological inputs; the explicit `Result` keeps the parse
/// boundary visible to callers.
pub fn parse_document(html: &str) -> Result<Document> {
    if html.contains('\0') {
        return Err(Error::Parse("input contains NUL bytes".to_string()));
    }
    Ok(Document::from(html))
}

/// Get tag name (lowercase) of the first node in a selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

/// Get tag name (lowercase) of a node, if it is an element.
#[must_use]
pub fn node_tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_lowercase())
}

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Visible text of a selection with leading/trailing whitespace removed.
///
/// Interior whitespace is preserved; extraction is deterministic, not
/// typographic.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    text_content(sel).trim().to_string()
}

/// Check whether an element carries `class_name` as a whole class token.
///
/// Token comparison is exact, matching how class-qualified container
/// selectors are declared.
#[must_use]
pub fn has_class_token(sel: &Selection, class_name: &str) -> bool {
    sel.attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|token| token == class_name))
}

/// All element nodes of the document in document order, root element first.
///
/// This is the traversal base for both container location and the fallback
/// text walk: the `<html>` element itself, then every descendant element in
/// pre-order.
#[must_use]
pub fn document_elements<'a>(doc: &'a Document) -> Vec<NodeRef<'a>> {
    let mut elements = Vec::new();
    for root in doc.select("html").nodes() {
        if root.is_element() {
            elements.push(*root);
        }
        for node in root.descendants() {
            if node.is_element() {
                elements.push(node);
            }
        }
    }
    elements
}

/// All elements under `root` whose tag matches one of `tags`, in document order.
///
/// Subtree search excluding `root` itself, mirroring how the extractor scans
/// each container for headings, paragraphs, and lists.
#[must_use]
pub fn elements_by_tags<'a>(root: &Selection<'a>, tags: &[&str]) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if let Some(tag) = tag_name(&sel) {
            if tags.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
                matches.push(sel);
            }
        }
    }
    matches
}

/// The document's `body` selection, if present.
#[must_use]
pub fn body<'a>(doc: &'a Document) -> Option<Selection<'a>> {
    let body = doc.select("body");
    if body.exists() {
        Some(body)
    } else {
        None
    }
}

/// The whole document as a single selection (the `<html>` element).
#[inline]
#[must_use]
pub fn whole_document<'a>(doc: &'a Document) -> Selection<'a> {
    doc.select("html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_tag_name() {
        let doc = parse_document("<article><p>text</p></article>").unwrap();
        let article = doc.select("article");
        assert_eq!(tag_name(&article), Some("article".to_string()));
    }

    #[test]
    fn trimmed_text_strips_edges_only() {
        let doc = parse_document("<p>  hello\nworld  </p>").unwrap();
        let p = doc.select("p");
        assert_eq!(trimmed_text(&p), "hello\nworld");
    }

    #[test]
    fn class_token_is_exact() {
        let doc = parse_document(r#"<div class="content main">x</div>"#).unwrap();
        let div = doc.select("div");
        assert!(has_class_token(&div, "content"));
        assert!(has_class_token(&div, "main"));
        assert!(!has_class_token(&div, "conten"));
        assert!(!has_class_token(&div, "content main"));
    }

    #[test]
    fn elements_by_tags_in_document_order() {
        let doc = parse_document(
            "<div><h2>a</h2><section><p>b</p><h3>c</h3></section><p>d</p></div>",
        )
        .unwrap();
        let div = doc.select("div");
        let found = elements_by_tags(&div, &["h2", "h3", "p"]);
        let tags: Vec<String> = found.iter().filter_map(tag_name).collect();
        assert_eq!(tags, vec!["h2", "p", "h3", "p"]);
    }

    #[test]
    fn elements_by_tags_excludes_root() {
        let doc = parse_document("<ul><li>one</li><li>two</li></ul>").unwrap();
        let ul = doc.select("ul");
        let found = elements_by_tags(&ul, &["ul", "li"]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn document_elements_start_at_html() {
        let doc = parse_document("<body><span>x</span></body>").unwrap();
        let tags: Vec<String> = document_elements(&doc)
            .iter()
            .filter_map(node_tag_name)
            .collect();
        assert_eq!(tags, vec!["html", "head", "body", "span"]);
    }

    #[test]
    fn body_always_synthesized_by_parser() {
        let doc = parse_document("").unwrap();
        assert!(body(&doc).is_some());
    }

    #[test]
    fn parse_rejects_nul_bytes() {
        assert!(parse_document("<p>a\0b</p>").is_err());
    }
}
