//! Fallback text walker behavior when no structured content is found.

use article_glean::{extract, TraceLevel};

#[test]
fn plain_spans_trigger_the_fallback_walker() {
    let html = "<html><body><span>orphan text</span></body></html>";
    let outcome = extract(html);

    assert!(outcome.extraction.has_content());
    assert!(outcome.extraction.full_text().contains("orphan text"));
    // Fallback keys are tag + descendant index, never the structured shapes.
    assert!(outcome
        .extraction
        .iter()
        .all(|(key, _)| !key.starts_with("paragraph_") && !key.starts_with("heading_")));
    assert!(outcome
        .trace
        .entries()
        .iter()
        .any(|entry| entry.message.contains("falling back to extracting text")));
}

#[test]
fn structured_content_suppresses_the_fallback() {
    let html = "<html><body><article><p>kept</p></article><span>ignored</span></body></html>";
    let outcome = extract(html);

    assert_eq!(outcome.extraction.get("paragraph_0_0"), Some("kept"));
    assert!(!outcome
        .extraction
        .iter()
        .any(|(key, _)| key.starts_with("span_")));
}

#[test]
fn colliding_fallback_keys_keep_the_last_value() {
    // Two sibling spans sit at the same descendant offset under their own
    // subtrees, so the later one overwrites the earlier key.
    let html = "<html><body><span>alpha</span><span>beta</span></body></html>";
    let outcome = extract(html);

    assert_eq!(outcome.extraction.get("span_0"), Some("beta"));
    // full_text still carries every emission, in walk order.
    let alpha = outcome.extraction.full_text().matches("alpha").count();
    let beta = outcome.extraction.full_text().matches("beta").count();
    assert!(alpha >= 1);
    assert!(beta >= 1);
}

#[test]
fn text_free_document_reports_an_error_entry() {
    let html = "<html><body><span>   </span></body></html>";
    let outcome = extract(html);

    assert!(!outcome.extraction.has_content());
    assert!(outcome
        .trace
        .entries()
        .iter()
        .any(|entry| entry.level == TraceLevel::Error
            && entry.message.contains("Fallback method extracted 0 text elements")));
}

#[test]
fn fallback_previews_are_capped() {
    let long = "x".repeat(80);
    let html = format!("<html><body><span>{long}</span></body></html>");
    let outcome = extract(&html);

    let preview = outcome
        .trace
        .entries()
        .iter()
        .find(|entry| entry.message.starts_with("Extracted text from"))
        .map(|entry| entry.message.clone());
    let preview = preview.unwrap_or_default();
    assert!(preview.ends_with("..."));
    assert!(!preview.contains(&long));
}
