//! Character encoding detection and transcoding.
//!
//! Fetched pages arrive as raw bytes; this module sniffs the declared charset
//! from meta tags and converts to UTF-8 before parsing.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Matches `<meta charset="...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Matches `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("valid regex")
});

/// Sniff the declared encoding from the first kilobyte of the document.
///
/// `<meta charset>` wins over the `http-equiv` form; anything unrecognized
/// falls back to UTF-8, the web default.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    for pattern in [&*META_CHARSET, &*META_CONTENT_TYPE] {
        if let Some(label) = pattern.captures(&head_str).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }

    UTF_8
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with the Unicode replacement character
/// rather than failing; a page that decodes badly still gets extracted.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>x</body></html>"), UTF_8);
    }

    #[test]
    fn meta_charset_detected() {
        let html = br#"<head><meta charset="windows-1252"></head>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_charset_detected() {
        let html =
            br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per the WHATWG registry
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn transcodes_legacy_bytes() {
        let html = b"<head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body>";
        assert!(transcode_to_utf8(html).contains("Caf\u{e9}"));
    }

    #[test]
    fn invalid_utf8_replaced_not_fatal() {
        let html = b"<body>ok \xFF\xFE still ok</body>";
        let decoded = transcode_to_utf8(html);
        assert!(decoded.contains("ok"));
        assert!(decoded.contains("still ok"));
    }
}
