//! Charset detection and UTF-8 decoding for fetched pages.

use crate::fetcher::{errors::FetchError, types::Charset};
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

/// Only the head of the document is scanned for charset declarations.
const META_SCAN_LIMIT: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("charset pattern"));

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).expect("meta pattern")
});

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#)
        .expect("http-equiv pattern")
});

pub fn detect(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(charset) = label_to_charset(content_type, &HEADER_CHARSET_REGEX) {
        return charset;
    }

    // 2. <meta> declarations in the document head
    let head = &body_bytes[..body_bytes.len().min(META_SCAN_LIMIT)];
    let head_str = String::from_utf8_lossy(head);
    for pattern in [&META_CHARSET_REGEX, &META_HTTP_EQUIV_REGEX] {
        if let Some(charset) = label_to_charset(&head_str, pattern) {
            return charset;
        }
    }

    // 3. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn label_to_charset(haystack: &str, pattern: &Regex) -> Option<Charset> {
    let label = pattern.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}

pub fn decode_utf8(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_from_content_type_header() {
        let body = b"<html><head><title>Pop Report</title></head></html>";
        let charset = detect("text/html; charset=utf-8", body);
        assert!(matches!(charset, Charset::Utf8));
    }

    #[test]
    fn detect_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"></head></html>";
        let charset = detect("text/html", body);
        // encoding_rs maps iso-8859-1 to its windows-1252 superset
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn detect_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>";
        let charset = detect("text/html", body);
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn decode_utf8_roundtrip() {
        let body = "PSA 10 \u{2014} 13,782".as_bytes();
        let decoded = decode_utf8(body, &Charset::Utf8).unwrap();
        assert_eq!(decoded, "PSA 10 \u{2014} 13,782");
    }
}
