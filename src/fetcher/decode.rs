//! Character-set sniffing and decoding of fetched page bytes.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;
use tracing::warn;

/// How much of the body is searched for a `<meta>` charset declaration.
const META_SCAN_BYTES: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

/// Matches both `<meta charset=..>` and the `http-equiv` content-type form.
static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).unwrap()
});

/// Pick an encoding: Content-Type header first, then an in-page `<meta>`
/// declaration, then a statistical guess.
pub fn sniff_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&HEADER_CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body[..body.len().min(META_SCAN_BYTES)];
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &String::from_utf8_lossy(head)) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, head.len() == body.len());
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str();
    Encoding::for_label(label.trim().as_bytes())
}

/// Decode to UTF-8. Malformed sequences become U+FFFD rather than failing
/// the page; review text around them is still usable.
pub fn decode(body: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding) {
    let (decoded, actual, had_errors) = encoding.decode(body);
    if had_errors {
        warn!(encoding = actual.name(), "page contained malformed byte sequences");
    }
    (decoded.into_owned(), actual)
}
