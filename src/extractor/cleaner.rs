use std::sync::LazyLock;

use regex::Regex;

/// Star-rating text that review titles start with, e.g. "4.0 out of 5 stars".
pub const RATING_MARKER: &str = "out of 5 stars";

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Keep only the descriptive text after the last rating marker.
pub fn clean_title(raw: &str) -> String {
    raw.rsplit(RATING_MARKER).next().unwrap_or(raw).trim().to_string()
}

/// Collapse every whitespace run (newlines included) to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Join text fragments from separate DOM nodes into one clean line.
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}
