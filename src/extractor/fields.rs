//! Typed fields pulled out of a review's free-text metadata line, e.g.
//! `"Colour: Midnight Black Size: 128 GB Pattern Name: iPhone 13 Verified Purchase"`.
//!
//! A field's value runs from just after its marker to the first following
//! marker of the field that comes next on the page, or to the end of the
//! string. Extraction is best-effort: anything unparseable is simply absent.

use tracing::debug;

pub const COLOUR_MARKER: &str = "Colour:";
pub const SIZE_MARKER: &str = "Size:";
pub const PATTERN_MARKER: &str = "Pattern Name:";
pub const VERIFIED_MARKER: &str = "Verified Purchase";

const SIZE_UNIT: &str = "GB";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFields {
    pub storage_size: Option<f64>,
    pub colour: Option<String>,
    pub verified_purchase: bool,
}

impl ReviewFields {
    pub fn parse(metadata: &str) -> Self {
        Self {
            storage_size: extract_storage_size(metadata),
            colour: extract_colour(metadata),
            verified_purchase: is_verified_purchase(metadata),
        }
    }
}

/// Text between the first `marker` and the next `terminator` after it, trimmed.
fn bracketed<'a>(metadata: &'a str, marker: &str, terminator: &str) -> Option<&'a str> {
    let start = metadata.find(marker)? + marker.len();
    let rest = &metadata[start..];
    let value = match rest.find(terminator) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(value.trim())
}

/// Storage size in GB. Absent when there is no size marker or the value is
/// not a finite, non-negative number.
pub fn extract_storage_size(metadata: &str) -> Option<f64> {
    let raw = bracketed(metadata, SIZE_MARKER, PATTERN_MARKER)?;
    let number = raw.strip_suffix(SIZE_UNIT).unwrap_or(raw).trim();

    match number.parse::<f64>() {
        Ok(size) if size.is_finite() && size >= 0.0 => Some(size),
        _ => {
            debug!(value = raw, "unparseable storage size");
            None
        }
    }
}

/// Colour text, verbatim after trimming. `None` only when the marker is
/// missing; a marker with nothing after it gives `Some("")`.
pub fn extract_colour(metadata: &str) -> Option<String> {
    bracketed(metadata, COLOUR_MARKER, SIZE_MARKER).map(str::to_string)
}

pub fn is_verified_purchase(metadata: &str) -> bool {
    metadata.contains(VERIFIED_MARKER)
}
