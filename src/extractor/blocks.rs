//! Locates customer-review containers on a product page and pulls out the raw
//! title, body and metadata text of each one.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extractor::cleaner::join_fragments;
use crate::extractor::model::RawReviewBlock;

static REVIEW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".a-section.review.aok-relative").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".review-title").unwrap());
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".reviewText").unwrap());
static METADATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".review-data").unwrap());

pub fn isolate_review_blocks(html: &str) -> Vec<RawReviewBlock> {
    let document = Html::parse_document(html);

    let blocks: Vec<RawReviewBlock> = document
        .select(&REVIEW_SELECTOR)
        .map(|review| RawReviewBlock {
            title: first_child(review, &TITLE_SELECTOR).map(stripped_text),
            body: first_child(review, &BODY_SELECTOR).map(stripped_text),
            metadata: first_child(review, &METADATA_SELECTOR).map(raw_text),
        })
        .collect();

    debug!(count = blocks.len(), "isolated review blocks");
    blocks
}

fn first_child<'a>(review: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    review.select(selector).next()
}

/// Text nodes trimmed and joined, as displayed.
fn stripped_text(element: ElementRef<'_>) -> String {
    join_fragments(element.text())
}

/// Text nodes concatenated as-is. Metadata markers can run straight into the
/// previous value ("BlackSize:"), which the field parser relies on.
fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
