use std::fs;

use crate::extractor::{RawReviewBlock, ReviewExtractor, isolate_review_blocks};
use crate::sentiment::Sentiment;

fn fixture() -> String {
    fs::read_to_string("src/extractor/tests/fixtures/product_page.html")
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_product_page() {
    let html = fixture();
    let reviews = ReviewExtractor::default().extract_page(&html);

    assert_eq!(reviews.len(), 4);

    let first = &reviews[0];
    assert_eq!(first.title.as_deref(), Some("Best phone I have owned"));
    assert!(first.text.as_deref().unwrap().starts_with("I love this phone."));
    assert_eq!(first.storage_size, Some(128.0));
    assert_eq!(first.colour.as_deref(), Some("Midnight"));
    assert!(first.verified_purchase);
    assert_eq!(first.sentiment_lexicon(), Sentiment::Positive);
    assert_eq!(first.sentiment_valence(), Sentiment::Positive);

    let second = &reviews[1];
    assert_eq!(second.title.as_deref(), Some("Screen cracked"));
    assert_eq!(second.storage_size, Some(256.0));
    assert_eq!(second.colour.as_deref(), Some("Starlight"));
    assert!(!second.verified_purchase);
    assert_eq!(second.sentiment_lexicon(), Sentiment::Negative);
    assert_eq!(second.sentiment_valence(), Sentiment::Negative);

    let third = &reviews[2];
    assert_eq!(third.storage_size, None);
    assert_eq!(third.colour, None);
    assert_eq!(third.colour_or_sentinel(), "NULL");
    assert!(third.verified_purchase);
    assert_eq!(third.sentiment_lexicon(), Sentiment::Neutral);
    assert_eq!(third.sentiment_valence(), Sentiment::Neutral);
}

#[test]
fn test_empty_block_still_yields_review() {
    let html = fixture();
    let reviews = ReviewExtractor::default().extract_page(&html);

    let removed = &reviews[3];
    assert_eq!(removed.title_or_sentinel(), "NULL");
    assert_eq!(removed.text_or_sentinel(), "NULL");
    assert_eq!(removed.storage_size, None);
    assert_eq!(removed.colour_or_sentinel(), "NULL");
    assert!(!removed.verified_purchase);
    assert_eq!(removed.sentiment_lexicon(), Sentiment::Neutral);
    assert_eq!(removed.sentiment_valence(), Sentiment::Neutral);
}

#[test]
fn test_output_count_and_order_follow_input() {
    let blocks = vec![
        RawReviewBlock::default(),
        RawReviewBlock {
            title: Some("2.0 out of 5 stars Meh".to_string()),
            body: Some("This is terrible".to_string()),
            metadata: Some("Size: 64 GB".to_string()),
        },
        RawReviewBlock {
            title: Some("Great".to_string()),
            body: None,
            metadata: Some("garbage ::: Size: Colour:".to_string()),
        },
    ];

    let reviews = ReviewExtractor::default().extract(&blocks);
    assert_eq!(reviews.len(), blocks.len());
    assert_eq!(reviews[0].title, None);
    assert_eq!(reviews[1].title.as_deref(), Some("Meh"));
    assert_eq!(reviews[1].storage_size, Some(64.0));
    assert_eq!(reviews[2].title.as_deref(), Some("Great"));
    assert_eq!(reviews[2].storage_size, None);
    assert_eq!(reviews[2].colour.as_deref(), Some(""));
}

#[test]
fn test_extract_is_idempotent() {
    let blocks = isolate_review_blocks(&fixture());
    let extractor = ReviewExtractor::default();

    let first = extractor.extract(&blocks);
    let second = extractor.extract(&blocks);
    assert_eq!(first, second);
}

#[test]
fn test_body_is_kept_verbatim() {
    let body = "  Spacing   stays\nas it was  ";
    let block = RawReviewBlock {
        title: None,
        body: Some(body.to_string()),
        metadata: None,
    };
    let review = ReviewExtractor::default().extract_one(&block);
    assert_eq!(review.text.as_deref(), Some(body));
}

#[test]
fn test_malformed_html() {
    let html = r#"<div class="a-section review aok-relative"><span class="reviewText">Unclosed <b>tags<div>More"#;
    let reviews = ReviewExtractor::default().extract_page(html);

    assert_eq!(reviews.len(), 1);
    assert!(reviews[0].text.as_deref().unwrap().contains("Unclosed"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_page_never_panics(html in ".*") {
            let _ = ReviewExtractor::default().extract_page(&html);
        }

        #[test]
        fn test_one_review_per_block(
            blocks in proptest::collection::vec(
                (
                    proptest::option::of(".*"),
                    proptest::option::of(".*"),
                    proptest::option::of(".*"),
                ),
                0..8,
            )
        ) {
            let blocks: Vec<RawReviewBlock> = blocks
                .into_iter()
                .map(|(title, body, metadata)| RawReviewBlock { title, body, metadata })
                .collect();
            let reviews = ReviewExtractor::default().extract(&blocks);
            prop_assert_eq!(reviews.len(), blocks.len());
        }
    }
}
