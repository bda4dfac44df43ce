pub mod blocks;
pub mod cleaner;
pub mod fields;
pub mod model;

#[cfg(test)]
mod tests;

pub use blocks::isolate_review_blocks;
pub use fields::ReviewFields;
pub use model::{NULL_SENTINEL, RawReviewBlock, Review};

use tracing::debug;

use crate::sentiment::SentimentClassifier;

/// Turns isolated review blocks into normalized reviews. Every block yields
/// exactly one review, in input order, whatever state the block is in.
#[derive(Clone, Copy)]
pub struct ReviewExtractor<'c> {
    classifier: &'c SentimentClassifier,
}

impl<'c> ReviewExtractor<'c> {
    pub fn new(classifier: &'c SentimentClassifier) -> Self {
        Self { classifier }
    }

    pub fn extract(&self, blocks: &[RawReviewBlock]) -> Vec<Review> {
        let reviews: Vec<Review> = blocks.iter().map(|block| self.extract_one(block)).collect();
        debug!(count = reviews.len(), "extracted reviews");
        reviews
    }

    pub fn extract_one(&self, block: &RawReviewBlock) -> Review {
        // 1. Title without its star-rating prefix
        let title = block.title.as_deref().map(cleaner::clean_title);

        // 2. Typed fields from the metadata line
        let fields = ReviewFields::parse(block.metadata.as_deref().unwrap_or_default());

        // 3. Both sentiment labels for the body
        let sentiment = self
            .classifier
            .classify(block.body.as_deref().unwrap_or_default());

        Review {
            title,
            text: block.body.clone(),
            storage_size: fields.storage_size,
            colour: fields.colour,
            verified_purchase: fields.verified_purchase,
            sentiment,
        }
    }

    /// Isolate the review blocks of a full page and extract them.
    pub fn extract_page(&self, html: &str) -> Vec<Review> {
        self.extract(&isolate_review_blocks(html))
    }
}

impl Default for ReviewExtractor<'static> {
    fn default() -> Self {
        Self::new(SentimentClassifier::shared())
    }
}
