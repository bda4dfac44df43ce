#![allow(dead_code)]

use reviewscope::{
    extractor::Review,
    repositories::SqliteReviewRepository,
    sentiment::{Sentiment, SentimentPair},
};
use sqlx::sqlite::SqlitePoolOptions;

pub const PRODUCT_PAGE: &str = include_str!("../src/extractor/tests/fixtures/product_page.html");

/// Fresh migrated store over a private in-memory database. One connection,
/// never recycled, so the database lives as long as the pool.
pub async fn memory_repo() -> SqliteReviewRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let repo = SqliteReviewRepository::new(pool);
    repo.migrate().await.unwrap();
    repo
}

pub fn review(
    title: Option<&str>,
    size: Option<f64>,
    colour: Option<&str>,
    lexicon: Sentiment,
    valence: Sentiment,
) -> Review {
    Review {
        title: title.map(str::to_string),
        text: title.map(|t| format!("About {t}")),
        storage_size: size,
        colour: colour.map(str::to_string),
        verified_purchase: size.is_some(),
        sentiment: SentimentPair { lexicon, valence },
    }
}
