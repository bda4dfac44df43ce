use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{
    QueryBuilder, Sqlite, SqlitePool,
    migrate::MigrateError,
    sqlite::SqlitePoolOptions,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::extractor::model::{NULL_SENTINEL, Review, from_sentinel};
use crate::repositories::filter::{FilterCriteria, FilterQueryBuilder};
use crate::sentiment::{ParseSentimentError, SentimentPair};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] MigrateError),
}

/// Stored field whose distinct values can be listed as filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Title,
    Text,
    Colour,
    StorageSize,
}

impl ReviewField {
    fn column(self) -> &'static str {
        match self {
            ReviewField::Title => "review_title",
            ReviewField::Text => "review_text",
            ReviewField::Colour => "colour",
            ReviewField::StorageSize => "storage_size",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepositoryTrait: Send + Sync {
    /// Append `reviews` in order. Either all of them are stored or none are.
    async fn insert(&self, reviews: &[Review]) -> Result<(), StoreError>;

    /// Reviews matching `criteria`, in storage order.
    async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<Review>, StoreError>;

    async fn distinct_values(&self, field: ReviewField) -> Result<BTreeSet<String>, StoreError>;
}

const SELECT_REVIEWS: &str = "SELECT review_title, review_text, storage_size, colour, \
     verified_purchase, sentiment_lexicon, sentiment_valence FROM reviews";

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    review_title: String,
    review_text: String,
    storage_size: Option<f64>,
    colour: String,
    verified_purchase: bool,
    sentiment_lexicon: String,
    sentiment_valence: String,
}

impl TryFrom<ReviewRow> for Review {
    type Error = ParseSentimentError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            title: from_sentinel(row.review_title),
            text: from_sentinel(row.review_text),
            storage_size: row.storage_size,
            colour: from_sentinel(row.colour),
            verified_purchase: row.verified_purchase,
            sentiment: SentimentPair {
                lexicon: row.sentiment_lexicon.parse()?,
                valence: row.sentiment_valence.parse()?,
            },
        })
    }
}

#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, e.g. `sqlite://reviews.db?mode=rwc`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations; no-op if up-to-date.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReviewRepositoryTrait for SqliteReviewRepository {
    #[instrument(skip_all, fields(count = reviews.len()))]
    async fn insert(&self, reviews: &[Review]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for review in reviews {
            sqlx::query(
                r#"
                INSERT INTO reviews
                      (review_title, review_text, storage_size, colour,
                       verified_purchase, sentiment_lexicon, sentiment_valence)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(review.title_or_sentinel())
            .bind(review.text_or_sentinel())
            .bind(review.storage_size)
            .bind(review.colour_or_sentinel())
            .bind(review.verified_purchase)
            .bind(review.sentiment_lexicon().as_str())
            .bind(review.sentiment_valence().as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("stored reviews");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<Review>, StoreError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_REVIEWS);
        FilterQueryBuilder::build(criteria).push_where(&mut query);
        query.push(" ORDER BY id");

        let rows: Vec<ReviewRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let reviews = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        debug!(count = reviews.len(), "queried reviews");
        Ok(reviews)
    }

    #[instrument(skip(self))]
    async fn distinct_values(&self, field: ReviewField) -> Result<BTreeSet<String>, StoreError> {
        let values = match field {
            ReviewField::StorageSize => {
                let sizes: Vec<f64> = sqlx::query_scalar(
                    "SELECT DISTINCT storage_size FROM reviews WHERE storage_size IS NOT NULL",
                )
                .fetch_all(&self.pool)
                .await?;
                sizes.into_iter().map(|size| size.to_string()).collect()
            }
            ReviewField::Colour => {
                let colours: Vec<String> =
                    sqlx::query_scalar("SELECT DISTINCT colour FROM reviews WHERE colour <> ?")
                        .bind(NULL_SENTINEL)
                        .fetch_all(&self.pool)
                        .await?;
                colours.into_iter().collect()
            }
            ReviewField::Title | ReviewField::Text => {
                let sql = format!("SELECT DISTINCT {} FROM reviews", field.column());
                let values: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
                values.into_iter().collect()
            }
        };
        Ok(values)
    }
}

/// Store backed by a vector, for tests and callers without a database.
#[derive(Default)]
pub struct InMemoryReviewRepository {
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewRepositoryTrait for InMemoryReviewRepository {
    async fn insert(&self, reviews: &[Review]) -> Result<(), StoreError> {
        self.reviews.write().await.extend_from_slice(reviews);
        Ok(())
    }

    async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<Review>, StoreError> {
        let predicate = FilterQueryBuilder::build(criteria);
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .filter(|review| predicate.matches(review))
            .cloned()
            .collect())
    }

    async fn distinct_values(&self, field: ReviewField) -> Result<BTreeSet<String>, StoreError> {
        let reviews = self.reviews.read().await;
        let values = reviews.iter().filter_map(|review| match field {
            ReviewField::Title => Some(review.title_or_sentinel().to_string()),
            ReviewField::Text => Some(review.text_or_sentinel().to_string()),
            ReviewField::Colour => review.colour.clone().filter(|c| c != NULL_SENTINEL),
            ReviewField::StorageSize => review.storage_size.map(|size| size.to_string()),
        });
        Ok(values.collect())
    }
}
