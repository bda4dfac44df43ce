//! Fetch a product-review page, extract its reviews and store them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use crate::extractor::{Review, ReviewExtractor, isolate_review_blocks};
use crate::fetcher::{FetchError, Fetcher};
use crate::repositories::{ReviewRepositoryTrait, StoreError};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
    #[error("no review blocks found on page")]
    NoReviews,
}

impl ScrapeError {
    /// Whether running the same scrape again might succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            ScrapeError::Fetch(e) => e.is_retriable(),
            ScrapeError::Store(_) | ScrapeError::NoReviews => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    /// Final URL after redirects.
    pub url: Url,
    /// Name of the encoding the page was decoded from.
    pub encoding: String,
    pub fetched_at: DateTime<Utc>,
    pub reviews: Vec<Review>,
}

pub struct ReviewScraper {
    fetcher: Fetcher,
    extractor: ReviewExtractor<'static>,
    store: Arc<dyn ReviewRepositoryTrait>,
}

impl ReviewScraper {
    pub fn new(fetcher: Fetcher, store: Arc<dyn ReviewRepositoryTrait>) -> Self {
        Self {
            fetcher,
            extractor: ReviewExtractor::default(),
            store,
        }
    }

    pub fn with_extractor(mut self, extractor: ReviewExtractor<'static>) -> Self {
        self.extractor = extractor;
        self
    }

    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<ScrapeReport, ScrapeError> {
        let page = self.fetcher.fetch(url).await.inspect_err(|e| {
            warn!(error = %e, retriable = e.is_retriable(), "fetch failed");
        })?;

        let reviews = self.ingest(&page.body_utf8).await?;
        info!(url = %page.url_final, count = reviews.len(), "scraped reviews");

        Ok(ScrapeReport {
            url: page.url_final,
            encoding: page.encoding.name().to_string(),
            fetched_at: page.fetched_at,
            reviews,
        })
    }

    /// Extract and store the reviews of an already-fetched page as one batch.
    pub async fn ingest(&self, html: &str) -> Result<Vec<Review>, ScrapeError> {
        let blocks = isolate_review_blocks(html);
        if blocks.is_empty() {
            return Err(ScrapeError::NoReviews);
        }

        let reviews = self.extractor.extract(&blocks);
        self.store.insert(&reviews).await?;
        Ok(reviews)
    }
}
