//! Fixed-shape review filters.
//!
//! A [`FilterCriteria`] names up to four equality constraints. The builder
//! turns the present ones into a [`ReviewPredicate`], which can be evaluated
//! against a review in memory or appended to a SQL query with every value
//! bound as a parameter.

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

use crate::extractor::Review;
use crate::sentiment::{ParseSentimentError, Sentiment};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub product_name: Option<String>,
    pub size: Option<f64>,
    pub colour: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl FilterCriteria {
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterArgError {
    #[error("expected key=value, got {0:?}")]
    Malformed(String),
    #[error("unknown filter key {0:?}")]
    UnknownKey(String),
    #[error("invalid size {0:?}")]
    InvalidSize(String),
    #[error(transparent)]
    InvalidSentiment(#[from] ParseSentimentError),
}

impl FilterCriteria {
    /// Apply one `key=value` argument, as accepted by the `reviews` binary.
    /// Keys are `product`, `size`, `colour` and `sentiment`.
    pub fn apply_arg(&mut self, arg: &str) -> Result<(), FilterArgError> {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| FilterArgError::Malformed(arg.to_string()))?;

        match key.trim() {
            "product" => self.product_name = Some(value.to_string()),
            "size" => {
                let size = value
                    .trim()
                    .parse()
                    .map_err(|_| FilterArgError::InvalidSize(value.to_string()))?;
                self.size = Some(size);
            }
            "colour" => self.colour = Some(value.to_string()),
            "sentiment" => self.sentiment = Some(value.trim().parse()?),
            other => return Err(FilterArgError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn from_args<I, S>(args: I) -> Result<Self, FilterArgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criteria = Self::default();
        for arg in args {
            criteria.apply_arg(arg.as_ref())?;
        }
        Ok(criteria)
    }
}

/// One equality test against a stored column.
#[derive(Debug, Clone, PartialEq)]
pub enum Conjunct {
    Title(String),
    StorageSize(f64),
    Colour(String),
    /// Only the lexicon-polarity label is filterable.
    LexiconSentiment(Sentiment),
}

impl Conjunct {
    fn column(&self) -> &'static str {
        match self {
            Conjunct::Title(_) => "review_title",
            Conjunct::StorageSize(_) => "storage_size",
            Conjunct::Colour(_) => "colour",
            Conjunct::LexiconSentiment(_) => "sentiment_lexicon",
        }
    }

    fn matches(&self, review: &Review) -> bool {
        match self {
            Conjunct::Title(title) => review.title_or_sentinel() == title,
            Conjunct::StorageSize(size) => review.storage_size == Some(*size),
            Conjunct::Colour(colour) => review.colour_or_sentinel() == colour,
            Conjunct::LexiconSentiment(label) => review.sentiment_lexicon() == *label,
        }
    }
}

/// Conjunction of equality tests. Empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPredicate {
    conjuncts: Vec<Conjunct>,
}

impl ReviewPredicate {
    pub fn conjuncts(&self) -> &[Conjunct] {
        &self.conjuncts
    }

    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty()
    }

    pub fn matches(&self, review: &Review) -> bool {
        self.conjuncts.iter().all(|c| c.matches(review))
    }

    /// Append ` WHERE col = ? AND ...` to `query`. Nothing is appended for an
    /// empty predicate.
    pub fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        for (i, conjunct) in self.conjuncts.iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            query.push(conjunct.column());
            query.push(" = ");
            match conjunct {
                Conjunct::Title(value) | Conjunct::Colour(value) => {
                    query.push_bind(value.clone());
                }
                Conjunct::StorageSize(size) => {
                    query.push_bind(*size);
                }
                Conjunct::LexiconSentiment(label) => {
                    query.push_bind(label.as_str());
                }
            }
        }
    }
}

pub struct FilterQueryBuilder;

impl FilterQueryBuilder {
    pub fn build(criteria: &FilterCriteria) -> ReviewPredicate {
        let mut conjuncts = Vec::new();

        if let Some(name) = &criteria.product_name {
            conjuncts.push(Conjunct::Title(name.clone()));
        }
        if let Some(size) = criteria.size {
            conjuncts.push(Conjunct::StorageSize(size));
        }
        if let Some(colour) = &criteria.colour {
            conjuncts.push(Conjunct::Colour(colour.clone()));
        }
        if let Some(sentiment) = criteria.sentiment {
            conjuncts.push(Conjunct::LexiconSentiment(sentiment));
        }

        ReviewPredicate { conjuncts }
    }
}
