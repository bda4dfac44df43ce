use serde::{Deserialize, Serialize};

use crate::sentiment::{Sentiment, SentimentPair};

/// Stand-in for an unknown text value wherever a review is stored or filtered.
pub const NULL_SENTINEL: &str = "NULL";

/// One customer review as isolated from the page, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReviewBlock {
    pub title: Option<String>,
    pub body: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub title: Option<String>,
    pub text: Option<String>,
    pub storage_size: Option<f64>,
    pub colour: Option<String>,
    pub verified_purchase: bool,
    pub sentiment: SentimentPair,
}

impl Review {
    pub fn title_or_sentinel(&self) -> &str {
        self.title.as_deref().unwrap_or(NULL_SENTINEL)
    }

    pub fn text_or_sentinel(&self) -> &str {
        self.text.as_deref().unwrap_or(NULL_SENTINEL)
    }

    pub fn colour_or_sentinel(&self) -> &str {
        self.colour.as_deref().unwrap_or(NULL_SENTINEL)
    }

    pub fn sentiment_lexicon(&self) -> Sentiment {
        self.sentiment.lexicon
    }

    pub fn sentiment_valence(&self) -> Sentiment {
        self.sentiment.valence
    }
}

/// Inverse of the `*_or_sentinel` accessors, used when reading stored rows.
pub fn from_sentinel(value: String) -> Option<String> {
    if value == NULL_SENTINEL {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(colour: Option<&str>) -> Review {
        Review {
            title: None,
            text: Some("Works".to_string()),
            storage_size: None,
            colour: colour.map(str::to_string),
            verified_purchase: false,
            sentiment: SentimentPair {
                lexicon: Sentiment::Neutral,
                valence: Sentiment::Neutral,
            },
        }
    }

    #[test]
    fn test_sentinel_accessors() {
        let r = review(None);
        assert_eq!(r.title_or_sentinel(), "NULL");
        assert_eq!(r.text_or_sentinel(), "Works");
        assert_eq!(r.colour_or_sentinel(), "NULL");
        // An empty colour is a real value, not an unknown one.
        assert_eq!(review(Some("")).colour_or_sentinel(), "");
    }

    #[test]
    fn test_from_sentinel() {
        assert_eq!(from_sentinel("NULL".to_string()), None);
        assert_eq!(from_sentinel("Blue".to_string()), Some("Blue".to_string()));
        assert_eq!(from_sentinel(String::new()), Some(String::new()));
    }
}
