//! Review sentiment, scored by two independent methods.
//!
//! The lexicon-polarity method averages word polarities from a static lookup
//! table. The valence-compound method sums valences with heuristics for
//! emphasis and contrast and normalizes the result. Both labels are always
//! computed and kept side by side; nothing here decides which one is right.

pub mod lexicon;
pub mod polarity;
pub mod valence;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use polarity::PolarityScorer;
pub use valence::ValenceScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a score onto a label using a symmetric neutral band `[-band, band]`.
    /// Non-finite scores are Neutral.
    pub fn from_score(score: f64, band: f64) -> Self {
        if !score.is_finite() {
            return Sentiment::Neutral;
        }
        if score > band {
            Sentiment::Positive
        } else if score < -band {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sentiment label: {0}")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(ParseSentimentError(s.to_string())),
        }
    }
}

/// A scoring strategy producing a continuous score in `[-1, 1]`.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;

    /// Half-width of the band around zero that maps to Neutral.
    fn neutral_band(&self) -> f64;

    fn label(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::Neutral;
        }
        Sentiment::from_score(self.score(text), self.neutral_band())
    }
}

/// Both labels for one piece of text. The methods may disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentPair {
    pub lexicon: Sentiment,
    pub valence: Sentiment,
}

static SHARED: Lazy<SentimentClassifier> = Lazy::new(SentimentClassifier::default);

pub struct SentimentClassifier {
    lexicon: Box<dyn SentimentScorer>,
    valence: Box<dyn SentimentScorer>,
}

impl SentimentClassifier {
    pub fn new(
        lexicon: impl SentimentScorer + 'static,
        valence: impl SentimentScorer + 'static,
    ) -> Self {
        Self {
            lexicon: Box::new(lexicon),
            valence: Box::new(valence),
        }
    }

    /// Process-wide classifier over the bundled lexicons. Built on first use
    /// and read-only afterwards.
    pub fn shared() -> &'static SentimentClassifier {
        &SHARED
    }

    pub fn classify_lexicon(&self, text: &str) -> Sentiment {
        self.lexicon.label(text)
    }

    pub fn classify_valence(&self, text: &str) -> Sentiment {
        self.valence.label(text)
    }

    pub fn lexicon_score(&self, text: &str) -> f64 {
        self.lexicon.score(text)
    }

    pub fn valence_score(&self, text: &str) -> f64 {
        self.valence.score(text)
    }

    pub fn classify(&self, text: &str) -> SentimentPair {
        SentimentPair {
            lexicon: self.classify_lexicon(text),
            valence: self.classify_valence(text),
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(PolarityScorer::default(), ValenceScorer::default())
    }
}
