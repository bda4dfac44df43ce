//! Lexicon-polarity scoring.
//!
//! Each known word carries a polarity in `[-1, 1]` and an intensity. A word
//! whose intensity differs from 1.0 acts as a modifier when another known word
//! follows it ("very good"), scaling that word instead of being counted. A
//! negation flips and halves the next assessment, and survives one-letter
//! words in between ("not a good"). Each `!` boosts the assessment before it.
//! The text's score is the mean of its assessments.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sentiment::SentimentScorer;
use crate::sentiment::lexicon::{LexiconError, parse_table};

const BUNDLED: &str = include_str!("data/polarity.tsv");
const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_FACTOR: f64 = 1.25;
const NEGATIONS: &[&str] = &["not", "never", "no", "without", "nothing", "neither", "nor"];

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}'\x{2019}]+|!").unwrap());

static DEFAULT_LEXICON: Lazy<Arc<PolarityLexicon>> = Lazy::new(|| {
    Arc::new(PolarityLexicon::parse(BUNDLED).expect("bundled polarity lexicon is well-formed"))
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityEntry {
    pub polarity: f64,
    pub intensity: f64,
}

impl PolarityEntry {
    fn is_modifier(&self) -> bool {
        (self.intensity - 1.0).abs() > f64::EPSILON
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolarityLexicon {
    entries: HashMap<String, PolarityEntry>,
}

impl PolarityLexicon {
    /// Rows are `word<TAB>polarity<TAB>intensity`.
    pub fn parse(source: &str) -> Result<Self, LexiconError> {
        let entries = parse_table(source, 2)?
            .into_iter()
            .map(|(word, values)| {
                (
                    word,
                    PolarityEntry {
                        polarity: values[0].clamp(-1.0, 1.0),
                        intensity: values[1],
                    },
                )
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn get(&self, word: &str) -> Option<&PolarityEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PolarityScorer {
    lexicon: Arc<PolarityLexicon>,
}

impl PolarityScorer {
    pub fn new(lexicon: Arc<PolarityLexicon>) -> Self {
        Self { lexicon }
    }

    fn is_negation(token: &str) -> bool {
        NEGATIONS.contains(&token) || token.ends_with("n't")
    }
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self::new(Arc::clone(&DEFAULT_LEXICON))
    }
}

impl SentimentScorer for PolarityScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut assessments: Vec<f64> = Vec::new();
        let mut negated = false;
        let mut scale = 1.0;

        for (i, token) in tokens.iter().enumerate() {
            if token == "!" {
                if let Some(last) = assessments.last_mut() {
                    *last = (*last * EXCLAMATION_FACTOR).clamp(-1.0, 1.0);
                }
                continue;
            }

            if Self::is_negation(token) {
                negated = true;
                continue;
            }

            let Some(entry) = self.lexicon.get(token) else {
                if token.chars().count() > 1 {
                    negated = false;
                    scale = 1.0;
                }
                continue;
            };

            let next_is_known = tokens
                .get(i + 1)
                .is_some_and(|next| self.lexicon.get(next).is_some());
            if entry.is_modifier() && next_is_known {
                scale *= entry.intensity;
                continue;
            }

            let mut polarity = entry.polarity * scale;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            assessments.push(polarity.clamp(-1.0, 1.0));
            negated = false;
            scale = 1.0;
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    fn neutral_band(&self) -> f64 {
        0.0
    }
}

/// Lowercase word tokens plus one `"!"` token per exclamation mark.
/// Apostrophes stay inside words so "isn't" survives.
fn tokenize(text: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
        .collect()
}
