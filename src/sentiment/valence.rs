//! Valence-compound scoring, tuned for short informal text.
//!
//! Word valences come from a lexicon on a -4..4 scale and are adjusted by
//! the words before them: boosters and dampeners, ALL-CAPS emphasis, and
//! negations within three words. A "but" shifts weight onto the clause after
//! it, and exclamation or question marks push the sum away from zero. The sum
//! is normalized into `[-1, 1]`.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::sentiment::SentimentScorer;
use crate::sentiment::lexicon::{LexiconError, parse_table};

const BUNDLED: &str = include_str!("data/valence.tsv");

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

const EXCLAMATION_STEP: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_STEP: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
        "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly",
        "more", "most", "particularly", "purely", "quite", "really", "remarkably", "so",
        "substantially", "thoroughly", "totally", "tremendously", "uber", "unbelievably",
        "unusually", "utterly", "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
        "partly", "scarcely", "slightly", "somewhat", "sorta",
    ];
    increments
        .into_iter()
        .map(|w| (w, B_INCR))
        .chain(decrements.into_iter().map(|w| (w, B_DECR)))
        .collect()
});

static DEFAULT_LEXICON: Lazy<Arc<ValenceLexicon>> = Lazy::new(|| {
    Arc::new(ValenceLexicon::parse(BUNDLED).expect("bundled valence lexicon is well-formed"))
});

#[derive(Debug, Clone, Default)]
pub struct ValenceLexicon {
    entries: HashMap<String, f64>,
}

impl ValenceLexicon {
    /// Rows are `word<TAB>valence`.
    pub fn parse(source: &str) -> Result<Self, LexiconError> {
        let entries = parse_table(source, 1)?
            .into_iter()
            .map(|(word, values)| (word, values[0]))
            .collect();
        Ok(Self { entries })
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.entries.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ValenceScorer {
    lexicon: Arc<ValenceLexicon>,
}

impl Default for ValenceScorer {
    fn default() -> Self {
        Self::new(Arc::clone(&DEFAULT_LEXICON))
    }
}

impl ValenceScorer {
    pub fn new(lexicon: Arc<ValenceLexicon>) -> Self {
        Self { lexicon }
    }

    fn valence_at(&self, i: usize, words: &[&str], lowered: &[String], cap_diff: bool) -> f64 {
        let Some(mut valence) = self.lexicon.get(&lowered[i]) else {
            return 0.0;
        };

        if cap_diff && is_all_caps(words[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let j = i - (start + 1);
            if self.lexicon.contains(&lowered[j]) {
                continue;
            }
            let mut scalar = scalar_inc_dec(words[j], &lowered[j], valence, cap_diff);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lowered, start, i);
        }

        valence
    }
}

impl SentimentScorer for ValenceScorer {
    fn score(&self, text: &str) -> f64 {
        let words = tokenize(text);
        if words.is_empty() {
            return 0.0;
        }
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let cap_diff = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let lower = lowered[i].as_str();
            let kind_of = lower == "kind" && lowered.get(i + 1).is_some_and(|n| n == "of");
            if BOOSTERS.contains_key(lower) || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence_at(i, &words, &lowered, cap_diff));
        }

        but_check(&lowered, &mut sentiments);

        let sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let emphasis = punctuation_emphasis(text);
        let sum = if sum > 0.0 { sum + emphasis } else { sum - emphasis };
        normalize(sum)
    }

    fn neutral_band(&self) -> f64 {
        0.05
    }
}

/// Whitespace tokens with surrounding punctuation removed, except where
/// stripping would leave two characters or fewer (keeps ":)" intact).
/// Single-character tokens are dropped.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|token| token.chars().count() > 1)
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are shouted.
fn allcap_differential(words: &[&str]) -> bool {
    let shouted = words.iter().filter(|w| is_all_caps(w)).count();
    shouted > 0 && shouted < words.len()
}

fn is_negated(lower: &str) -> bool {
    NEGATIONS.contains(&lower) || lower.contains("n't")
}

fn scalar_inc_dec(word: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(&base) = BOOSTERS.get(lower) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -base } else { base };
    if cap_diff && is_all_caps(word) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(valence: f64, lowered: &[String], start: usize, i: usize) -> f64 {
    let so_or_this = |w: &str| w == "so" || w == "this";
    match start {
        0 if is_negated(&lowered[i - 1]) => valence * N_SCALAR,
        1 if lowered[i - 2] == "never" && so_or_this(&lowered[i - 1]) => valence * 1.25,
        1 if is_negated(&lowered[i - 2]) => valence * N_SCALAR,
        2 if lowered[i - 3] == "never"
            && (so_or_this(&lowered[i - 2]) || so_or_this(&lowered[i - 1])) =>
        {
            valence * 1.25
        }
        2 if is_negated(&lowered[i - 3]) => valence * N_SCALAR,
        _ => valence,
    }
}

/// Halve everything before the first "but" and boost everything after it.
fn but_check(lowered: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= 0.5;
        } else if i > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_STEP,
        _ => QUESTION_CAP,
    };
    exclamations as f64 * EXCLAMATION_STEP + question_boost
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
