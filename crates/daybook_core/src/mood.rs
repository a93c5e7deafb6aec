//! The mood analysis result attached to every journal entry.

use crate::emotion::{Emotion, Polarity};
use serde::{Deserialize, Serialize};

/// Keywords used when extraction finds nothing usable. A stored result never
/// has an empty keyword list.
pub const FALLBACK_KEYWORDS: [&str; 2] = ["journal", "entry"];

/// One mood analysis: score, dominant emotion, confidence, keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    /// Overall valence in `[-1.0, 1.0]`.
    pub score: f64,
    pub emotion: Emotion,
    /// How sure the producer was, in `[0.0, 1.0]`.
    pub confidence: f64,
    /// At most five unique keywords, never empty.
    pub keywords: Vec<String>,
}

impl MoodResult {
    pub fn new(score: f64, emotion: Emotion, confidence: f64, keywords: Vec<String>) -> Self {
        Self {
            score: score.clamp(-1.0, 1.0),
            emotion,
            confidence: confidence.clamp(0.0, 1.0),
            keywords,
        }
    }

    /// Safe result for empty or unanalyzable input.
    pub fn neutral_sentinel() -> Self {
        Self {
            score: 0.0,
            emotion: Emotion::Neutral,
            confidence: 0.5,
            keywords: vec!["entry".to_string()],
        }
    }

    /// True when the score's sign matches the emotion's polarity class and
    /// the score lies within the emotion's permitted range.
    pub fn is_consistent(&self) -> bool {
        let sign_ok = match self.emotion.polarity() {
            Polarity::Positive => self.score > 0.0,
            Polarity::Negative => self.score < 0.0,
            Polarity::Neutral => self.score.abs() <= 0.15,
        };
        let (min, max) = self.emotion.score_range();
        sign_ok && self.score >= min && self.score <= max
    }

    /// True when the keyword list is non-empty, capped at five and free of
    /// duplicates.
    pub fn keywords_well_formed(&self) -> bool {
        if self.keywords.is_empty() || self.keywords.len() > 5 {
            return false;
        }
        let mut seen = std::collections::HashSet::new();
        self.keywords.iter().all(|k| seen.insert(k.as_str()))
    }
}
