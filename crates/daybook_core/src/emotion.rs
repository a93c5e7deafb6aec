//! The closed emotion vocabulary and its score semantics.
//!
//! Every mood analysis lands on exactly one of six labels. Each label owns a
//! permitted score range and a polarity class; both are exhaustive matches so
//! a new variant cannot be added without updating them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A dominant emotion label assigned to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Anxious,
    Calm,
    Angry,
    Neutral,
}

/// Which sign an emotion's score must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown emotion label: {0:?}")]
pub struct ParseEmotionError(pub String);

impl Emotion {
    /// All variants in detection priority order. When two emotions tie on
    /// keyword evidence, the earlier entry wins; Neutral is listed last and
    /// never competes directly.
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Calm,
        Emotion::Angry,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Anxious => "anxious",
            Emotion::Calm => "calm",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
        }
    }

    /// Case-insensitive lookup; returns `None` for anything outside the
    /// closed set.
    pub fn parse_str(s: &str) -> Option<Emotion> {
        match s.to_lowercase().as_str() {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "anxious" => Some(Emotion::Anxious),
            "calm" => Some(Emotion::Calm),
            "angry" => Some(Emotion::Angry),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    /// Permitted `(min, max)` score range for this emotion.
    ///
    /// Single source of truth: intensity scaling interpolates within it and
    /// validation clamps into it.
    pub fn score_range(&self) -> (f64, f64) {
        match self {
            Emotion::Happy => (0.2, 1.0),
            Emotion::Calm => (0.1, 0.6),
            Emotion::Neutral => (-0.15, 0.15),
            Emotion::Anxious => (-0.8, -0.1),
            Emotion::Sad => (-0.9, -0.2),
            Emotion::Angry => (-0.9, -0.3),
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Emotion::Happy | Emotion::Calm => Polarity::Positive,
            Emotion::Sad | Emotion::Anxious | Emotion::Angry => Polarity::Negative,
            Emotion::Neutral => Polarity::Neutral,
        }
    }

    /// Clamp a raw score into this emotion's permitted range.
    pub fn clamp_score(&self, score: f64) -> f64 {
        let (min, max) = self.score_range();
        score.clamp(min, max)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::parse_str(s).ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}
