//! Rule-based mood classification over the keyword lexicon.
//!
//! Deterministic and infallible. Serves as the fallback when the model
//! backend is unreachable and as the evidence oracle for reconciliation.

use crate::lexicon::{self, keywords_for, match_counts, tokenize, STOP_WORDS};
use daybook_core::{Emotion, MoodResult, FALLBACK_KEYWORDS};
use std::collections::HashSet;

// ============================================================================
// RuleClassifier
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify text into a full mood result using keyword evidence alone.
    pub fn classify(&self, text: &str) -> MoodResult {
        let (emotion, score, confidence) = self.detect(text);
        let keywords = self.extract_keywords(text, emotion);
        MoodResult::new(score, emotion, confidence, keywords)
    }

    /// Dominant emotion, score and confidence from keyword counts.
    ///
    /// Neutral never competes for dominance; it is the result only when no
    /// other emotion has evidence. Ties break toward the earlier entry in
    /// `Emotion::ALL`.
    pub fn detect(&self, text: &str) -> (Emotion, f64, f64) {
        let counts = match_counts(&tokenize(text));

        let mut best: Option<(Emotion, usize)> = None;
        for &(emotion, count) in counts.iter() {
            if emotion == Emotion::Neutral || count == 0 {
                continue;
            }
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((emotion, count));
            }
        }

        let Some((emotion, matches)) = best else {
            return (Emotion::Neutral, 0.0, 0.5);
        };

        let (lo, hi) = emotion.score_range();
        let intensity = (matches as f64 / 5.0).min(1.0);
        let score = round2((lo + (hi - lo) * intensity).clamp(lo, hi));
        let confidence = (0.55 + matches as f64 * 0.08).min(0.90);

        tracing::debug!(
            "Rule classifier: {} ({} keyword matches, score {:.2})",
            emotion,
            matches,
            score
        );

        (emotion, score, confidence)
    }

    /// Salient keywords for a detected emotion.
    ///
    /// Emotion-bucket hits come first in bucket order, then longer alphabetic
    /// content words that are not stop words. Capped at five, deduplicated,
    /// with a fixed fallback when nothing qualifies.
    pub fn extract_keywords(&self, text: &str, emotion: Emotion) -> Vec<String> {
        let tokens = tokenize(text);
        let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();

        let mut keywords: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for kw in keywords_for(emotion) {
            if keywords.len() >= 5 {
                break;
            }
            if token_set.contains(kw) && seen.insert((*kw).to_string()) {
                keywords.push((*kw).to_string());
            }
        }

        for token in &tokens {
            if keywords.len() >= 5 {
                break;
            }
            let is_content_word = token.chars().count() > 4
                && token.chars().all(|c| c.is_alphabetic())
                && !STOP_WORDS.contains(&token.as_str());
            if is_content_word && seen.insert(token.clone()) {
                keywords.push(token.clone());
            }
        }

        if keywords.is_empty() {
            return FALLBACK_KEYWORDS.iter().map(|s| s.to_string()).collect();
        }
        keywords
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// Tests
// ============================================================================
