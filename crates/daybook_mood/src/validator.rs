//! Consistency reconciliation for mood results.
//!
//! Single source of truth for correcting a candidate result against the
//! entry text it came from. Every persisted result passes through
//! [`Reconciler::reconcile`], whether the candidate came from the model or
//! from the rule classifier.

use crate::classifier::RuleClassifier;
use crate::lexicon::{count_for, match_counts, tokenize};
use daybook_core::{Emotion, MoodResult, Polarity};

// ============================================================================
// Reconciler
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    classifier: RuleClassifier,
}

impl Reconciler {
    pub fn new(classifier: RuleClassifier) -> Self {
        Self { classifier }
    }

    /// Validate and correct a candidate result against the original text.
    ///
    /// Checks run in a fixed order: low confidence triggers re-detection,
    /// then sign mismatches are flipped (a neutral claim with an extreme
    /// score is re-detected instead), the score is clamped into the
    /// emotion's range, emotions with zero text evidence are overridden
    /// when another emotion has some, and keywords are re-derived from the
    /// final emotion. Idempotent: feeding the output back in changes
    /// nothing.
    pub fn reconcile(&self, candidate: &MoodResult, original_text: &str) -> MoodResult {
        let mut emotion = candidate.emotion;
        let mut score = candidate.score.clamp(-1.0, 1.0);
        let mut confidence = candidate.confidence.clamp(0.0, 1.0);

        // Check 1: confidence too low, re-detect from text
        if confidence < 0.5 {
            tracing::warn!(
                "Low confidence ({:.2}), re-detecting emotion from text",
                confidence
            );
            (emotion, score, confidence) = self.classifier.detect(original_text);
        }

        // Check 2: score sign disagrees with emotion polarity
        // Check 3: neutral claim with an extreme score, re-detect
        match emotion.polarity() {
            Polarity::Positive if score < 0.0 => {
                let fixed = score.abs();
                tracing::warn!(
                    "Sign fix: emotion '{}' had negative score {:.2}, now {:.2}",
                    emotion,
                    score,
                    fixed
                );
                score = fixed;
            }
            Polarity::Negative if score > 0.0 => {
                let fixed = -score.abs();
                tracing::warn!(
                    "Sign fix: emotion '{}' had positive score {:.2}, now {:.2}",
                    emotion,
                    score,
                    fixed
                );
                score = fixed;
            }
            Polarity::Neutral if score.abs() > 0.25 => {
                tracing::warn!("Neutral with extreme score {:.2}, re-detecting", score);
                (emotion, score, confidence) = self.classifier.detect(original_text);
            }
            _ => {}
        }

        // Check 4: clamp score into the emotion's range
        let clamped = emotion.clamp_score(score);
        if clamped != score {
            tracing::debug!(
                "Range clamp: emotion '{}' score {:.2} to {:.2}",
                emotion,
                score,
                clamped
            );
            score = clamped;
        }

        // Check 5: emotion must have text evidence when another emotion does
        let counts = match_counts(&tokenize(original_text));
        if count_for(&counts, emotion) == 0 {
            let (best_emotion, best_count) = counts
                .iter()
                .filter(|(e, _)| *e != Emotion::Neutral)
                .fold((Emotion::Neutral, 0), |acc, &(e, c)| {
                    if c > acc.1 {
                        (e, c)
                    } else {
                        acc
                    }
                });
            if best_count > 0 {
                tracing::warn!(
                    "Override: '{}' has no text evidence, switching to '{}' ({} matches)",
                    emotion,
                    best_emotion,
                    best_count
                );
                (emotion, score, confidence) = self.classifier.detect(original_text);
            }
        }

        // Check 6: keywords always come from the final emotion and the text
        let keywords = self.classifier.extract_keywords(original_text, emotion);

        let result = MoodResult {
            score: round4(score),
            emotion,
            confidence: round4(confidence),
            keywords,
        };

        tracing::debug!(
            "Reconciled: emotion={}, score={:.2}, confidence={:.2}",
            result.emotion,
            result.score,
            result.confidence
        );

        result
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// ============================================================================
// Tests
// ============================================================================
