//! Model-backed mood analysis with a rule-based fallback.
//!
//! The analyzer never fails: any transport or parse problem downgrades to
//! the rule classifier, and empty input short-circuits to a neutral
//! sentinel. Model output goes through lenient JSON extraction and a
//! polarity pre-pass before it leaves this module.

use crate::classifier::RuleClassifier;
use crate::llm::Generator;
use crate::prompts::build_prompt;
use anyhow::{bail, Context, Result};
use daybook_core::{Emotion, MoodResult, Polarity};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

// ============================================================================
// MoodAnalyzer
// ============================================================================

pub struct MoodAnalyzer {
    generator: Arc<dyn Generator>,
    classifier: RuleClassifier,
}

impl MoodAnalyzer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            classifier: RuleClassifier::new(),
        }
    }

    /// Analyze one journal entry. Infallible: model errors fall back to the
    /// rule classifier, empty input yields the neutral sentinel.
    pub async fn analyze(&self, text: &str) -> MoodResult {
        if text.trim().is_empty() {
            tracing::warn!("analyze called with empty text");
            return MoodResult::neutral_sentinel();
        }

        let prompt = build_prompt(text);

        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Model backend unavailable (non-fatal): {}", e);
                return self.classifier.classify(text);
            }
        };

        let candidate = match parse_model_output(&raw) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!("Failed to parse model output (non-fatal): {}", e);
                return self.classifier.classify(text);
            }
        };

        self.fix_score_consistency(candidate, text)
    }

    /// Force the score sign to agree with the emotion's polarity.
    ///
    /// A neutral claim with an extreme score is re-run through the rule
    /// classifier instead; its result is adopted wholesale when it finds a
    /// real emotion, otherwise the score collapses to zero.
    fn fix_score_consistency(&self, candidate: MoodResult, original_text: &str) -> MoodResult {
        let mut corrected = candidate;

        match corrected.emotion.polarity() {
            Polarity::Positive if corrected.score < 0.0 => {
                let fixed = corrected.score.abs();
                tracing::warn!(
                    "Fixed: emotion '{}' had negative score {:.2}, corrected to {:.2}",
                    corrected.emotion,
                    corrected.score,
                    fixed
                );
                corrected.score = fixed;
            }
            Polarity::Negative if corrected.score > 0.0 => {
                let fixed = -corrected.score.abs();
                tracing::warn!(
                    "Fixed: emotion '{}' had positive score {:.2}, corrected to {:.2}",
                    corrected.emotion,
                    corrected.score,
                    fixed
                );
                corrected.score = fixed;
            }
            Polarity::Neutral if corrected.score.abs() > 0.3 => {
                tracing::warn!(
                    "Neutral emotion with extreme score {:.2}, re-running rule classifier",
                    corrected.score
                );
                let reclassified = self.classifier.classify(original_text);
                if reclassified.emotion != Emotion::Neutral {
                    return reclassified;
                }
                corrected.score = 0.0;
            }
            _ => {}
        }

        corrected
    }
}

// ============================================================================
// Model output parsing
// ============================================================================

/// Raw JSON shape the model is asked to produce. Every field is optional so
/// a partial response still parses; missing fields take zero values and get
/// reconciled downstream.
#[derive(Debug, Deserialize)]
struct RawMood {
    #[serde(default)]
    mood_score: f64,
    #[serde(default)]
    dominant_emotion: String,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    keywords: Value,
}

/// Extract and coerce the JSON object from raw model text.
///
/// Takes the span from the first `{` to the last `}`, which also strips
/// markdown fences and prose around the object. Out-of-range numbers are
/// clamped, unknown emotion labels collapse to neutral, and keywords accept
/// either a JSON array or a comma-separated string.
fn parse_model_output(raw: &str) -> Result<MoodResult> {
    let trimmed = raw.trim();

    let span = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => bail!("no JSON object in model output"),
    };

    let parsed: RawMood =
        serde_json::from_str(span).context("Model output is not valid JSON")?;

    let emotion = Emotion::parse_str(&parsed.dominant_emotion).unwrap_or(Emotion::Neutral);

    let keywords = match parsed.keywords {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(MoodResult::new(
        parsed.mood_score,
        emotion,
        parsed.confidence,
        keywords,
    ))
}

// ============================================================================
// Tests
// ============================================================================
