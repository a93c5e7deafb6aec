//! End-to-end pipeline tests over a canned generator.

use daybook_core::{Emotion, MoodResult};
use daybook_mood::{MockGenerator, MoodPipeline};
use std::sync::Arc;

fn pipeline_responding(raw: &str) -> MoodPipeline {
    MoodPipeline::with_generator(Arc::new(MockGenerator::respond(raw)))
}

fn pipeline_failing() -> MoodPipeline {
    MoodPipeline::with_generator(Arc::new(MockGenerator::fail("connection refused")))
}

#[tokio::test]
async fn test_well_formed_model_output_flows_through() {
    let raw = r#"{"mood_score": 0.8, "dominant_emotion": "happy", "confidence": 0.92, "keywords": ["friends"]}"#;
    let pipeline = pipeline_responding(raw);

    let result = pipeline
        .analyze_and_reconcile("grateful for a wonderful day with friends")
        .await;

    assert_eq!(result.emotion, Emotion::Happy);
    assert_eq!(result.score, 0.8);
    assert_eq!(result.confidence, 0.92);
    // keywords come from the text, not from the model
    assert_eq!(result.keywords, vec!["wonderful", "grateful", "friends"]);
}

#[tokio::test]
async fn test_fenced_model_output_is_accepted() {
    let raw = "```json\n{\"mood_score\": 0.4, \"dominant_emotion\": \"calm\", \"confidence\": 0.85, \"keywords\": [\"lake\"]}\n```";
    let pipeline = pipeline_responding(raw);

    let result = pipeline.analyze_and_reconcile("calm evening by the lake").await;

    assert_eq!(result.emotion, Emotion::Calm);
    assert_eq!(result.score, 0.4);
    assert_eq!(result.keywords, vec!["calm", "evening"]);
}

#[tokio::test]
async fn test_unreachable_backend_degrades_to_rules() {
    let pipeline = pipeline_failing();

    let result = pipeline.analyze_and_reconcile("worried and stressed out").await;

    assert_eq!(result.emotion, Emotion::Anxious);
    assert_eq!(result.score, -0.52);
    assert_eq!(result.confidence, 0.71);
    assert_eq!(result.keywords, vec!["worried", "stressed"]);
}

#[tokio::test]
async fn test_empty_entry_yields_neutral_sentinel() {
    let pipeline = pipeline_failing();

    let result = pipeline.analyze_and_reconcile("   ").await;

    assert_eq!(result.emotion, Emotion::Neutral);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.keywords, vec!["journal", "entry"]);
}

#[tokio::test]
async fn test_wrong_sign_from_model_is_corrected() {
    let raw = r#"{"mood_score": -0.5, "dominant_emotion": "calm", "confidence": 0.9, "keywords": []}"#;
    let pipeline = pipeline_responding(raw);

    let result = pipeline
        .analyze_and_reconcile("relaxed and peaceful afternoon")
        .await;

    assert_eq!(result.emotion, Emotion::Calm);
    assert_eq!(result.score, 0.5);
    assert_eq!(result.keywords, vec!["peaceful", "relaxed", "afternoon"]);
}

#[tokio::test]
async fn test_low_confidence_model_output_is_replaced() {
    let raw = r#"{"mood_score": 0.1, "dominant_emotion": "neutral", "confidence": 0.3, "keywords": []}"#;
    let pipeline = pipeline_responding(raw);

    let result = pipeline
        .analyze_and_reconcile("worried sick about tomorrow")
        .await;

    assert_eq!(result.emotion, Emotion::Anxious);
    assert_eq!(result.score, -0.66);
    assert_eq!(result.confidence, 0.63);
    assert_eq!(result.keywords, vec!["worried", "tomorrow"]);
}

#[tokio::test]
async fn test_claim_without_text_evidence_is_overridden() {
    let raw = r#"{"mood_score": -0.8, "dominant_emotion": "calm", "confidence": 0.9, "keywords": ["calm"]}"#;
    let pipeline = pipeline_responding(raw);

    let result = pipeline
        .analyze_and_reconcile("I am furious and enraged today")
        .await;

    assert_eq!(result.emotion, Emotion::Angry);
    let (lo, hi) = Emotion::Angry.score_range();
    assert!(result.score >= lo && result.score <= hi);
    assert_eq!(result.keywords, vec!["furious", "enraged"]);
}

#[tokio::test]
async fn test_garbage_model_output_degrades_to_rules() {
    let pipeline = pipeline_responding("I'd rather not answer that.");

    let result = pipeline
        .analyze_and_reconcile("so happy and proud of my progress")
        .await;

    assert_eq!(result.emotion, Emotion::Happy);
    assert!(result.score > 0.0);
    assert!(result.is_consistent());
}

#[tokio::test]
async fn test_pipeline_output_equals_reconciled_sentinel_for_empty() {
    let pipeline = pipeline_responding("unused");

    let result = pipeline.analyze_and_reconcile("").await;
    let expected = MoodResult {
        keywords: vec!["journal".to_string(), "entry".to_string()],
        ..MoodResult::neutral_sentinel()
    };

    assert_eq!(result, expected);
}
