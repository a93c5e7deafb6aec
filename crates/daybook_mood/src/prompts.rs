//! Prompt templates for the mood model.

/// Instruction block constraining the model to a single JSON object with
/// score signs that match the emotion polarity.
pub const MOOD_PROMPT: &str = r#"Analyze this journal entry for emotional tone. Return ONLY valid JSON.

Rules:
- happy/calm entries MUST have POSITIVE mood_score (0.1 to 1.0)
- sad/anxious/angry entries MUST have NEGATIVE mood_score (-0.1 to -1.0)
- neutral entries have mood_score between -0.1 and 0.1
- Extract meaningful keywords, avoid common words like "today", "really", "because"

Examples:
- "peaceful walk, mindful morning" → {"mood_score": 0.4, "dominant_emotion": "calm", "confidence": 0.85, "keywords": ["peaceful", "mindful", "morning"]}
- "excited and proud of myself" → {"mood_score": 0.9, "dominant_emotion": "happy", "confidence": 0.95, "keywords": ["excited", "proud"]}
- "worried and stressed out" → {"mood_score": -0.6, "dominant_emotion": "anxious", "confidence": 0.85, "keywords": ["worried", "stressed"]}
- "regular uneventful day" → {"mood_score": 0.0, "dominant_emotion": "neutral", "confidence": 0.7, "keywords": ["regular", "uneventful"]}

Respond with EXACTLY this JSON format:
{"mood_score": <-1.0 to 1.0>, "dominant_emotion": "<happy/sad/anxious/calm/angry/neutral>", "confidence": <0 to 1>, "keywords": ["word1", "word2", "word3"]}"#;

/// Full prompt for one journal entry.
pub fn build_prompt(text: &str) -> String {
    format!(
        "{}\n\nJournal entry: \"{}\"\n\nJSON response:",
        MOOD_PROMPT,
        text.trim()
    )
}
