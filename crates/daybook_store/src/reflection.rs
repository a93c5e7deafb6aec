//! Reflection prompts and the mood-trend reflection line.

/// Valid prompt categories, as enforced by the database schema.
pub const PROMPT_CATEGORIES: [&str; 4] = ["gratitude", "growth", "challenge", "creativity"];

/// Default prompts seeded on first run, as (text, category) pairs.
pub(crate) const SEED_PROMPTS: [(&str, &str); 10] = [
    (
        "List three things you are grateful for today and why.",
        "gratitude",
    ),
    (
        "Describe a small win you had recently. How did it make you feel?",
        "gratitude",
    ),
    (
        "What is one area of your life where you’ve grown in the last year?",
        "growth",
    ),
    (
        "What is a skill you would like to develop and why?",
        "growth",
    ),
    (
        "Describe a recent challenge. What did you learn from it?",
        "challenge",
    ),
    (
        "What is one fear that has been holding you back lately?",
        "challenge",
    ),
    (
        "If you had a completely free day, how would you spend it creatively?",
        "creativity",
    ),
    (
        "Write about a time when you surprised yourself with your creativity.",
        "creativity",
    ),
    (
        "Write a thank-you letter (you don’t have to send it) to someone who impacted you.",
        "gratitude",
    ),
    (
        "Imagine your best self in five years. What daily habits does that version of you have?",
        "growth",
    ),
];

/// One stored reflection prompt.
#[derive(Debug, Clone)]
pub struct ReflectionPrompt {
    pub text: String,
    pub category: String,
}

/// Reflection line keyed to the average of recent mood scores.
pub fn mood_reflection(recent_scores: &[f64]) -> &'static str {
    if recent_scores.is_empty() {
        return "Take a moment to check in with yourself. \
                How are you really feeling right now, and what do you need?";
    }

    let avg: f64 = recent_scores
        .iter()
        .map(|score| score.clamp(-1.0, 1.0))
        .sum::<f64>()
        / recent_scores.len() as f64;

    if avg >= 0.2 {
        "You've been in a good place lately! \
         What's contributing to your positive energy, and how can you nurture it?"
    } else if avg <= -0.2 {
        "I notice you've been going through a tough time. \
         What's one small thing that brought you comfort or relief recently?"
    } else {
        "Your recent days seem a bit mixed. \
         What patterns do you notice in your mood, and is there one small change \
         you'd like to try this week?"
    }
}
