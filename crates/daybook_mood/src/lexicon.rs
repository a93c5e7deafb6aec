//! Static emotion keyword tables and tokenization.
//!
//! Shared by the classifier and the validator so both count evidence the
//! same way. All tables are process-wide immutable constants.

use daybook_core::Emotion;
use std::collections::HashSet;

const HAPPY: &[&str] = &[
    "happy", "joy", "joyful", "excited", "excitement", "proud", "pride",
    "wonderful", "amazing", "fantastic", "great", "excellent", "awesome",
    "brilliant", "delighted", "delight", "grateful", "gratitude", "blessed",
    "thrilled", "elated", "cheerful", "content", "pleased", "glad",
    "celebrating", "celebrate", "achievement", "accomplished", "success",
    "love", "loved", "loving", "beautiful", "incredible", "euphoric",
];

const SAD: &[&str] = &[
    "sad", "sadness", "unhappy", "down", "depressed", "depression",
    "disappointed", "disappointment", "miserable", "misery", "grief",
    "grieving", "heartbroken", "devastated", "devastation", "hopeless",
    "hopelessness", "crying", "cried", "tears", "lonely", "loneliness",
    "loss", "lost", "empty", "emptiness", "heavy", "hurt", "pain",
    "rejected", "rejection", "failure", "failed", "worthless", "helpless",
    "gloomy", "melancholy", "sorrow", "sorrowful", "suffering", "suffer",
    "ache", "aching", "miss", "missing", "missed",
];

const ANXIOUS: &[&str] = &[
    "anxious", "anxiety", "worried", "worry", "worrying", "stress",
    "stressed", "stressful", "nervous", "nervousness", "overwhelmed",
    "overwhelming", "panic", "panicking", "scared", "fear", "fearful",
    "afraid", "dread", "dreading", "tense", "tension", "uneasy",
    "unease", "restless", "restlessness", "uncertain", "uncertainty",
    "overthinking", "racing", "overthink",
];

const CALM: &[&str] = &[
    "calm", "peaceful", "peace", "relaxed", "relaxing", "relax",
    "serene", "serenity", "tranquil", "tranquility", "content",
    "contentment", "comfortable", "patient", "patience", "grounded",
    "present", "mindful", "mindfulness", "gentle", "stillness", "still",
    "quiet", "steady", "slow", "breathe", "breathing", "meditate",
    "meditation", "balanced", "harmony", "ease",
];

const ANGRY: &[&str] = &[
    "angry", "anger", "furious", "fury", "rage", "raging", "mad",
    "frustrated", "frustration", "irritated", "irritation", "annoyed",
    "annoyance", "outraged", "outrage", "infuriated", "livid", "fuming",
    "resentful", "resentment", "bitter", "bitterness", "hostile",
    "hatred", "hate", "disgusted", "disgust",
];

const NEUTRAL: &[&str] = &[
    "okay", "fine", "alright", "regular", "normal", "usual", "average",
    "ordinary", "standard", "typical", "moderate", "so-so",
];

/// Words excluded from keyword extraction. The bare contraction stems
/// (couldn, didn, ...) appear because the tokenizer splits on apostrophes.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can",
    "had", "her", "was", "one", "our", "out", "day", "get", "has",
    "him", "his", "how", "its", "may", "now", "off", "old", "own",
    "say", "she", "too", "use", "way", "who", "with", "this", "that",
    "have", "from", "they", "will", "been", "were", "said", "each",
    "which", "their", "there", "what", "when", "where", "would",
    "make", "like", "into", "just", "know", "take", "than", "them",
    "well", "also", "back", "after", "even", "most", "such", "through",
    "those", "then", "about", "should", "since", "could", "still",
    "really", "today", "because", "right", "always", "never", "every",
    "feel", "feels", "felt", "seem", "seems", "seemed",
    "think", "thought", "trying", "tried", "want", "wanted",
    "went", "made", "came", "woke", "spent", "couldn",
    "didn", "doesn", "isn", "wasn", "hasn", "haven", "hadn",
    "myself", "yourself", "himself", "herself", "itself",
    "sometimes", "something", "anything", "nothing", "everything",
    "though", "although", "while", "until", "unless",
    "pass", "must", "much", "many", "more", "some", "same",
];

/// Keyword bucket for an emotion.
pub fn keywords_for(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Happy => HAPPY,
        Emotion::Sad => SAD,
        Emotion::Anxious => ANXIOUS,
        Emotion::Calm => CALM,
        Emotion::Angry => ANGRY,
        Emotion::Neutral => NEUTRAL,
    }
}

/// Lowercase the text, replace everything that is not a word character with
/// a space, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count distinct keyword hits per emotion, whole-word only. Repeated uses
/// of the same keyword count once. Order follows `Emotion::ALL` so callers
/// get a stable tie-break.
pub fn match_counts(tokens: &[String]) -> [(Emotion, usize); 6] {
    let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    Emotion::ALL.map(|emotion| {
        let count = keywords_for(emotion)
            .iter()
            .filter(|kw| token_set.contains(*kw))
            .count();
        (emotion, count)
    })
}

/// Evidence count for one emotion in an already-computed table.
pub fn count_for(counts: &[(Emotion, usize); 6], emotion: Emotion) -> usize {
    counts
        .iter()
        .find(|(e, _)| *e == emotion)
        .map_or(0, |(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        let tokens = tokenize("Today was AMAZING! Truly, truly great.");
        assert_eq!(
            tokens,
            vec!["today", "was", "amazing", "truly", "truly", "great"]
        );
    }

    #[test]
    fn test_tokenize_splits_contractions() {
        let tokens = tokenize("I couldn't sleep");
        assert_eq!(tokens, vec!["i", "couldn", "t", "sleep"]);
    }

    #[test]
    fn test_whole_word_matching_only() {
        // "happiness" must not count as "happy"
        let counts = match_counts(&tokenize("happiness is elusive"));
        assert_eq!(count_for(&counts, Emotion::Happy), 0);

        let counts = match_counts(&tokenize("I feel happy"));
        assert_eq!(count_for(&counts, Emotion::Happy), 1);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let counts = match_counts(&tokenize("worried worried worried"));
        assert_eq!(count_for(&counts, Emotion::Anxious), 1);
    }

    #[test]
    fn test_distinct_keywords_accumulate() {
        let counts = match_counts(&tokenize("worried and stressed and nervous"));
        assert_eq!(count_for(&counts, Emotion::Anxious), 3);
    }

    #[test]
    fn test_counts_follow_declaration_order() {
        let counts = match_counts(&tokenize(""));
        let order: Vec<Emotion> = counts.iter().map(|(e, _)| *e).collect();
        assert_eq!(order, Emotion::ALL.to_vec());
    }
}
