//! Terminal rendering for entries, moods and statistics.

use chrono::{DateTime, Utc};
use daybook_core::{Emotion, MoodResult};
use daybook_store::{EntryRecord, MoodStatistics};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn emotion_emoji(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "😊",
        Emotion::Sad => "😢",
        Emotion::Anxious => "😰",
        Emotion::Calm => "😌",
        Emotion::Angry => "😠",
        Emotion::Neutral => "😐",
    }
}

fn emotion_ansi(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "\x1b[35m",   // magenta
        Emotion::Sad => "\x1b[34m",     // blue
        Emotion::Anxious => "\x1b[33m", // yellow
        Emotion::Calm => "\x1b[32m",    // green
        Emotion::Angry => "\x1b[31m",   // red
        Emotion::Neutral => "\x1b[37m", // gray
    }
}

/// One-line mood summary printed after write/edit/analyze.
pub fn mood_line(mood: &MoodResult) -> String {
    format!(
        "Mood: {}{}{} {} {} (score {:+.2}, confidence {:.0}%)  keywords: {}",
        emotion_ansi(mood.emotion),
        BOLD,
        mood.emotion,
        RESET,
        emotion_emoji(mood.emotion),
        mood.score,
        mood.confidence * 100.0,
        mood.keywords.join(", "),
    )
}

/// Compact one-line listing for `list` and `search`.
pub fn entry_line(entry: &EntryRecord) -> String {
    let badge = match &entry.mood {
        Some(mood) => format!(
            "{}{}{} {}",
            emotion_ansi(mood.emotion),
            mood.emotion,
            RESET,
            emotion_emoji(mood.emotion)
        ),
        None => "unanalyzed".to_string(),
    };
    format!(
        "{:>4}  {}  {:<10} {}",
        entry.id,
        short_date(entry.date),
        badge,
        preview(entry.title.as_deref(), &entry.content),
    )
}

/// Full entry view for `show`.
pub fn format_entry(entry: &EntryRecord) -> String {
    let mut out = String::new();

    let title = entry.title.as_deref().unwrap_or("(untitled)");
    out.push_str(&format!("{}Entry {} — {}{}\n", BOLD, entry.id, title, RESET));
    out.push_str(&format!(
        "{}Written {}  ({} words)",
        DIM,
        short_date(entry.date),
        entry.word_count
    ));
    if entry.updated_at > entry.created_at {
        out.push_str(&format!(", edited {}", short_date(entry.updated_at)));
    }
    out.push_str(RESET);
    out.push_str("\n\n");

    out.push_str(&entry.content);
    out.push('\n');

    if let Some(mood) = &entry.mood {
        out.push('\n');
        out.push_str(&mood_line(&MoodResult {
            score: mood.score,
            emotion: mood.emotion,
            confidence: mood.confidence,
            keywords: mood.keywords.clone(),
        }));
        out.push('\n');
    }

    out
}

/// Statistics block for `stats`.
pub fn format_stats(stats: &MoodStatistics, streak: u32, days: i64) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}Mood over the last {} days{}\n",
        BOLD, days, RESET
    ));
    out.push_str(&format!("  Entries:       {}\n", stats.total_entries));

    match stats.average_score {
        Some(avg) => {
            let face = if avg >= 0.2 {
                emotion_emoji(Emotion::Happy)
            } else if avg <= -0.2 {
                emotion_emoji(Emotion::Sad)
            } else {
                emotion_emoji(Emotion::Neutral)
            };
            out.push_str(&format!("  Average mood:  {:+.2} {}\n", avg, face));
        }
        None => out.push_str("  Average mood:  no analyses yet\n"),
    }

    out.push_str(&format!("  Trend:         {}\n", stats.trend));
    out.push_str(&format!("  Streak:        {} day(s)\n", streak));

    if !stats.emotion_distribution.is_empty() {
        out.push_str("  Emotions:\n");
        // fixed order so the output is stable run to run
        for emotion in Emotion::ALL {
            if let Some(count) = stats.emotion_distribution.get(&emotion) {
                out.push_str(&format!(
                    "    {} {:<8} {}\n",
                    emotion_emoji(emotion),
                    emotion,
                    "▇".repeat(*count)
                ));
            }
        }
    }

    out
}

fn short_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Title when present, otherwise the first few words of the content.
fn preview(title: Option<&str>, content: &str) -> String {
    if let Some(title) = title {
        if !title.trim().is_empty() {
            return title.trim().to_string();
        }
    }
    let words: Vec<&str> = content.split_whitespace().take(8).collect();
    let mut line = words.join(" ");
    if content.split_whitespace().count() > 8 {
        line.push('…');
    }
    line
}
