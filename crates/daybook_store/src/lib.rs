pub mod journal;
pub mod reflection;
pub mod sqlite;

pub use journal::{Journal, MoodStatistics, MoodTrend, StoreError};
pub use reflection::{mood_reflection, ReflectionPrompt, PROMPT_CATEGORIES};
pub use sqlite::{EntryRecord, JournalStore, MoodRecord};

#[cfg(test)]
mod tests;
