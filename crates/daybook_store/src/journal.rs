//! High-level journal operations: validation, mood analysis, persistence,
//! and the derived statistics the CLI reports.

use crate::sqlite::{EntryRecord, JournalStore};
use crate::reflection::{self, ReflectionPrompt};
use chrono::{DateTime, NaiveDate, Utc};
use daybook_core::{Emotion, JournalConfig, MoodResult};
use daybook_mood::MoodPipeline;
use std::collections::HashMap;
use thiserror::Error;

/// Window used for streak computation. Days further back cannot extend a
/// streak that reaches them anyway.
const STREAK_WINDOW_DAYS: i64 = 60;

/// Number of recent scores the mood-based reflection looks at.
const REFLECTION_SCORES: i64 = 7;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry content cannot be empty")]
    EmptyContent,
    #[error("entry content exceeds {limit} characters")]
    ContentTooLong { limit: usize },
    #[error("entry {0} not found")]
    EntryNotFound(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTrend {
    Improving,
    Stable,
    Declining,
}

impl MoodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "improving",
            MoodTrend::Stable => "stable",
            MoodTrend::Declining => "declining",
        }
    }
}

impl std::fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate mood picture over a trailing window.
#[derive(Debug, Clone)]
pub struct MoodStatistics {
    pub average_score: Option<f64>,
    pub emotion_distribution: HashMap<Emotion, usize>,
    pub trend: MoodTrend,
    pub total_entries: i64,
}

pub struct Journal {
    store: JournalStore,
    pipeline: MoodPipeline,
    max_entry_chars: usize,
}

impl Journal {
    pub fn new(store: JournalStore, pipeline: MoodPipeline, config: &JournalConfig) -> Self {
        Self {
            store,
            pipeline,
            max_entry_chars: config.max_entry_chars,
        }
    }

    /// Create an entry, analyze its mood, and persist both.
    pub async fn create_entry(
        &self,
        content: &str,
        title: Option<&str>,
    ) -> Result<(i64, MoodResult), StoreError> {
        self.validate_content(content)?;

        let word_count = content.split_whitespace().count() as i64;
        tracing::info!("Creating journal entry ({} words)", word_count);

        let mood = self.pipeline.analyze_and_reconcile(content).await;
        let entry_id = self
            .store
            .insert_entry(title, content, word_count, &mood)
            .await?;

        tracing::info!("Journal entry created with id={}", entry_id);
        Ok((entry_id, mood))
    }

    pub async fn entry(&self, entry_id: i64) -> Result<EntryRecord, StoreError> {
        self.store
            .get_entry(entry_id)
            .await?
            .ok_or(StoreError::EntryNotFound(entry_id))
    }

    /// Most recent entries first.
    pub async fn entries(&self, limit: i64) -> Result<Vec<EntryRecord>, StoreError> {
        Ok(self.store.list_entries(limit).await?)
    }

    /// Rewrite an entry and refresh its mood analysis.
    pub async fn update_entry(
        &self,
        entry_id: i64,
        content: &str,
        title: Option<&str>,
    ) -> Result<MoodResult, StoreError> {
        if self.store.get_entry(entry_id).await?.is_none() {
            return Err(StoreError::EntryNotFound(entry_id));
        }
        self.validate_content(content)?;

        let word_count = content.split_whitespace().count() as i64;
        let mood = self.pipeline.analyze_and_reconcile(content).await;

        let updated = self
            .store
            .update_entry(entry_id, title, content, word_count, &mood)
            .await?;
        if !updated {
            return Err(StoreError::EntryNotFound(entry_id));
        }

        tracing::info!("Entry id={} updated", entry_id);
        Ok(mood)
    }

    /// Returns false when the entry does not exist. Mood analyses go with
    /// the entry.
    pub async fn delete_entry(&self, entry_id: i64) -> Result<bool, StoreError> {
        let deleted = self.store.delete_entry(entry_id).await?;
        if deleted {
            tracing::info!("Entry id={} deleted", entry_id);
        } else {
            tracing::warn!("delete: entry id={} not found", entry_id);
        }
        Ok(deleted)
    }

    /// Substring search over content and title. An empty keyword matches
    /// nothing.
    pub async fn search(&self, keyword: &str) -> Result<Vec<EntryRecord>, StoreError> {
        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.search_entries(keyword).await?)
    }

    /// Mood statistics over the last `days` days.
    pub async fn statistics(&self, days: i64) -> Result<MoodStatistics, StoreError> {
        let cutoff = Utc::now() - chrono::Duration::days(days);
        let total_entries = self.store.count_entries_since(cutoff).await?;
        let moods = self.store.moods_since(cutoff).await?;
        Ok(compute_statistics(total_entries, &moods))
    }

    /// Consecutive days, ending today, whose best mood score was
    /// non-negative.
    pub async fn mood_streak(&self) -> Result<u32, StoreError> {
        let scores = self.store.daily_scores(STREAK_WINDOW_DAYS).await?;
        Ok(streak_from_daily(&scores, Utc::now().date_naive()))
    }

    pub async fn reflection_prompt(
        &self,
        category: Option<&str>,
    ) -> Result<Option<ReflectionPrompt>, StoreError> {
        Ok(self.store.random_prompt(category).await?)
    }

    /// Reflection line chosen from the recent mood average.
    pub async fn mood_based_reflection(&self) -> Result<&'static str, StoreError> {
        let scores = self.store.recent_scores(REFLECTION_SCORES).await?;
        Ok(reflection::mood_reflection(&scores))
    }

    fn validate_content(&self, content: &str) -> Result<(), StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        if content.chars().count() > self.max_entry_chars {
            return Err(StoreError::ContentTooLong {
                limit: self.max_entry_chars,
            });
        }
        Ok(())
    }
}

/// Average, per-emotion distribution, and first-half versus second-half
/// trend over an analysis sequence ordered oldest first.
pub(crate) fn compute_statistics(
    total_entries: i64,
    moods: &[(f64, Emotion)],
) -> MoodStatistics {
    if moods.is_empty() {
        return MoodStatistics {
            average_score: None,
            emotion_distribution: HashMap::new(),
            trend: MoodTrend::Stable,
            total_entries,
        };
    }

    let scores: Vec<f64> = moods.iter().map(|(score, _)| *score).collect();
    let average = scores.iter().sum::<f64>() / scores.len() as f64;

    let mut distribution: HashMap<Emotion, usize> = HashMap::new();
    for (_, emotion) in moods {
        *distribution.entry(*emotion).or_insert(0) += 1;
    }

    let mid = scores.len() / 2;
    let first_avg = scores[..mid].iter().sum::<f64>() / mid.max(1) as f64;
    let second_avg = scores[mid..].iter().sum::<f64>() / (scores.len() - mid).max(1) as f64;
    let delta = second_avg - first_avg;

    let trend = if delta > 0.1 {
        MoodTrend::Improving
    } else if delta < -0.1 {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    };

    MoodStatistics {
        average_score: Some(average),
        emotion_distribution: distribution,
        trend,
        total_entries,
    }
}

/// Count back from `today` while each day has an entry whose best score is
/// non-negative. Entries without an analysis count as zero.
pub(crate) fn streak_from_daily(
    scores: &[(DateTime<Utc>, Option<f64>)],
    today: NaiveDate,
) -> u32 {
    let mut by_date: HashMap<NaiveDate, f64> = HashMap::new();
    for (date, score) in scores {
        let day = date.date_naive();
        let score = score.unwrap_or(0.0);
        by_date
            .entry(day)
            .and_modify(|best| {
                if score > *best {
                    *best = score;
                }
            })
            .or_insert(score);
    }

    let mut streak = 0;
    let mut day = today;
    while matches!(by_date.get(&day), Some(score) if *score >= 0.0) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
