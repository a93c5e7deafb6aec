use crate::reflection::{ReflectionPrompt, SEED_PROMPTS};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use daybook_core::{Emotion, MoodResult};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use std::path::Path;

/// One journal entry as stored, with its mood analysis when present.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub title: Option<String>,
    pub content: String,
    pub word_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub mood: Option<MoodRecord>,
}

#[derive(Debug, Clone)]
pub struct MoodRecord {
    pub score: f64,
    pub emotion: Emotion,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct JournalStore {
    pool: Pool<Sqlite>,
}

impl JournalStore {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_url = if db_path.as_ref() == Path::new(":memory:") {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", db_path.as_ref().display())
        };
        let pool = SqlitePoolOptions::new()
            // Single connection; the journal has one writer and SQLite
            // in-memory databases are per-connection.
            .max_connections(1)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON").execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&db_url)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date INTEGER NOT NULL,
                title TEXT,
                content TEXT NOT NULL,
                word_count INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create journal_entries table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mood_analyses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id INTEGER NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
                mood_score REAL NOT NULL CHECK (mood_score >= -1.0 AND mood_score <= 1.0),
                dominant_emotion TEXT NOT NULL CHECK (
                    dominant_emotion IN ('happy', 'sad', 'anxious', 'calm', 'angry', 'neutral')
                ),
                confidence REAL NOT NULL CHECK (confidence >= 0.0 AND confidence <= 1.0),
                keywords TEXT,
                analyzed_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create mood_analyses table")?;

        // Index for fast mood lookup by entry
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_mood_analyses_entry ON mood_analyses(entry_id)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create mood_analyses entry index")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reflection_prompts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                prompt_text TEXT NOT NULL,
                category TEXT NOT NULL CHECK (
                    category IN ('gratitude', 'growth', 'challenge', 'creativity')
                ),
                is_active INTEGER NOT NULL DEFAULT 1
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create reflection_prompts table")?;

        self.seed_prompts().await?;
        Ok(())
    }

    /// Insert the default reflection prompts once, on first run.
    async fn seed_prompts(&self) -> Result<()> {
        let row = sqlx::query("SELECT COUNT(id) AS n FROM reflection_prompts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count reflection prompts")?;
        let existing: i64 = row.get("n");

        if existing > 0 {
            return Ok(());
        }

        tracing::info!("Seeding default reflection prompts");
        let mut tx = self.pool.begin().await?;
        for (text, category) in SEED_PROMPTS {
            sqlx::query("INSERT INTO reflection_prompts (prompt_text, category) VALUES (?, ?)")
                .bind(text)
                .bind(category)
                .execute(&mut *tx)
                .await
                .context("Failed to seed reflection prompt")?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Insert an entry and its mood analysis in one transaction.
    /// Returns the new entry id.
    pub async fn insert_entry(
        &self,
        title: Option<&str>,
        content: &str,
        word_count: i64,
        mood: &MoodResult,
    ) -> Result<i64> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO journal_entries (date, title, content, word_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(now)
        .bind(title)
        .bind(content)
        .bind(word_count)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .context("Failed to insert journal entry")?;
        let entry_id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO mood_analyses (entry_id, mood_score, dominant_emotion, confidence, keywords, analyzed_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry_id)
        .bind(mood.score)
        .bind(mood.emotion.as_str())
        .bind(mood.confidence)
        .bind(encode_keywords(&mood.keywords))
        .bind(now)
        .execute(&mut *tx)
        .await
        .context("Failed to insert mood analysis")?;

        tx.commit().await?;
        Ok(entry_id)
    }

    /// Rewrite an entry and replace its mood analysis. Returns false when
    /// the entry does not exist.
    pub async fn update_entry(
        &self,
        entry_id: i64,
        title: Option<&str>,
        content: &str,
        word_count: i64,
        mood: &MoodResult,
    ) -> Result<bool> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE journal_entries SET title = ?, content = ?, word_count = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(title)
        .bind(content)
        .bind(word_count)
        .bind(now)
        .bind(entry_id)
        .execute(&mut *tx)
        .await
        .context("Failed to update journal entry")?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM mood_analyses WHERE entry_id = ?")
            .bind(entry_id)
            .execute(&mut *tx)
            .await
            .context("Failed to clear old mood analysis")?;

        sqlx::query(
            "INSERT INTO mood_analyses (entry_id, mood_score, dominant_emotion, confidence, keywords, analyzed_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry_id)
        .bind(mood.score)
        .bind(mood.emotion.as_str())
        .bind(mood.confidence)
        .bind(encode_keywords(&mood.keywords))
        .bind(now)
        .execute(&mut *tx)
        .await
        .context("Failed to insert refreshed mood analysis")?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn get_entry(&self, entry_id: i64) -> Result<Option<EntryRecord>> {
        let row = sqlx::query(
            "SELECT e.id, e.date, e.title, e.content, e.word_count, e.created_at, e.updated_at,
                    m.mood_score, m.dominant_emotion, m.confidence, m.keywords, m.analyzed_at
             FROM journal_entries e
             LEFT JOIN mood_analyses m ON m.entry_id = e.id
             WHERE e.id = ?
             ORDER BY m.analyzed_at DESC
             LIMIT 1",
        )
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch journal entry")?;

        row.map(|r| entry_from_row(&r)).transpose()
    }

    /// Most recent entries first.
    pub async fn list_entries(&self, limit: i64) -> Result<Vec<EntryRecord>> {
        let rows = sqlx::query(
            "SELECT e.id, e.date, e.title, e.content, e.word_count, e.created_at, e.updated_at,
                    m.mood_score, m.dominant_emotion, m.confidence, m.keywords, m.analyzed_at
             FROM journal_entries e
             LEFT JOIN mood_analyses m ON m.entry_id = e.id
             ORDER BY e.date DESC, e.id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list journal entries")?;

        rows.iter().map(entry_from_row).collect()
    }

    /// Substring search over content and title, newest first.
    pub async fn search_entries(&self, keyword: &str) -> Result<Vec<EntryRecord>> {
        let pattern = format!("%{}%", keyword.trim());
        let rows = sqlx::query(
            "SELECT e.id, e.date, e.title, e.content, e.word_count, e.created_at, e.updated_at,
                    m.mood_score, m.dominant_emotion, m.confidence, m.keywords, m.analyzed_at
             FROM journal_entries e
             LEFT JOIN mood_analyses m ON m.entry_id = e.id
             WHERE e.content LIKE ? OR e.title LIKE ?
             ORDER BY e.date DESC, e.id DESC",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .context("Failed to search journal entries")?;

        rows.iter().map(entry_from_row).collect()
    }

    pub async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete journal entry")?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_entries_since(&self, cutoff: DateTime<Utc>) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(id) AS n FROM journal_entries WHERE date >= ?")
            .bind(cutoff.timestamp())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count journal entries")?;
        Ok(row.get("n"))
    }

    /// Mood samples for entries since the cutoff, oldest analysis first.
    pub async fn moods_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<(f64, Emotion)>> {
        let rows = sqlx::query(
            "SELECT m.mood_score, m.dominant_emotion
             FROM mood_analyses m
             JOIN journal_entries e ON m.entry_id = e.id
             WHERE e.date >= ?
             ORDER BY m.analyzed_at ASC, m.id ASC",
        )
        .bind(cutoff.timestamp())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch mood history")?;

        rows.iter()
            .map(|row| -> Result<(f64, Emotion)> {
                let score: f64 = row.get("mood_score");
                let label: String = row.get("dominant_emotion");
                let emotion = label.parse::<Emotion>()?;
                Ok((score, emotion))
            })
            .collect()
    }

    /// Entry dates with their mood scores over the trailing window,
    /// newest first. Entries without an analysis carry no score.
    pub async fn daily_scores(&self, days: i64) -> Result<Vec<(DateTime<Utc>, Option<f64>)>> {
        let cutoff = Utc::now() - chrono::Duration::days(days);
        let rows = sqlx::query(
            "SELECT e.date, m.mood_score
             FROM journal_entries e
             LEFT JOIN mood_analyses m ON m.entry_id = e.id
             WHERE e.date >= ?
             ORDER BY e.date DESC",
        )
        .bind(cutoff.timestamp())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch daily mood scores")?;

        Ok(rows
            .iter()
            .map(|row| {
                let date: i64 = row.get("date");
                let score: Option<f64> = row.get("mood_score");
                (utc_from_secs(date), score)
            })
            .collect())
    }

    /// Latest mood scores, newest first.
    pub async fn recent_scores(&self, limit: i64) -> Result<Vec<f64>> {
        let rows = sqlx::query(
            "SELECT m.mood_score
             FROM mood_analyses m
             JOIN journal_entries e ON m.entry_id = e.id
             ORDER BY e.date DESC, e.id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent mood scores")?;

        Ok(rows.iter().map(|row| row.get("mood_score")).collect())
    }

    /// One active reflection prompt at random, optionally within a category.
    pub async fn random_prompt(&self, category: Option<&str>) -> Result<Option<ReflectionPrompt>> {
        let row = match category {
            Some(category) => {
                sqlx::query(
                    "SELECT prompt_text, category FROM reflection_prompts
                     WHERE is_active = 1 AND category = ?
                     ORDER BY RANDOM() LIMIT 1",
                )
                .bind(category)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT prompt_text, category FROM reflection_prompts
                     WHERE is_active = 1
                     ORDER BY RANDOM() LIMIT 1",
                )
                .fetch_optional(&self.pool)
                .await
            }
        }
        .context("Failed to fetch reflection prompt")?;

        Ok(row.map(|row| ReflectionPrompt {
            text: row.get("prompt_text"),
            category: row.get("category"),
        }))
    }

    #[cfg(test)]
    pub(crate) async fn mood_row_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(id) AS n FROM mood_analyses")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<EntryRecord> {
    let emotion_label: Option<String> = row.get("dominant_emotion");

    let mood = emotion_label
        .map(|label| -> Result<MoodRecord> {
            let analyzed_at: i64 = row.get("analyzed_at");
            Ok(MoodRecord {
                score: row.get("mood_score"),
                emotion: label.parse::<Emotion>()?,
                confidence: row.get("confidence"),
                keywords: decode_keywords(row.get("keywords")),
                analyzed_at: utc_from_secs(analyzed_at),
            })
        })
        .transpose()?;

    let date: i64 = row.get("date");
    let created_at: i64 = row.get("created_at");
    let updated_at: i64 = row.get("updated_at");

    Ok(EntryRecord {
        id: row.get("id"),
        date: utc_from_secs(date),
        title: row.get("title"),
        content: row.get("content"),
        word_count: row.get("word_count"),
        created_at: utc_from_secs(created_at),
        updated_at: utc_from_secs(updated_at),
        mood,
    })
}

/// Keywords are stored as one comma-separated column; empty lists as NULL.
fn encode_keywords(keywords: &[String]) -> Option<String> {
    if keywords.is_empty() {
        None
    } else {
        Some(keywords.join(","))
    }
}

fn decode_keywords(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::to_string)
            .filter(|k| !k.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn utc_from_secs(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
