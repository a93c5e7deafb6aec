use crate::journal::{compute_statistics, streak_from_daily, Journal, MoodTrend, StoreError};
use crate::reflection::{mood_reflection, PROMPT_CATEGORIES};
use crate::sqlite::JournalStore;
use chrono::{DateTime, NaiveDate, Utc};
use daybook_core::{Emotion, JournalConfig};
use daybook_mood::{MockGenerator, MoodPipeline};
use std::sync::Arc;

/// Journal over a fresh in-memory store with an offline model backend, so
/// every analysis goes through the rule classifier deterministically.
async fn fixture() -> (Journal, JournalStore) {
    let store = JournalStore::new(":memory:").await.expect("store");
    let pipeline = MoodPipeline::with_generator(Arc::new(MockGenerator::fail("offline")));
    let journal = Journal::new(store.clone(), pipeline, &JournalConfig::default());
    (journal, store)
}

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
}

#[tokio::test]
async fn test_create_and_fetch_entry() {
    let (journal, _store) = fixture().await;

    let (id, mood) = journal
        .create_entry("worried and stressed out", Some("Rough day"))
        .await
        .expect("create");
    assert_eq!(mood.emotion, Emotion::Anxious);
    assert_eq!(mood.score, -0.52);

    let entry = journal.entry(id).await.expect("fetch");
    assert_eq!(entry.title.as_deref(), Some("Rough day"));
    assert_eq!(entry.content, "worried and stressed out");
    assert_eq!(entry.word_count, 4);

    let stored = entry.mood.expect("mood row");
    assert_eq!(stored.emotion, Emotion::Anxious);
    assert_eq!(stored.score, -0.52);
    assert_eq!(stored.confidence, 0.71);
    assert_eq!(stored.keywords, vec!["worried", "stressed"]);
}

#[tokio::test]
async fn test_empty_content_rejected() {
    let (journal, _store) = fixture().await;

    let err = journal.create_entry("   \n ", None).await.unwrap_err();
    assert!(matches!(err, StoreError::EmptyContent));
}

#[tokio::test]
async fn test_oversized_content_rejected() {
    let store = JournalStore::new(":memory:").await.expect("store");
    let pipeline = MoodPipeline::with_generator(Arc::new(MockGenerator::fail("offline")));
    let config = JournalConfig {
        max_entry_chars: 10,
        ..JournalConfig::default()
    };
    let journal = Journal::new(store, pipeline, &config);

    let err = journal
        .create_entry("far more than ten characters", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ContentTooLong { limit: 10 }));
}

#[tokio::test]
async fn test_list_entries_newest_first() {
    let (journal, _store) = fixture().await;

    let (id1, _) = journal.create_entry("the first note", None).await.unwrap();
    let (id2, _) = journal.create_entry("the second note", None).await.unwrap();
    let (id3, _) = journal.create_entry("the third note", None).await.unwrap();

    let all = journal.entries(10).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![id3, id2, id1]);

    let limited = journal.entries(2).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, id3);
}

#[tokio::test]
async fn test_update_refreshes_mood() {
    let (journal, store) = fixture().await;

    let (id, first) = journal
        .create_entry("happy and grateful today", None)
        .await
        .unwrap();
    assert_eq!(first.emotion, Emotion::Happy);

    let second = journal
        .update_entry(id, "worried and stressed out", Some("Changed"))
        .await
        .expect("update");
    assert_eq!(second.emotion, Emotion::Anxious);

    let entry = journal.entry(id).await.unwrap();
    assert_eq!(entry.content, "worried and stressed out");
    assert_eq!(entry.title.as_deref(), Some("Changed"));
    assert_eq!(entry.word_count, 4);
    assert_eq!(entry.mood.expect("mood").emotion, Emotion::Anxious);

    // the old analysis is replaced, not stacked
    assert_eq!(store.mood_row_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_missing_entry() {
    let (journal, _store) = fixture().await;

    let err = journal
        .update_entry(999, "new content", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EntryNotFound(999)));
}

#[tokio::test]
async fn test_delete_cascades_mood_rows() {
    let (journal, store) = fixture().await;

    let (id, _) = journal
        .create_entry("calm and peaceful", None)
        .await
        .unwrap();
    assert_eq!(store.mood_row_count().await.unwrap(), 1);

    assert!(journal.delete_entry(id).await.unwrap());
    assert_eq!(store.mood_row_count().await.unwrap(), 0);
    assert!(matches!(
        journal.entry(id).await.unwrap_err(),
        StoreError::EntryNotFound(_)
    ));

    assert!(!journal.delete_entry(id).await.unwrap());
}

#[tokio::test]
async fn test_search_matches_content_and_title() {
    let (journal, _store) = fixture().await;

    journal
        .create_entry("walked along the beach at sunset", None)
        .await
        .unwrap();
    journal
        .create_entry("stayed home and read", Some("Beach plans cancelled"))
        .await
        .unwrap();
    journal.create_entry("ordinary tuesday", None).await.unwrap();

    let hits = journal.search("beach").await.unwrap();
    assert_eq!(hits.len(), 2);

    assert!(journal.search("").await.unwrap().is_empty());
    assert!(journal.search("zeppelin").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_statistics_over_entries() {
    let (journal, _store) = fixture().await;

    journal
        .create_entry("worried and stressed out", None)
        .await
        .unwrap();
    journal
        .create_entry("happy and grateful and wonderful", None)
        .await
        .unwrap();

    let stats = journal.statistics(30).await.unwrap();
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.emotion_distribution.get(&Emotion::Anxious), Some(&1));
    assert_eq!(stats.emotion_distribution.get(&Emotion::Happy), Some(&1));

    let avg = stats.average_score.expect("average");
    assert!((avg - 0.08).abs() < 1e-9);
    assert_eq!(stats.trend, MoodTrend::Improving);
}

#[tokio::test]
async fn test_statistics_empty_store() {
    let (journal, _store) = fixture().await;

    let stats = journal.statistics(30).await.unwrap();
    assert_eq!(stats.total_entries, 0);
    assert!(stats.average_score.is_none());
    assert!(stats.emotion_distribution.is_empty());
    assert_eq!(stats.trend, MoodTrend::Stable);
}

#[test]
fn test_compute_statistics_trends() {
    let declining = compute_statistics(
        4,
        &[
            (0.8, Emotion::Happy),
            (0.6, Emotion::Happy),
            (-0.5, Emotion::Sad),
            (-0.7, Emotion::Sad),
        ],
    );
    assert_eq!(declining.trend, MoodTrend::Declining);
    assert_eq!(declining.emotion_distribution.get(&Emotion::Sad), Some(&2));

    let stable = compute_statistics(2, &[(0.1, Emotion::Neutral), (0.15, Emotion::Neutral)]);
    assert_eq!(stable.trend, MoodTrend::Stable);

    // a lone sample compares against an empty first half
    let single = compute_statistics(1, &[(0.5, Emotion::Happy)]);
    assert_eq!(single.trend, MoodTrend::Improving);
}

#[test]
fn test_streak_counts_back_from_today() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let scores = vec![
        (noon(2025, 3, 10), Some(0.5)),
        (noon(2025, 3, 9), None),
        (noon(2025, 3, 8), Some(-0.3)),
    ];
    // the unanalyzed day counts as zero, the negative day breaks the run
    assert_eq!(streak_from_daily(&scores, today), 2);
}

#[test]
fn test_streak_edge_cases() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    assert_eq!(streak_from_daily(&[], today), 0);

    let gap = vec![(noon(2025, 3, 10), Some(0.5)), (noon(2025, 3, 8), Some(0.9))];
    assert_eq!(streak_from_daily(&gap, today), 1);

    let negative_today = vec![(noon(2025, 3, 10), Some(-0.2))];
    assert_eq!(streak_from_daily(&negative_today, today), 0);

    // best score of the day wins
    let mixed_day = vec![
        (noon(2025, 3, 10), Some(-0.5)),
        (noon(2025, 3, 10), Some(0.3)),
    ];
    assert_eq!(streak_from_daily(&mixed_day, today), 1);
}

#[tokio::test]
async fn test_mood_streak_from_store() {
    let (journal, _store) = fixture().await;
    assert_eq!(journal.mood_streak().await.unwrap(), 0);

    journal
        .create_entry("calm and peaceful morning", None)
        .await
        .unwrap();
    assert_eq!(journal.mood_streak().await.unwrap(), 1);
}

#[tokio::test]
async fn test_negative_day_gives_no_streak() {
    let (journal, _store) = fixture().await;

    journal
        .create_entry("furious and bitter all evening", None)
        .await
        .unwrap();
    assert_eq!(journal.mood_streak().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reflection_prompts_seeded() {
    let (journal, _store) = fixture().await;

    let any = journal
        .reflection_prompt(None)
        .await
        .unwrap()
        .expect("seeded prompt");
    assert!(!any.text.is_empty());
    assert!(PROMPT_CATEGORIES.contains(&any.category.as_str()));

    let growth = journal
        .reflection_prompt(Some("growth"))
        .await
        .unwrap()
        .expect("growth prompt");
    assert_eq!(growth.category, "growth");

    assert!(journal
        .reflection_prompt(Some("nonsense"))
        .await
        .unwrap()
        .is_none());
}

#[test]
fn test_mood_reflection_lines() {
    assert!(mood_reflection(&[]).contains("check in with yourself"));
    assert!(mood_reflection(&[0.6, 0.4]).contains("good place"));
    assert!(mood_reflection(&[-0.5, -0.4]).contains("tough time"));
    assert!(mood_reflection(&[0.05]).contains("a bit mixed"));
}

#[tokio::test]
async fn test_mood_based_reflection_follows_recent_scores() {
    let (journal, _store) = fixture().await;

    let line = journal.mood_based_reflection().await.unwrap();
    assert!(line.contains("check in with yourself"));

    journal
        .create_entry("happy and grateful and wonderful today", None)
        .await
        .unwrap();
    let line = journal.mood_based_reflection().await.unwrap();
    assert!(line.contains("good place"));
}

#[tokio::test]
async fn test_store_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");

    let _store = JournalStore::new(&path).await.expect("file store");
    assert!(path.exists());
}
