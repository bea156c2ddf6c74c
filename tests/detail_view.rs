//! Detail aggregation scenarios: cyclic neighbors, counter overlay,
//! partial-data degradation.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{article, fixture, seed, seed_published, timestamp};
use folio::counter::{CounterError, CounterResult, CounterStore};
use folio::{
    ArticleId, ArticleStatus, ArticleStore, DetailAggregator, EngineError, FolioEngine,
    MemoryChannel, MemoryStore, ViewCounter,
};

// === Scenario: neighbors of a middle article are the adjacent ones ===
#[tokio::test]
async fn middle_article_has_adjacent_neighbors() {
    let f = fixture();
    let first = seed_published(&f.store, "first", 2024, 1, 1).await;
    let middle = seed_published(&f.store, "middle", 2024, 2, 1).await;
    let last = seed_published(&f.store, "last", 2024, 3, 1).await;

    let detail = f.engine.get_detail(middle).await.unwrap();
    assert_eq!(detail.previous.unwrap().id, first);
    assert_eq!(detail.next.unwrap().id, last);
}

// === Scenario: wraparound at both ends of the corpus ===
#[tokio::test]
async fn first_article_wraps_to_last_and_vice_versa() {
    let f = fixture();
    let first = seed_published(&f.store, "first", 2024, 1, 1).await;
    seed_published(&f.store, "middle", 2024, 2, 1).await;
    let last = seed_published(&f.store, "last", 2024, 3, 1).await;

    let detail = f.engine.get_detail(first).await.unwrap();
    assert_eq!(detail.previous.unwrap().id, last, "predecessor wraps to last");

    let detail = f.engine.get_detail(last).await.unwrap();
    assert_eq!(detail.next.unwrap().id, first, "successor wraps to first");
}

// === Scenario: drafts and soft-deleted articles are not neighbors ===
#[tokio::test]
async fn ineligible_articles_are_skipped_in_navigation() {
    let f = fixture();
    let first = seed_published(&f.store, "first", 2024, 1, 1).await;
    seed(&f.store, article("draft", ArticleStatus::Draft, timestamp(2024, 2, 1))).await;
    let deleted = seed_published(&f.store, "deleted", 2024, 3, 1).await;
    f.store.set_deleted(&[deleted], true).await.unwrap();
    let last = seed_published(&f.store, "last", 2024, 4, 1).await;

    let detail = f.engine.get_detail(last).await.unwrap();
    assert_eq!(detail.previous.unwrap().id, first);
}

// === Scenario: every read increments and reads back the overlay ===
#[tokio::test]
async fn view_count_comes_from_the_counter_overlay() {
    let f = fixture();
    let id = seed_published(&f.store, "only", 2024, 1, 1).await;

    let detail = f.engine.get_detail(id).await.unwrap();
    assert_eq!(detail.view_count, 1);

    let detail = f.engine.get_detail(id).await.unwrap();
    assert_eq!(detail.view_count, 2, "re-reads keep counting");
}

// === Scenario: missing primary article short-circuits to NotFound ===
#[tokio::test]
async fn missing_article_is_not_found() {
    let f = fixture();
    seed_published(&f.store, "other", 2024, 1, 1).await;

    let result = f.engine.get_detail(999).await;
    assert!(matches!(result, Err(EngineError::NotFound(999))));
}

// === Scenario: neighbor previews are truncated plain text ===
#[tokio::test]
async fn neighbor_summaries_carry_card_previews() {
    let f = fixture();
    seed_published(&f.store, "first", 2024, 1, 1).await;
    let second = seed_published(&f.store, "second", 2024, 2, 1).await;

    let detail = f.engine.get_detail(second).await.unwrap();
    let preview = detail.previous.unwrap().content;
    assert!(preview.chars().count() <= 130);
    assert!(!preview.contains('#'), "markup is stripped: {preview}");
    assert!(!preview.contains("**"));
}

/// Counter store that fails every operation.
struct DeadCounter;

#[async_trait]
impl CounterStore for DeadCounter {
    async fn increment(&self, _key: &str, _member: ArticleId, _delta: f64) -> CounterResult<f64> {
        Err(CounterError::Backend("connection refused".into()))
    }

    async fn score(&self, _key: &str, _member: ArticleId) -> CounterResult<Option<f64>> {
        Err(CounterError::Backend("connection refused".into()))
    }

    async fn all_scores(&self, _key: &str) -> CounterResult<HashMap<ArticleId, f64>> {
        Err(CounterError::Backend("connection refused".into()))
    }
}

// === Scenario: counter failure degrades to the stored count ===
#[tokio::test]
async fn counter_failure_falls_back_to_stored_count() {
    let store = Arc::new(MemoryStore::new());
    let mut stale = article("stale", ArticleStatus::Published, timestamp(2024, 1, 1));
    stale.view_count = 41;
    let id = seed(&store, stale).await;

    let engine = FolioEngine::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(DeadCounter),
        Arc::new(MemoryChannel::new()),
    );

    let detail = engine.get_detail(id).await.unwrap();
    assert_eq!(detail.view_count, 41);
}

// === Scenario: single-article corpus wraps onto itself ===
#[tokio::test]
async fn single_article_is_its_own_neighbor() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_published(&store, "only", 2024, 1, 1).await;

    let aggregator = DetailAggregator::new(
        store.clone(),
        ViewCounter::new(Arc::new(folio::MemoryCounter::new())),
    );
    let detail = aggregator.get_detail(id).await.unwrap();

    assert_eq!(detail.previous.unwrap().id, id);
    assert_eq!(detail.next.unwrap().id, id);
}
