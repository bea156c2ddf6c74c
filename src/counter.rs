//! View-count overlay over the external ordered counter store
//!
//! The counter store (a Redis-style sorted set in production) is the
//! authoritative, fast-changing source for view counts; the count
//! embedded in an article record is only a last-known fallback.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::article::ArticleId;

/// Counter-set key holding per-article view counts
pub const ARTICLE_VIEWS_KEY: &str = "article_views_count";

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("counter backend error: {0}")]
    Backend(String),
}

pub type CounterResult<T> = Result<T, CounterError>;

/// Ordered counter store contract: increment-by-delta plus score reads.
///
/// Increments are commutative, so no per-article locking is required.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str, member: ArticleId, delta: f64) -> CounterResult<f64>;

    async fn score(&self, key: &str, member: ArticleId) -> CounterResult<Option<f64>>;

    async fn all_scores(&self, key: &str) -> CounterResult<HashMap<ArticleId, f64>>;
}

/// Thin wrapper binding the counter store to the article-views key.
#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<dyn CounterStore>,
    key: String,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            store,
            key: ARTICLE_VIEWS_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Record one view
    pub async fn increment(&self, article_id: ArticleId) -> CounterResult<f64> {
        self.store.increment(&self.key, article_id, 1.0).await
    }

    pub async fn score(&self, article_id: ArticleId) -> CounterResult<Option<f64>> {
        self.store.score(&self.key, article_id).await
    }

    pub async fn all_scores(&self) -> CounterResult<HashMap<ArticleId, f64>> {
        self.store.all_scores(&self.key).await
    }
}

/// In-memory counter store for tests and self-contained engines.
#[derive(Debug, Default)]
pub struct MemoryCounter {
    sets: DashMap<String, DashMap<ArticleId, f64>>,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounter {
    async fn increment(&self, key: &str, member: ArticleId, delta: f64) -> CounterResult<f64> {
        let set = self.sets.entry(key.to_string()).or_default();
        let mut score = set.entry(member).or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    async fn score(&self, key: &str, member: ArticleId) -> CounterResult<Option<f64>> {
        Ok(self
            .sets
            .get(key)
            .and_then(|set| set.get(&member).map(|s| *s)))
    }

    async fn all_scores(&self, key: &str) -> CounterResult<HashMap<ArticleId, f64>> {
        Ok(self
            .sets
            .get(key)
            .map(|set| set.iter().map(|e| (*e.key(), *e.value())).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn increment_accumulates_per_member() {
        let counter = ViewCounter::new(Arc::new(MemoryCounter::new()));
        counter.increment(1).await.unwrap();
        counter.increment(1).await.unwrap();
        counter.increment(2).await.unwrap();

        assert_eq!(counter.score(1).await.unwrap(), Some(2.0));
        assert_eq!(counter.score(2).await.unwrap(), Some(1.0));
        assert_eq!(counter.score(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn all_scores_returns_the_whole_set() {
        let counter = ViewCounter::new(Arc::new(MemoryCounter::new()));
        counter.increment(10).await.unwrap();
        counter.increment(11).await.unwrap();

        let scores = counter.all_scores().await.unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[&10], 1.0);
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let store = Arc::new(MemoryCounter::new());
        let views = ViewCounter::new(store.clone());
        let other = ViewCounter::new(store).with_key("talk_views_count");

        views.increment(1).await.unwrap();
        assert_eq!(other.score(1).await.unwrap(), None);
    }
}
