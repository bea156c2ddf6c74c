//! Common test fixtures
//!
//! Builds an engine wired to inspectable in-memory collaborators and
//! seeds article corpora for the aggregation scenarios.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use folio::{
    Article, ArticleId, ArticleStatus, ArticleStore, FolioEngine, MemoryChannel, MemoryCounter,
    MemoryStore,
};

/// Engine plus handles to the collaborators behind it.
pub struct Fixture {
    pub engine: FolioEngine,
    pub store: Arc<MemoryStore>,
    pub counter: Arc<MemoryCounter>,
    pub channel: Arc<MemoryChannel>,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let counter = Arc::new(MemoryCounter::new());
    let channel = Arc::new(MemoryChannel::new());
    let engine = FolioEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        counter.clone(),
        channel.clone(),
    );
    Fixture {
        engine,
        store,
        counter,
        channel,
    }
}

pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A markdown body long enough to exercise preview truncation.
pub fn long_body(title: &str) -> String {
    format!(
        "## {title}\n\nSome **rich** text with a [link](https://example.com). {}",
        "The quick brown fox jumps over the lazy dog. ".repeat(10)
    )
}

pub fn article(title: &str, status: ArticleStatus, created_at: DateTime<Utc>) -> Article {
    Article {
        id: 0,
        title: title.to_string(),
        content: long_body(title),
        category_id: None,
        status,
        is_top: false,
        is_featured: false,
        is_delete: false,
        created_at,
        updated_at: created_at,
        view_count: 0,
    }
}

pub async fn seed(store: &MemoryStore, article: Article) -> ArticleId {
    store.insert_article(article).await.unwrap()
}

/// Seed a published article dated to the given day.
pub async fn seed_published(
    store: &MemoryStore,
    title: &str,
    year: i32,
    month: u32,
    day: u32,
) -> ArticleId {
    seed(
        store,
        article(title, ArticleStatus::Published, timestamp(year, month, day)),
    )
    .await
}
