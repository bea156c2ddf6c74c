//! Transient view types assembled per request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Article, ArticleId, ArticleStatus, ArticleSummary};

/// The single-article detail view: the article itself, its neighbor
/// slots (cyclic — see the detail aggregator), and the authoritative
/// view count read from the counter overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub article: Article,
    pub previous: Option<ArticleSummary>,
    pub next: Option<ArticleSummary>,
    pub view_count: u64,
}

/// One page of a listing plus the total match count.
///
/// The count and the slice are computed concurrently and are not
/// transactionally consistent with each other; a write racing the two
/// queries may skew the total by a row. Accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Articles of one (year, month), in retrieval order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveBucket {
    pub year: i32,
    pub month: u32,
    pub articles: Vec<ArticleSummary>,
}

/// The home-page highlight block: one top article and up to two
/// featured cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopAndFeatured {
    pub top: Option<ArticleSummary>,
    pub featured: Vec<ArticleSummary>,
}

/// An admin listing row. `view_count` is overlaid from the counter
/// store when a score exists for the article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminArticle {
    pub id: ArticleId,
    pub title: String,
    pub status: ArticleStatus,
    pub is_top: bool,
    pub is_featured: bool,
    pub is_delete: bool,
    pub created_at: DateTime<Utc>,
    pub view_count: u64,
}

/// The admin edit view: the full record plus resolved taxonomy names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminArticleView {
    pub article: Article,
    pub category_name: Option<String>,
    pub tag_names: Vec<String>,
}
