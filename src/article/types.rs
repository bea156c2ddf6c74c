//! Article record, summary, and save-input types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the relational collaborator
pub type ArticleId = u64;

/// Publication status of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn is_draft(&self) -> bool {
        matches!(self, ArticleStatus::Draft)
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Published => write!(f, "published"),
        }
    }
}

/// A full article record as held by the relational collaborator.
///
/// `view_count` is the last count durably written back by the embedder;
/// the authoritative count lives in the counter overlay and takes
/// precedence wherever both are available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Markdown body
    pub content: String,
    pub category_id: Option<super::CategoryId>,
    pub status: ArticleStatus,
    pub is_top: bool,
    pub is_featured: bool,
    /// Soft-delete flag; deleted articles stay in the store
    pub is_delete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: u64,
}

impl Article {
    /// Eligible for public listings and neighbor navigation
    pub fn is_eligible(&self) -> bool {
        self.status == ArticleStatus::Published && !self.is_delete
    }
}

/// A card-sized projection of an article for listings and neighbor slots.
///
/// `content` starts as the full markdown body and is truncated to a
/// plain-text preview by the aggregator that hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ArticleSummary {
    pub fn of(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            content: article.content.clone(),
            created_at: article.created_at,
        }
    }
}

/// Input for a save operation, as mapped from the excluded request layer.
///
/// `id` present means this is an update to an existing article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleInput {
    #[serde(default)]
    pub id: Option<ArticleId>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub tag_names: Vec<String>,
    pub status: ArticleStatus,
    #[serde(default)]
    pub is_top: bool,
    #[serde(default)]
    pub is_featured: bool,
}
