//! Storage trait definitions

use async_trait::async_trait;
use thiserror::Error;

use crate::article::{
    AdminArticle, Article, ArticleId, ArticleStatus, ArticleSummary, Category, CategoryId, Tag,
    TagId, TagLink,
};

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article not found: {0}")]
    ArticleNotFound(ArticleId),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Filter criteria for article listings and counts.
///
/// All set fields must match (conjunction). `tag_id` matches through the
/// article-tag link table.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub status: Option<ArticleStatus>,
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub is_delete: Option<bool>,
    pub is_top: Option<bool>,
    pub is_featured: Option<bool>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published and not soft-deleted — the public listing baseline
    pub fn eligible() -> Self {
        Self::new()
            .with_status(ArticleStatus::Published)
            .with_deleted(false)
    }

    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tag(mut self, tag_id: TagId) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn with_deleted(mut self, is_delete: bool) -> Self {
        self.is_delete = Some(is_delete);
        self
    }

    pub fn with_top(mut self, is_top: bool) -> Self {
        self.is_top = Some(is_top);
        self
    }

    pub fn with_featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }
}

/// Article reads and writes against the relational collaborator.
///
/// Neighbor and extreme lookups ("previous", "next", "first", "last")
/// consider eligible articles only (published, not soft-deleted), ordered
/// by article id, and return summaries carrying the full body — preview
/// truncation is the aggregators' job.
///
/// Implementations must be thread-safe (Send + Sync) to support
/// concurrent sub-fetches from the aggregators.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Point lookup by id, soft-deleted rows included
    async fn article(&self, id: ArticleId) -> StoreResult<Option<Article>>;

    /// Nearest eligible article with a lower id
    async fn previous_article(&self, id: ArticleId) -> StoreResult<Option<ArticleSummary>>;

    /// Nearest eligible article with a higher id
    async fn next_article(&self, id: ArticleId) -> StoreResult<Option<ArticleSummary>>;

    /// Lowest-id eligible article
    async fn first_article(&self) -> StoreResult<Option<ArticleSummary>>;

    /// Highest-id eligible article
    async fn last_article(&self) -> StoreResult<Option<ArticleSummary>>;

    /// Count of articles matching the filter
    async fn count(&self, filter: &ArticleFilter) -> StoreResult<u64>;

    /// Page slice of matching articles, newest (highest id) first
    async fn list(
        &self,
        filter: &ArticleFilter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<ArticleSummary>>;

    /// Eligible top/featured articles, top first, then newest first
    async fn list_top_and_featured(&self) -> StoreResult<Vec<ArticleSummary>>;

    /// Page slice of matching articles projected as admin rows
    async fn list_admin(
        &self,
        filter: &ArticleFilter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<AdminArticle>>;

    /// Insert a new article; the store assigns and returns the id
    async fn insert_article(&self, article: Article) -> StoreResult<ArticleId>;

    /// Overwrite an existing article record
    async fn update_article(&self, article: &Article) -> StoreResult<()>;

    /// Update only the top/featured flags
    async fn set_top_featured(
        &self,
        id: ArticleId,
        is_top: bool,
        is_featured: bool,
    ) -> StoreResult<()>;

    /// Batch set the soft-delete flag
    async fn set_deleted(&self, ids: &[ArticleId], is_delete: bool) -> StoreResult<()>;

    /// Hard-remove article rows
    async fn delete_articles(&self, ids: &[ArticleId]) -> StoreResult<()>;
}

/// Tag records and article-tag links.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Existing tags whose name is in `names` (exact, case-sensitive)
    async fn tags_by_names(&self, names: &[String]) -> StoreResult<Vec<Tag>>;

    /// Batch-create tags for the given names, returning assigned ids
    async fn insert_tags(&self, names: Vec<String>) -> StoreResult<Vec<TagId>>;

    /// Remove every link for the article
    async fn delete_links(&self, article_id: ArticleId) -> StoreResult<()>;

    /// Batch insert links
    async fn insert_links(&self, links: Vec<TagLink>) -> StoreResult<()>;

    /// Current links for an article
    async fn links_for_article(&self, article_id: ArticleId) -> StoreResult<Vec<TagLink>>;

    /// Number of links carrying the tag
    async fn count_links_by_tag(&self, tag_id: TagId) -> StoreResult<u64>;

    /// Names of the tags linked to an article
    async fn tag_names_for_article(&self, article_id: ArticleId) -> StoreResult<Vec<String>>;
}

/// Category records. Lookup and first-creation only; this crate never
/// renames or merges categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    async fn category_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    async fn insert_category(&self, name: &str) -> StoreResult<Category>;
}
