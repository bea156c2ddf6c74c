//! FolioEngine: the main entry point for the aggregation core
//!
//! Orchestrates the save workflow (category resolution, persistence
//! write, tag reconciliation, publish notification) and the read-side
//! aggregations over the external collaborators.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::aggregate::{group_by_month, DetailAggregator, ListAggregator, Pagination};
use crate::article::{
    AdminArticle, AdminArticleView, ArchiveBucket, Article, ArticleId, ArticleInput,
    ArticleSummary, CategoryId, DetailView, Page, TagId, TopAndFeatured,
};
use crate::counter::{CounterStore, MemoryCounter, ViewCounter};
use crate::notify::{MemoryChannel, NotificationChannel, PublishNotifier};
use crate::preview::{truncate_summaries, CARD_PREVIEW_CHARS, LIST_PREVIEW_CHARS};
use crate::reconcile::{CategoryResolver, TagReconciler};
use crate::store::{ArticleFilter, ArticleStore, CategoryStore, MemoryStore, StoreError, TagStore};

/// Errors that can occur in engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("article not found: {0}")]
    NotFound(ArticleId),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The article row committed but its tag links did not — a partial
    /// failure the caller must report distinctly from a full save failure.
    #[error("tag reconciliation failed for article {article_id}: {source}")]
    Reconciliation {
        article_id: ArticleId,
        source: StoreError,
    },

    #[error("task join error: {0}")]
    Task(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// The aggregation core of the blog backend.
///
/// Owns no storage; every collaborator is reached through its trait.
/// Callers that allow concurrent edits of one article must serialize
/// them (see [`TagReconciler`]).
pub struct FolioEngine {
    articles: Arc<dyn ArticleStore>,
    tags: Arc<dyn TagStore>,
    counter: ViewCounter,
    reconciler: TagReconciler,
    resolver: CategoryResolver,
    notifier: PublishNotifier,
    detail: DetailAggregator,
    lists: ListAggregator,
}

impl FolioEngine {
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        tags: Arc<dyn TagStore>,
        categories: Arc<dyn CategoryStore>,
        counter: Arc<dyn CounterStore>,
        channel: Arc<dyn NotificationChannel>,
    ) -> Self {
        let counter = ViewCounter::new(counter);
        Self {
            detail: DetailAggregator::new(Arc::clone(&articles), counter.clone()),
            lists: ListAggregator::new(Arc::clone(&articles)),
            reconciler: TagReconciler::new(Arc::clone(&tags)),
            resolver: CategoryResolver::new(categories),
            notifier: PublishNotifier::new(channel),
            counter,
            tags,
            articles,
        }
    }

    /// Fully self-contained engine over the in-memory collaborators.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(MemoryCounter::new()),
            Arc::new(MemoryChannel::new()),
        )
    }

    // === Save workflow ===

    /// Save or update an article: resolve the category, write the record,
    /// reconcile tags, and notify subscribers when the result is published.
    pub async fn save_article(&self, input: ArticleInput) -> EngineResult<ArticleId> {
        let category = match input.category_name.as_deref() {
            Some(name) => self.resolver.resolve(name, input.status).await?,
            None => None,
        };
        let category_id = category.map(|c| c.id);

        let is_update = input.id.is_some();
        let now = Utc::now();
        let article = match input.id {
            Some(id) => {
                let existing = self
                    .articles
                    .article(id)
                    .await?
                    .ok_or(EngineError::NotFound(id))?;
                let article = Article {
                    id,
                    title: input.title,
                    content: input.content,
                    category_id,
                    status: input.status,
                    is_top: input.is_top,
                    is_featured: input.is_featured,
                    is_delete: existing.is_delete,
                    created_at: existing.created_at,
                    updated_at: now,
                    view_count: existing.view_count,
                };
                self.articles.update_article(&article).await?;
                article
            }
            None => {
                let article = Article {
                    id: 0,
                    title: input.title,
                    content: input.content,
                    category_id,
                    status: input.status,
                    is_top: input.is_top,
                    is_featured: input.is_featured,
                    is_delete: false,
                    created_at: now,
                    updated_at: now,
                    view_count: 0,
                };
                let id = self.articles.insert_article(article.clone()).await?;
                Article { id, ..article }
            }
        };
        debug!(article_id = article.id, is_update, "article row committed");

        // The row is committed at this point; a link failure is the
        // partial-failure state the caller reports distinctly.
        self.reconciler
            .reconcile(article.id, &input.tag_names, is_update)
            .await
            .map_err(|source| EngineError::Reconciliation {
                article_id: article.id,
                source,
            })?;

        self.notifier.notify_if_published(&article).await;
        Ok(article.id)
    }

    /// Update only the top/featured flags.
    pub async fn set_top_featured(
        &self,
        id: ArticleId,
        is_top: bool,
        is_featured: bool,
    ) -> EngineResult<()> {
        self.articles
            .set_top_featured(id, is_top, is_featured)
            .await?;
        Ok(())
    }

    /// Batch soft-delete or restore.
    pub async fn set_deleted(&self, ids: &[ArticleId], is_delete: bool) -> EngineResult<()> {
        self.articles.set_deleted(ids, is_delete).await?;
        Ok(())
    }

    /// Hard-remove articles and their tag links.
    pub async fn delete_articles(&self, ids: &[ArticleId]) -> EngineResult<()> {
        for id in ids {
            self.tags.delete_links(*id).await?;
        }
        self.articles.delete_articles(ids).await?;
        Ok(())
    }

    // === Read-side aggregations ===

    /// Single-article detail view with cyclic neighbors and the counter
    /// overlay.
    pub async fn get_detail(&self, id: ArticleId) -> EngineResult<DetailView> {
        self.detail.get_detail(id).await
    }

    /// Public listing of eligible articles, newest first.
    pub async fn list_articles(&self, page: Pagination) -> EngineResult<Page<ArticleSummary>> {
        self.lists
            .list(&ArticleFilter::eligible(), page, LIST_PREVIEW_CHARS)
            .await
    }

    /// Eligible articles of one category.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: Pagination,
    ) -> EngineResult<Page<ArticleSummary>> {
        let filter = ArticleFilter::eligible().with_category(category_id);
        self.lists.list(&filter, page, LIST_PREVIEW_CHARS).await
    }

    /// Eligible articles carrying one tag. The total counts the tag's
    /// links, matching the link-table count the original backend exposes.
    pub async fn list_by_tag(
        &self,
        tag_id: TagId,
        page: Pagination,
    ) -> EngineResult<Page<ArticleSummary>> {
        let tags = Arc::clone(&self.tags);
        let total = tokio::spawn(async move { tags.count_links_by_tag(tag_id).await });

        let filter = ArticleFilter::eligible().with_tag(tag_id);
        let mut items = self.articles.list(&filter, page.offset(), page.size).await?;
        truncate_summaries(&mut items, CARD_PREVIEW_CHARS);

        let total = total.await.map_err(|e| EngineError::Task(e.to_string()))??;
        Ok(Page { items, total })
    }

    /// One page of eligible articles grouped into (year, month) buckets,
    /// newest bucket first. The total is the eligible-article count.
    pub async fn list_archives(&self, page: Pagination) -> EngineResult<Page<ArchiveBucket>> {
        let articles = self
            .lists
            .list(&ArticleFilter::eligible(), page, LIST_PREVIEW_CHARS)
            .await?;
        Ok(Page {
            items: group_by_month(articles.items),
            total: articles.total,
        })
    }

    /// The home-page highlight block: the top article plus up to two
    /// featured cards.
    pub async fn top_and_featured(&self) -> EngineResult<TopAndFeatured> {
        let mut cards = self.articles.list_top_and_featured().await?;
        cards.truncate(3);
        truncate_summaries(&mut cards, CARD_PREVIEW_CHARS);

        if cards.is_empty() {
            return Ok(TopAndFeatured::default());
        }
        let top = cards.remove(0);
        Ok(TopAndFeatured {
            top: Some(top),
            featured: cards,
        })
    }

    /// Admin listing with view counts overlaid from the counter store.
    /// Rows without a score, or a failed counter read, keep the stored
    /// counts.
    pub async fn list_admin(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
    ) -> EngineResult<Page<AdminArticle>> {
        let store = Arc::clone(&self.articles);
        let count_filter = filter.clone();
        let total = tokio::spawn(async move { store.count(&count_filter).await });

        let mut items = self
            .articles
            .list_admin(filter, page.offset(), page.size)
            .await?;
        match self.counter.all_scores().await {
            Ok(scores) => {
                for item in &mut items {
                    if let Some(score) = scores.get(&item.id) {
                        item.view_count = *score as u64;
                    }
                }
            }
            Err(error) => warn!(%error, "view counter overlay unavailable for admin listing"),
        }

        let total = total.await.map_err(|e| EngineError::Task(e.to_string()))??;
        Ok(Page { items, total })
    }

    /// Admin edit view: the full record plus category name and tag names.
    pub async fn admin_article(&self, id: ArticleId) -> EngineResult<AdminArticleView> {
        let article = self
            .articles
            .article(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;

        let category_name = match article.category_id {
            Some(category_id) => self
                .resolver
                .category_name(category_id)
                .await?,
            None => None,
        };
        let tag_names = self.tags.tag_names_for_article(id).await?;

        Ok(AdminArticleView {
            article,
            category_name,
            tag_names,
        })
    }
}
