//! Listing aggregation: concurrent count + page slice

use std::sync::Arc;

use crate::article::{ArticleSummary, Page};
use crate::engine::{EngineError, EngineResult};
use crate::preview::truncate_summaries;
use crate::store::{ArticleFilter, ArticleStore};

/// 1-based page selection.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u64,
    pub size: u64,
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.size
    }
}

/// Runs the total-count query and the page-slice query concurrently over
/// the same logical filter and joins both into a `Page`.
///
/// The two queries see no common snapshot; a write landing between them
/// may skew the total against the slice. Accepted inconsistency window.
pub struct ListAggregator {
    articles: Arc<dyn ArticleStore>,
}

impl ListAggregator {
    pub fn new(articles: Arc<dyn ArticleStore>) -> Self {
        Self { articles }
    }

    pub async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
        preview_chars: usize,
    ) -> EngineResult<Page<ArticleSummary>> {
        let store = Arc::clone(&self.articles);
        let count_filter = filter.clone();
        let total = tokio::spawn(async move { store.count(&count_filter).await });

        // The slice runs on the calling path while the count is in flight
        let mut items = self.articles.list(filter, page.offset(), page.size).await?;
        truncate_summaries(&mut items, preview_chars);

        let total = total.await.map_err(|e| EngineError::Task(e.to_string()))??;
        Ok(Page { items, total })
    }
}
