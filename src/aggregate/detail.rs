//! Detail-view aggregation with cyclic neighbor fallback

use std::sync::Arc;

use tokio::task::JoinError;
use tracing::warn;

use crate::article::{ArticleId, ArticleSummary, DetailView};
use crate::counter::ViewCounter;
use crate::engine::{EngineError, EngineResult};
use crate::preview::{truncate_summaries, CARD_PREVIEW_CHARS};
use crate::store::{ArticleStore, StoreResult};

/// Assembles the single-article detail view from concurrent sub-fetches:
/// the article itself, its predecessor, its successor, and the view count.
///
/// Neighbor slots wrap around: the first article's predecessor is the
/// last-ordered eligible article and the last article's successor is the
/// first-ordered one, so a non-empty corpus always browses cyclically.
/// Preserved from observed product behavior — do not "fix" to None.
pub struct DetailAggregator {
    articles: Arc<dyn ArticleStore>,
    counter: ViewCounter,
}

impl DetailAggregator {
    pub fn new(articles: Arc<dyn ArticleStore>, counter: ViewCounter) -> Self {
        Self { articles, counter }
    }

    pub async fn get_detail(&self, id: ArticleId) -> EngineResult<DetailView> {
        // Every read counts, cache-style re-reads included. A failed
        // increment degrades the count, never the request.
        if let Err(error) = self.counter.increment(id).await {
            warn!(article_id = id, %error, "view counter increment failed");
        }

        let store = Arc::clone(&self.articles);
        let primary = tokio::spawn(async move { store.article(id).await });

        let store = Arc::clone(&self.articles);
        let previous = tokio::spawn(async move {
            match store.previous_article(id).await? {
                Some(summary) => Ok(Some(summary)),
                None => store.last_article().await,
            }
        });

        let store = Arc::clone(&self.articles);
        let next = tokio::spawn(async move {
            match store.next_article(id).await? {
                Some(summary) => Ok(Some(summary)),
                None => store.first_article().await,
            }
        });

        // Join all three; when the primary is missing the siblings have
        // already run to completion and their results are discarded.
        let (primary, previous, next) = tokio::join!(primary, previous, next);

        let article = primary
            .map_err(|e| EngineError::Task(e.to_string()))??
            .ok_or(EngineError::NotFound(id))?;

        let mut previous = absorb(previous, id, "predecessor");
        let mut next = absorb(next, id, "successor");
        truncate_summaries(previous.as_mut_slice(), CARD_PREVIEW_CHARS);
        truncate_summaries(next.as_mut_slice(), CARD_PREVIEW_CHARS);

        // The overlay wins over the stored count; a failed read falls
        // back to the last-known count on the record.
        let view_count = match self.counter.score(id).await {
            Ok(Some(score)) => score as u64,
            Ok(None) => article.view_count,
            Err(error) => {
                warn!(article_id = id, %error, "view counter read failed");
                article.view_count
            }
        };

        Ok(DetailView {
            article,
            previous,
            next,
            view_count,
        })
    }
}

/// Collapse a neighbor sub-fetch outcome, absorbing failures into an
/// empty slot.
fn absorb(
    outcome: Result<StoreResult<Option<ArticleSummary>>, JoinError>,
    article_id: ArticleId,
    slot: &str,
) -> Option<ArticleSummary> {
    match outcome {
        Ok(Ok(summary)) => summary,
        Ok(Err(error)) => {
            warn!(article_id, slot, %error, "neighbor fetch failed");
            None
        }
        Err(error) => {
            warn!(article_id, slot, %error, "neighbor task failed");
            None
        }
    }
}
