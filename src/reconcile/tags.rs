//! Tag reconciliation: requested names -> canonical tag ids -> links

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::article::{ArticleId, TagLink};
use crate::store::{StoreResult, TagStore};

/// Resolves a requested set of tag names into tag ids, creating missing
/// tags, and rewrites the article's link set wholesale.
///
/// The rewrite is a non-atomic two-step (invalidate old links, write new
/// ones). Concurrent reconciliations for the same article id interleave
/// unsafely; callers that allow concurrent edits of one article must
/// serialize them, one reconciliation in flight per article id.
pub struct TagReconciler {
    tags: Arc<dyn TagStore>,
}

impl TagReconciler {
    pub fn new(tags: Arc<dyn TagStore>) -> Self {
        Self { tags }
    }

    /// Replace the article's tag associations with exactly the distinct
    /// requested names.
    ///
    /// `is_update` marks a save of an existing article, whose old links
    /// are invalidated first. An empty request leaves the article with
    /// zero tags. Re-running with the same names yields the same link
    /// set — no duplicate tags, no duplicate links.
    pub async fn reconcile(
        &self,
        article_id: ArticleId,
        requested_names: &[String],
        is_update: bool,
    ) -> StoreResult<()> {
        if is_update {
            self.tags.delete_links(article_id).await?;
        }
        if requested_names.is_empty() {
            return Ok(());
        }

        let existing = self.tags.tags_by_names(requested_names).await?;
        let existing_names: HashSet<&str> = existing.iter().map(|t| t.name.as_str()).collect();
        let mut tag_ids: Vec<_> = existing.iter().map(|t| t.id).collect();

        // Distinct requested names with no record yet, in request order
        let mut seen = HashSet::new();
        let missing: Vec<String> = requested_names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .filter(|name| !existing_names.contains(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            debug!(article_id, created = missing.len(), "creating missing tags");
            tag_ids.extend(self.tags.insert_tags(missing).await?);
        }

        let links = tag_ids
            .into_iter()
            .map(|tag_id| TagLink { article_id, tag_id })
            .collect();
        self.tags.insert_links(links).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    async fn link_names(store: &MemoryStore, article_id: ArticleId) -> Vec<String> {
        let mut names = store.tag_names_for_article(article_id).await.unwrap();
        names.sort();
        names
    }

    #[tokio::test]
    async fn creates_missing_tags_and_links() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        reconciler
            .reconcile(1, &names(&["rust", "async"]), false)
            .await
            .unwrap();

        assert_eq!(link_names(&store, 1).await, names(&["async", "rust"]));
    }

    #[tokio::test]
    async fn reuses_existing_tags() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        reconciler.reconcile(1, &names(&["rust"]), false).await.unwrap();
        reconciler.reconcile(2, &names(&["rust", "tokio"]), false).await.unwrap();

        let rust = &store.tags_by_names(&names(&["rust"])).await.unwrap();
        assert_eq!(rust.len(), 1);
        assert_eq!(store.count_links_by_tag(rust[0].id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_requested_names_collapse() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        reconciler
            .reconcile(1, &names(&["rust", "rust", "rust"]), false)
            .await
            .unwrap();

        assert_eq!(store.links_for_article(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_the_whole_link_set() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        reconciler.reconcile(1, &names(&["old", "keep"]), false).await.unwrap();
        reconciler.reconcile(1, &names(&["keep", "new"]), true).await.unwrap();

        assert_eq!(link_names(&store, 1).await, names(&["keep", "new"]));
    }

    #[tokio::test]
    async fn reconcile_is_idempotent_per_name_set() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        let set = names(&["a", "b", "c"]);
        reconciler.reconcile(1, &set, false).await.unwrap();
        let first: Vec<_> = store.links_for_article(1).await.unwrap();

        reconciler.reconcile(1, &set, true).await.unwrap();
        let second: Vec<_> = store.links_for_article(1).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_request_on_update_clears_links() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = TagReconciler::new(store.clone());

        reconciler.reconcile(1, &names(&["rust"]), false).await.unwrap();
        reconciler.reconcile(1, &[], true).await.unwrap();

        assert!(store.links_for_article(1).await.unwrap().is_empty());
    }
}
