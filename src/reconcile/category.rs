//! Draft-aware category find-or-create

use std::sync::Arc;

use tracing::debug;

use crate::article::{ArticleStatus, Category, CategoryId};
use crate::store::{CategoryStore, StoreResult};

/// Finds or creates a category by exact name.
///
/// Draft saves never spawn new categories: a draft naming an unseen
/// category resolves to `None` with no write.
pub struct CategoryResolver {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryResolver {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    pub async fn resolve(
        &self,
        name: &str,
        status: ArticleStatus,
    ) -> StoreResult<Option<Category>> {
        if let Some(existing) = self.categories.category_by_name(name).await? {
            return Ok(Some(existing));
        }
        if status.is_draft() {
            return Ok(None);
        }
        debug!(category = name, "creating category on first publish");
        self.categories.insert_category(name).await.map(Some)
    }

    /// Name of an existing category, if any.
    pub async fn category_name(&self, id: CategoryId) -> StoreResult<Option<String>> {
        Ok(self.categories.category_by_id(id).await?.map(|c| c.name))
    }
}
