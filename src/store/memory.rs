//! In-memory reference implementation of the storage traits
//!
//! Backs the test suite and self-contained engines. Articles live in a
//! `BTreeMap` keyed by id so neighbor and extreme lookups are ordered
//! scans, matching the relational collaborator's ordered-neighbor queries.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::article::{
    AdminArticle, Article, ArticleId, ArticleSummary, Category, CategoryId, Tag, TagId, TagLink,
};

use super::traits::{
    ArticleFilter, ArticleStore, CategoryStore, StoreError, StoreResult, TagStore,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<BTreeMap<ArticleId, Article>>,
    tags: RwLock<Vec<Tag>>,
    links: RwLock<Vec<TagLink>>,
    categories: RwLock<Vec<Category>>,
    next_article_id: AtomicU64,
    next_tag_id: AtomicU64,
    next_category_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(&self, article: &Article, filter: &ArticleFilter) -> bool {
        if let Some(status) = filter.status {
            if article.status != status {
                return false;
            }
        }
        if let Some(category_id) = filter.category_id {
            if article.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(is_delete) = filter.is_delete {
            if article.is_delete != is_delete {
                return false;
            }
        }
        if let Some(is_top) = filter.is_top {
            if article.is_top != is_top {
                return false;
            }
        }
        if let Some(is_featured) = filter.is_featured {
            if article.is_featured != is_featured {
                return false;
            }
        }
        if let Some(tag_id) = filter.tag_id {
            let links = self.links.read().unwrap();
            if !links
                .iter()
                .any(|l| l.article_id == article.id && l.tag_id == tag_id)
            {
                return false;
            }
        }
        true
    }

    /// Matching articles, newest (highest id) first
    fn matching(&self, filter: &ArticleFilter) -> Vec<Article> {
        let articles = self.articles.read().unwrap();
        articles
            .values()
            .rev()
            .filter(|a| self.matches(a, filter))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn article(&self, id: ArticleId) -> StoreResult<Option<Article>> {
        Ok(self.articles.read().unwrap().get(&id).cloned())
    }

    async fn previous_article(&self, id: ArticleId) -> StoreResult<Option<ArticleSummary>> {
        let articles = self.articles.read().unwrap();
        Ok(articles
            .range(..id)
            .rev()
            .map(|(_, a)| a)
            .find(|a| a.is_eligible())
            .map(ArticleSummary::of))
    }

    async fn next_article(&self, id: ArticleId) -> StoreResult<Option<ArticleSummary>> {
        let articles = self.articles.read().unwrap();
        Ok(articles
            .range(id + 1..)
            .map(|(_, a)| a)
            .find(|a| a.is_eligible())
            .map(ArticleSummary::of))
    }

    async fn first_article(&self) -> StoreResult<Option<ArticleSummary>> {
        let articles = self.articles.read().unwrap();
        Ok(articles
            .values()
            .find(|a| a.is_eligible())
            .map(ArticleSummary::of))
    }

    async fn last_article(&self) -> StoreResult<Option<ArticleSummary>> {
        let articles = self.articles.read().unwrap();
        Ok(articles
            .values()
            .rev()
            .find(|a| a.is_eligible())
            .map(ArticleSummary::of))
    }

    async fn count(&self, filter: &ArticleFilter) -> StoreResult<u64> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn list(
        &self,
        filter: &ArticleFilter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<ArticleSummary>> {
        Ok(self
            .matching(filter)
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(ArticleSummary::of)
            .collect())
    }

    async fn list_top_and_featured(&self) -> StoreResult<Vec<ArticleSummary>> {
        let mut highlights: Vec<Article> = {
            let articles = self.articles.read().unwrap();
            articles
                .values()
                .filter(|a| a.is_eligible() && (a.is_top || a.is_featured))
                .cloned()
                .collect()
        };
        highlights.sort_by(|a, b| b.is_top.cmp(&a.is_top).then(b.id.cmp(&a.id)));
        Ok(highlights.iter().map(ArticleSummary::of).collect())
    }

    async fn list_admin(
        &self,
        filter: &ArticleFilter,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<AdminArticle>> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|a| AdminArticle {
                id: a.id,
                title: a.title,
                status: a.status,
                is_top: a.is_top,
                is_featured: a.is_featured,
                is_delete: a.is_delete,
                created_at: a.created_at,
                view_count: a.view_count,
            })
            .collect())
    }

    async fn insert_article(&self, mut article: Article) -> StoreResult<ArticleId> {
        let id = self.next_article_id.fetch_add(1, Ordering::SeqCst) + 1;
        article.id = id;
        self.articles.write().unwrap().insert(id, article);
        Ok(id)
    }

    async fn update_article(&self, article: &Article) -> StoreResult<()> {
        let mut articles = self.articles.write().unwrap();
        match articles.get_mut(&article.id) {
            Some(slot) => {
                *slot = article.clone();
                Ok(())
            }
            None => Err(StoreError::ArticleNotFound(article.id)),
        }
    }

    async fn set_top_featured(
        &self,
        id: ArticleId,
        is_top: bool,
        is_featured: bool,
    ) -> StoreResult<()> {
        let mut articles = self.articles.write().unwrap();
        match articles.get_mut(&id) {
            Some(article) => {
                article.is_top = is_top;
                article.is_featured = is_featured;
                Ok(())
            }
            None => Err(StoreError::ArticleNotFound(id)),
        }
    }

    async fn set_deleted(&self, ids: &[ArticleId], is_delete: bool) -> StoreResult<()> {
        let mut articles = self.articles.write().unwrap();
        for id in ids {
            if let Some(article) = articles.get_mut(id) {
                article.is_delete = is_delete;
            }
        }
        Ok(())
    }

    async fn delete_articles(&self, ids: &[ArticleId]) -> StoreResult<()> {
        let mut articles = self.articles.write().unwrap();
        for id in ids {
            articles.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn tags_by_names(&self, names: &[String]) -> StoreResult<Vec<Tag>> {
        let tags = self.tags.read().unwrap();
        Ok(tags
            .iter()
            .filter(|t| names.contains(&t.name))
            .cloned()
            .collect())
    }

    async fn insert_tags(&self, names: Vec<String>) -> StoreResult<Vec<TagId>> {
        let mut tags = self.tags.write().unwrap();
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            // Name uniqueness: a racing insert for the same name yields
            // the already-assigned id instead of a duplicate record.
            if let Some(existing) = tags.iter().find(|t| t.name == name) {
                ids.push(existing.id);
                continue;
            }
            let id = self.next_tag_id.fetch_add(1, Ordering::SeqCst) + 1;
            tags.push(Tag { id, name });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn delete_links(&self, article_id: ArticleId) -> StoreResult<()> {
        self.links
            .write()
            .unwrap()
            .retain(|l| l.article_id != article_id);
        Ok(())
    }

    async fn insert_links(&self, links: Vec<TagLink>) -> StoreResult<()> {
        self.links.write().unwrap().extend(links);
        Ok(())
    }

    async fn links_for_article(&self, article_id: ArticleId) -> StoreResult<Vec<TagLink>> {
        let links = self.links.read().unwrap();
        Ok(links
            .iter()
            .filter(|l| l.article_id == article_id)
            .copied()
            .collect())
    }

    async fn count_links_by_tag(&self, tag_id: TagId) -> StoreResult<u64> {
        let links = self.links.read().unwrap();
        Ok(links.iter().filter(|l| l.tag_id == tag_id).count() as u64)
    }

    async fn tag_names_for_article(&self, article_id: ArticleId) -> StoreResult<Vec<String>> {
        let links = self.links.read().unwrap();
        let tags = self.tags.read().unwrap();
        Ok(links
            .iter()
            .filter(|l| l.article_id == article_id)
            .filter_map(|l| tags.iter().find(|t| t.id == l.tag_id))
            .map(|t| t.name.clone())
            .collect())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().unwrap();
        Ok(categories.iter().find(|c| c.name == name).cloned())
    }

    async fn category_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().unwrap();
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, name: &str) -> StoreResult<Category> {
        let mut categories = self.categories.write().unwrap();
        if categories.iter().any(|c| c.name == name) {
            return Err(StoreError::Conflict(format!(
                "category already exists: {name}"
            )));
        }
        let id = self.next_category_id.fetch_add(1, Ordering::SeqCst) + 1;
        let category = Category {
            id,
            name: name.to_string(),
        };
        categories.push(category.clone());
        Ok(category)
    }
}
