//! Article domain types
//!
//! Articles and their taxonomy (tags, categories) are owned by the
//! external persistence collaborators; this crate only orchestrates
//! reads and writes through them. The view types (detail view, archive
//! buckets, pages) are transient — computed per request, never stored.

mod taxonomy;
mod types;
mod views;

pub use taxonomy::{Category, CategoryId, Tag, TagId, TagLink};
pub use types::{Article, ArticleId, ArticleInput, ArticleStatus, ArticleSummary};
pub use views::{AdminArticle, AdminArticleView, ArchiveBucket, DetailView, Page, TopAndFeatured};
