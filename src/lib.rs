//! Folio: Article Aggregation & Tag-Reconciliation Engine
//!
//! The aggregation core of a blog/CMS backend. Folio assembles article
//! detail views from concurrent sub-fetches with cyclic neighbor
//! fallback, reconciles free-text tag names against the tag store with
//! create-if-missing and full link replacement, resolves categories with
//! draft suppression, pages and buckets listings, and notifies a fanout
//! channel when a save leaves an article published.
//!
//! Persistence, counting, and messaging are external collaborators
//! reached through traits; in-memory implementations back the test
//! suite and self-contained engines.
//!
//! # Example
//!
//! ```
//! use folio::FolioEngine;
//!
//! let engine = FolioEngine::in_memory();
//! // Engine is ready for use
//! ```

pub mod aggregate;
pub mod article;
pub mod counter;
mod engine;
pub mod notify;
pub mod preview;
pub mod reconcile;
pub mod store;

pub use aggregate::{group_by_month, DetailAggregator, ListAggregator, Pagination};
pub use article::{
    AdminArticle, AdminArticleView, ArchiveBucket, Article, ArticleId, ArticleInput,
    ArticleStatus, ArticleSummary, Category, CategoryId, DetailView, Page, Tag, TagId, TagLink,
    TopAndFeatured,
};
pub use counter::{CounterError, CounterStore, MemoryCounter, ViewCounter};
pub use engine::{EngineError, EngineResult, FolioEngine};
pub use notify::{MemoryChannel, NotificationChannel, NotifyError, PublishNotifier};
pub use reconcile::{CategoryResolver, TagReconciler};
pub use store::{ArticleFilter, ArticleStore, CategoryStore, MemoryStore, StoreError, TagStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
