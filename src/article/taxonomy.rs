//! Tags, tag links, and categories

use serde::{Deserialize, Serialize};

use super::ArticleId;

pub type TagId = u64;
pub type CategoryId = u64;

/// A tag record. Names are unique within the active tag set; once a name
/// is reconciled it maps to exactly one id for the lifetime of the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// An (article, tag) association. The complete set for an article is
/// replaced wholesale on reconciliation, never diffed incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagLink {
    pub article_id: ArticleId,
    pub tag_id: TagId,
}

/// A category record. Created at most once per distinct name and never
/// mutated by this crate afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
