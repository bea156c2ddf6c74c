//! Persistence collaborator contracts
//!
//! The relational store is an external collaborator reached through the
//! query/command traits defined here. `MemoryStore` is the in-process
//! reference implementation used by the test suite and by embedders that
//! want a self-contained engine.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{
    ArticleFilter, ArticleStore, CategoryStore, StoreError, StoreResult, TagStore,
};
