//! Name-based reconciliation against the taxonomy stores
//!
//! Converts requested name sets into canonical identifier sets, creating
//! missing records as needed: tags with full link replacement, categories
//! with draft-aware find-or-create.

mod category;
mod tags;

pub use category::CategoryResolver;
pub use tags::TagReconciler;
