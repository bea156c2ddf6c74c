//! Multi-source aggregation
//!
//! The aggregators fan independent sub-fetches out onto the tokio pool
//! and suspend only at the join point. Ordering between sub-fetches is
//! unspecified; ordering within a merged result is deterministic.

mod archive;
mod detail;
mod list;

pub use archive::group_by_month;
pub use detail::DetailAggregator;
pub use list::{ListAggregator, Pagination};
