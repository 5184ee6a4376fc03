//! Derivation of the rows a table view renders.
//!
//! Everything in this module is pure: given the same collection and the same
//! query, it always produces the same view.
//! 本模块全部为纯函数：相同的集合与查询总是得到相同的视图。

pub mod columns;
pub mod derive;
pub mod filter;
pub mod pagination;
pub mod sort;

pub use columns::{ColumnDefinition, ColumnLayout, ColumnPrefs};
pub use derive::{derive_view, filter_and_sort, ListQuery, ListView};
pub use filter::{FilterPredicate, FilterSet};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE};
pub use sort::{SortDirection, SortStatus};
