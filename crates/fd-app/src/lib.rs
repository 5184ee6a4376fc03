//! FirmDesk Application Layer
//!
//! Use cases sitting between the UI and the ports: list-page state, cached
//! queries and the optimistic mutation controller.
//! 位于 UI 与端口之间的用例：列表页状态、缓存查询与乐观更新控制器。

pub mod app;
pub mod deps;
pub mod list_page;
pub mod mutation;
pub mod query;

pub use app::App;
pub use deps::AppDeps;
pub use list_page::{ListPageConfig, ListPageState};
pub use mutation::{EntityMutations, MutationController, MutationError, MutationPlan};
pub use query::{EntityQueries, QueryError, QueryResult};
