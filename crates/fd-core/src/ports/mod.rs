//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! that talks to the REST API, holds the query cache, stores preferences and
//! shows notifications. The application layer only ever sees these traits.
//! 端口定义了用例与基础设施之间的契约，应用层只依赖这些 trait。

pub mod clock;
pub mod column_prefs;
pub mod entity_api;
pub mod errors;
pub mod notification;
pub mod query_cache;

pub use clock::ClockPort;
pub use column_prefs::ColumnPrefsPort;
pub use entity_api::EntityApiPort;
pub use errors::{ApiError, GENERIC_ERROR_MESSAGE};
pub use notification::NotificationPort;
pub use query_cache::{CacheValue, FetchTicket, QueryCachePort};
