//! ID type wrappers for type safety.

pub mod entity_id;
pub mod query_key;

pub use entity_id::EntityId;
pub use query_key::QueryKey;
