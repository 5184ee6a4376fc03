use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};

/// Next temporary id handed out for optimistic creates.
static NEXT_TEMPORARY_ID: AtomicI64 = AtomicI64::new(-1);

/// Identifier of a business record.
///
/// Server-assigned ids are strictly positive. Negative ids are reserved for
/// records synthesised locally before the server confirms a create.
/// 服务端分配的 ID 恒为正数，负数保留给乐观创建的临时记录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Allocate a temporary id for an optimistic create.
    ///
    /// Ids come from a process-wide, monotonically decreasing counter, so they
    /// never repeat within a session and never collide with a server id.
    pub fn temporary() -> Self {
        Self(NEXT_TEMPORARY_ID.fetch_sub(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_temporary(&self) -> bool {
        self.0 < 0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_ids_are_negative_and_unique() {
        let a = EntityId::temporary();
        let b = EntityId::temporary();

        assert!(a.is_temporary());
        assert!(b.is_temporary());
        assert_ne!(a, b);
        assert!(b < a, "counter must keep decreasing");
    }

    #[test]
    fn test_server_id_is_not_temporary() {
        assert!(!EntityId::new(42).is_temporary());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&EntityId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
