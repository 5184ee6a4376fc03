use async_trait::async_trait;

use crate::ids::QueryKey;

/// Cached value of one slot. JSON keeps slots heterogeneous and makes
/// snapshots comparable with deep equality.
pub type CacheValue = serde_json::Value;

/// Proof that a fetch started at a given request generation of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn new(key: QueryKey, generation: u64) -> Self {
        Self { key, generation }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Client-side request cache.
///
/// The optimistic mutation controller relies on `get`, `set`, `cancel` and
/// `invalidate` only. The fetch-ticket operations are used by queries to drop
/// responses that a newer request (or a cancellation) has superseded.
#[async_trait]
pub trait QueryCachePort: Send + Sync {
    fn get(&self, key: &QueryKey) -> Option<CacheValue>;

    /// Replace the slot. `None` clears it.
    fn set(&self, key: &QueryKey, value: Option<CacheValue>);

    /// Cancel outstanding fetches of `key`: their responses must not land.
    async fn cancel(&self, key: &QueryKey);

    /// Mark `key` stale so the next read refetches it.
    async fn invalidate(&self, key: &QueryKey);

    /// Start a fetch of `key`, superseding any fetch started before.
    fn begin_fetch(&self, key: &QueryKey) -> FetchTicket;

    /// Store a fetch result if its ticket is still current.
    ///
    /// Returns `false` (and stores nothing) when the ticket was superseded.
    fn complete_fetch(&self, ticket: &FetchTicket, value: CacheValue) -> bool;

    /// True when the slot is absent, invalidated, or older than the stale time.
    fn is_stale(&self, key: &QueryKey) -> bool;

    /// Keys currently marked invalidated.
    fn invalidated_keys(&self) -> Vec<QueryKey>;
}
