use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use fd_core::config::CacheConfig;
use fd_core::ports::{CacheValue, ClockPort, FetchTicket, QueryCachePort};
use fd_core::QueryKey;
use tracing::debug;

use crate::time::SystemClock;

#[derive(Debug)]
struct Slot {
    value: Option<CacheValue>,
    updated_at: i64,
    invalidated: bool,
    /// Generation of the newest fetch or cancellation of this key.
    generation: u64,
}

/// Process-local query cache.
///
/// Generations come from one cache-wide counter, so a ticket can never match
/// a slot that was evicted and recreated after the ticket was issued.
/// 请求代号来自全局计数器，被淘汰后重建的槽位不会接受旧票据。
pub struct InMemoryQueryCache {
    clock: Arc<dyn ClockPort>,
    stale_time_ms: i64,
    gc_time_ms: i64,
    next_generation: AtomicU64,
    slots: RwLock<HashMap<QueryKey, Slot>>,
}

impl Default for InMemoryQueryCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), &CacheConfig::default())
    }
}

impl InMemoryQueryCache {
    pub fn new(clock: Arc<dyn ClockPort>, config: &CacheConfig) -> Self {
        Self {
            clock,
            stale_time_ms: config.stale_time_ms(),
            gc_time_ms: config.gc_time_ms(),
            next_generation: AtomicU64::new(1),
            slots: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    fn empty_slot(&self) -> Slot {
        Slot {
            value: None,
            updated_at: self.clock.now_ms(),
            invalidated: false,
            generation: 0,
        }
    }

    /// Evict slots not written for longer than the GC time. Returns how many
    /// slots were evicted.
    pub fn collect_garbage(&self) -> usize {
        let now = self.clock.now_ms();
        let mut slots = self.write();
        let before = slots.len();
        slots.retain(|_, slot| now - slot.updated_at <= self.gc_time_ms);
        let evicted = before - slots.len();
        if evicted > 0 {
            debug!(evicted, "Evicted expired cache slots");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[async_trait]
impl QueryCachePort for InMemoryQueryCache {
    fn get(&self, key: &QueryKey) -> Option<CacheValue> {
        self.read().get(key).and_then(|slot| slot.value.clone())
    }

    fn set(&self, key: &QueryKey, value: Option<CacheValue>) {
        let now = self.clock.now_ms();
        let mut slots = self.write();
        let slot = slots.entry(key.clone()).or_insert_with(|| self.empty_slot());
        slot.value = value;
        slot.updated_at = now;
        slot.invalidated = false;
    }

    async fn cancel(&self, key: &QueryKey) {
        let generation = self.bump();
        if let Some(slot) = self.write().get_mut(key) {
            slot.generation = generation;
        }
    }

    /// Marks a cached slot. Keys without a cached value are left alone: there
    /// is nothing to refresh and the next read fetches them anyway.
    async fn invalidate(&self, key: &QueryKey) {
        if let Some(slot) = self.write().get_mut(key) {
            if slot.value.is_some() {
                slot.invalidated = true;
            }
        }
    }

    fn begin_fetch(&self, key: &QueryKey) -> FetchTicket {
        let generation = self.bump();
        let mut slots = self.write();
        let slot = slots.entry(key.clone()).or_insert_with(|| self.empty_slot());
        slot.generation = generation;
        FetchTicket::new(key.clone(), generation)
    }

    fn complete_fetch(&self, ticket: &FetchTicket, value: CacheValue) -> bool {
        let now = self.clock.now_ms();
        let mut slots = self.write();
        match slots.get_mut(ticket.key()) {
            Some(slot) if slot.generation == ticket.generation() => {
                slot.value = Some(value);
                slot.updated_at = now;
                slot.invalidated = false;
                true
            }
            _ => false,
        }
    }

    fn is_stale(&self, key: &QueryKey) -> bool {
        let now = self.clock.now_ms();
        match self.read().get(key) {
            Some(slot) if slot.value.is_some() => {
                slot.invalidated || now - slot.updated_at >= self.stale_time_ms
            }
            _ => true,
        }
    }

    fn invalidated_keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self
            .read()
            .iter()
            .filter(|(_, slot)| slot.invalidated)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use fd_core::{EntityId, ResourceKind};
    use serde_json::json;

    fn cache_with_clock() -> (InMemoryQueryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        let config = CacheConfig {
            stale_time_secs: 10,
            gc_time_secs: 60,
        };
        (InMemoryQueryCache::new(clock.clone(), &config), clock)
    }

    fn customers() -> QueryKey {
        QueryKey::collection(ResourceKind::Customers)
    }

    #[test]
    fn test_set_none_clears_slot() {
        let (cache, _) = cache_with_clock();
        cache.set(&customers(), Some(json!([1])));
        cache.set(&customers(), None);
        assert_eq!(cache.get(&customers()), None);
        assert!(cache.is_stale(&customers()));
    }

    #[test]
    fn test_newer_fetch_supersedes_older_ticket() {
        let (cache, _) = cache_with_clock();
        let first = cache.begin_fetch(&customers());
        let second = cache.begin_fetch(&customers());

        assert!(cache.complete_fetch(&second, json!(["new"])));
        assert!(!cache.complete_fetch(&first, json!(["old"])));
        assert_eq!(cache.get(&customers()), Some(json!(["new"])));
    }

    #[tokio::test]
    async fn test_cancel_rejects_outstanding_ticket() {
        let (cache, _) = cache_with_clock();
        let ticket = cache.begin_fetch(&customers());
        cache.cancel(&customers()).await;
        assert!(!cache.complete_fetch(&ticket, json!([])));
        assert_eq!(cache.get(&customers()), None);
    }

    #[tokio::test]
    async fn test_invalidate_marks_only_cached_slot() {
        let (cache, _) = cache_with_clock();
        let entity = QueryKey::entity(ResourceKind::Customers, EntityId::new(7));
        cache.set(&customers(), Some(json!([])));

        cache.invalidate(&customers()).await;
        cache.invalidate(&entity).await;

        assert_eq!(cache.invalidated_keys(), vec![customers()]);
        assert!(cache.is_stale(&customers()));
        // The value stays readable until the refetch lands.
        assert_eq!(cache.get(&customers()), Some(json!([])));
    }

    #[test]
    fn test_staleness_follows_clock() {
        let (cache, clock) = cache_with_clock();
        cache.set(&customers(), Some(json!([])));
        assert!(!cache.is_stale(&customers()));

        clock.advance_ms(10_000);
        assert!(cache.is_stale(&customers()));
    }

    #[tokio::test]
    async fn test_completed_fetch_clears_invalidation() {
        let (cache, _) = cache_with_clock();
        cache.set(&customers(), Some(json!([])));
        cache.invalidate(&customers()).await;

        let ticket = cache.begin_fetch(&customers());
        assert!(cache.complete_fetch(&ticket, json!([{"id": 1}])));
        assert!(cache.invalidated_keys().is_empty());
    }

    #[test]
    fn test_collect_garbage_evicts_old_slots() {
        let (cache, clock) = cache_with_clock();
        cache.set(&customers(), Some(json!([])));
        clock.advance_ms(30_000);
        cache.set(&QueryKey::collection(ResourceKind::Partners), Some(json!([])));
        clock.advance_ms(31_000);

        assert_eq!(cache.collect_garbage(), 1);
        assert_eq!(cache.get(&customers()), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicted_slot_rejects_old_ticket() {
        let (cache, clock) = cache_with_clock();
        let ticket = cache.begin_fetch(&customers());
        clock.advance_ms(61_000);
        cache.collect_garbage();

        cache.set(&customers(), Some(json!(["fresh"])));
        assert!(!cache.complete_fetch(&ticket, json!(["late"])));
    }
}
