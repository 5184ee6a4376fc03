use fd_core::ports::{CacheValue, QueryCachePort};
use fd_core::QueryKey;

/// Cache contents captured right before an optimistic write.
///
/// Owned by exactly one in-flight mutation. Restoring is verbatim: slots that
/// were absent are cleared again, no partial merge takes place.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: Vec<(QueryKey, Option<CacheValue>)>,
}

impl Snapshot {
    pub fn capture(cache: &dyn QueryCachePort, keys: &[QueryKey]) -> Self {
        Self {
            entries: keys.iter().map(|key| (key.clone(), cache.get(key))).collect(),
        }
    }

    pub fn restore(self, cache: &dyn QueryCachePort) {
        for (key, value) in self.entries {
            cache.set(&key, value);
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Option<CacheValue>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
