use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fd_core::QueryKey;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-key serialisation of the snapshot/write and rollback steps, plus
/// bookkeeping of which mutations overlapped on a key.
#[derive(Default)]
pub(crate) struct KeyGuards {
    slots: Mutex<HashMap<QueryKey, Slot>>,
}

struct Slot {
    lock: Arc<AsyncMutex<()>>,
    in_flight: usize,
    /// Registrations since the slot was created. Kept while any mutation on
    /// the key is in flight.
    entries: u64,
}

/// Registration of one in-flight mutation. Dropping it (completion or the
/// caller abandoning the future) releases the registration.
pub(crate) struct InFlight<'a> {
    guards: &'a KeyGuards,
    keys: Vec<QueryKey>,
    marks: Vec<EntryMark>,
}

/// State of a key at the moment a mutation registered on it.
#[derive(Debug, Clone, Copy)]
struct EntryMark {
    entry: u64,
    joined_others: bool,
}

impl InFlight<'_> {
    /// Keys another mutation touched during this one's lifetime: either it
    /// was already in flight when this one registered, or it registered
    /// afterwards, whether or not it has settled since.
    pub(crate) fn overlapped_keys(&self) -> Vec<QueryKey> {
        let slots = self.guards.slots();
        self.keys
            .iter()
            .zip(&self.marks)
            .filter(|(key, mark)| {
                mark.joined_others
                    || slots
                        .get(*key)
                        .is_some_and(|slot| slot.entries != mark.entry)
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guards.leave(&self.keys);
    }
}

impl KeyGuards {
    fn slots(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn enter(&self, keys: &[QueryKey]) -> InFlight<'_> {
        let mut slots = self.slots();
        let marks = keys
            .iter()
            .map(|key| {
                let slot = slots.entry(key.clone()).or_insert_with(|| Slot {
                    lock: Arc::new(AsyncMutex::new(())),
                    in_flight: 0,
                    entries: 0,
                });
                slot.in_flight += 1;
                slot.entries += 1;
                EntryMark {
                    entry: slot.entries,
                    joined_others: slot.in_flight > 1,
                }
            })
            .collect();
        InFlight {
            guards: self,
            keys: keys.to_vec(),
            marks,
        }
    }

    fn leave(&self, keys: &[QueryKey]) {
        let mut slots = self.slots();
        for key in keys {
            if let Some(slot) = slots.get_mut(key) {
                slot.in_flight = slot.in_flight.saturating_sub(1);
                if slot.in_flight == 0 {
                    slots.remove(key);
                }
            }
        }
    }

    /// Lock every key. `keys` must be sorted so concurrent callers lock in
    /// the same order.
    pub(crate) async fn lock(&self, keys: &[QueryKey]) -> Vec<OwnedMutexGuard<()>> {
        let locks: Vec<Arc<AsyncMutex<()>>> = {
            let slots = self.slots();
            keys.iter()
                .filter_map(|key| slots.get(key).map(|slot| slot.lock.clone()))
                .collect()
        };
        let mut held = Vec::with_capacity(locks.len());
        for lock in locks {
            held.push(lock.lock_owned().await);
        }
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_core::ResourceKind;

    fn key() -> QueryKey {
        QueryKey::collection(ResourceKind::Customers)
    }

    fn other_key() -> QueryKey {
        QueryKey::collection(ResourceKind::Partners)
    }

    #[test]
    fn test_registration_is_released_on_drop() {
        let guards = KeyGuards::default();
        {
            let first = guards.enter(&[key()]);
            let second = guards.enter(&[key()]);
            assert_eq!(first.overlapped_keys(), vec![key()]);
            assert_eq!(second.overlapped_keys(), vec![key()]);
        }
        assert!(guards.slots().is_empty());
    }

    #[test]
    fn test_lone_mutation_has_no_overlap() {
        let guards = KeyGuards::default();
        let only = guards.enter(&[key(), other_key()]);
        assert!(only.overlapped_keys().is_empty());
    }

    #[test]
    fn test_overlap_is_remembered_after_later_mutation_settles() {
        let guards = KeyGuards::default();
        let first = guards.enter(&[key(), other_key()]);
        drop(guards.enter(&[key()]));

        assert_eq!(first.overlapped_keys(), vec![key()]);
    }

    #[test]
    fn test_earlier_mutation_that_settled_still_counts() {
        let guards = KeyGuards::default();
        let earlier = guards.enter(&[key()]);
        let later = guards.enter(&[key()]);
        drop(earlier);

        assert_eq!(later.overlapped_keys(), vec![key()]);
    }

    #[tokio::test]
    async fn test_lock_serialises_holders() {
        let guards = KeyGuards::default();
        let _in_flight = guards.enter(&[key()]);

        let held = guards.lock(&[key()]).await;
        let slot_lock = guards.slots().get(&key()).unwrap().lock.clone();
        assert!(slot_lock.try_lock().is_err());

        drop(held);
        assert!(slot_lock.try_lock().is_ok());
    }
}
