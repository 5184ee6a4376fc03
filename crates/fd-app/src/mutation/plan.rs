use std::fmt::{Display, Formatter};

use fd_core::ports::CacheValue;
use fd_core::{QueryKey, ResourceKind};

/// Computes the optimistic value of one slot from its current value.
pub type OptimisticApply = Box<dyn FnOnce(Option<CacheValue>) -> Option<CacheValue> + Send>;

type InvalidateFn<R> = Box<dyn FnOnce(&R) -> Vec<QueryKey> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Create,
    Update,
    Delete,
}

impl MutationAction {
    pub fn verb(&self) -> &'static str {
        match self {
            MutationAction::Create => "create",
            MutationAction::Update => "update",
            MutationAction::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            MutationAction::Create => "created",
            MutationAction::Update => "updated",
            MutationAction::Delete => "deleted",
        }
    }
}

impl Display for MutationAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// What one mutation does to the cache.
///
/// `R` is the server response type; the keys to invalidate on success may
/// depend on it (a create only learns its real id from the response).
pub struct MutationPlan<R> {
    resource: ResourceKind,
    action: MutationAction,
    writes: Vec<(QueryKey, OptimisticApply)>,
    invalidate: InvalidateFn<R>,
}

impl<R> MutationPlan<R> {
    pub fn new(resource: ResourceKind, action: MutationAction) -> Self {
        Self {
            resource,
            action,
            writes: Vec::new(),
            invalidate: Box::new(|_| Vec::new()),
        }
    }

    /// Add an optimistic write. Writes run in insertion order.
    pub fn write<F>(mut self, key: QueryKey, apply: F) -> Self
    where
        F: FnOnce(Option<CacheValue>) -> Option<CacheValue> + Send + 'static,
    {
        self.writes.push((key, Box::new(apply)));
        self
    }

    pub fn invalidate_on_success<F>(mut self, keys: F) -> Self
    where
        F: FnOnce(&R) -> Vec<QueryKey> + Send + 'static,
    {
        self.invalidate = Box::new(keys);
        self
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    pub fn action(&self) -> MutationAction {
        self.action
    }

    /// Distinct written keys, sorted. The sort order is also the lock order.
    pub fn affected_keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self.writes.iter().map(|(key, _)| key.clone()).collect();
        keys.sort();
        keys.dedup();
        keys
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<(QueryKey, OptimisticApply)>,
        InvalidateFn<R>,
    ) {
        (self.writes, self.invalidate)
    }
}
