use std::future::Future;
use std::sync::Arc;

use fd_core::ports::{ApiError, NotificationPort, QueryCachePort};
use fd_core::{Notification, QueryKey};
use tracing::{debug, info, warn};

use super::key_guards::KeyGuards;
use super::plan::MutationPlan;
use super::snapshot::Snapshot;
use super::MutationError;

/// Runs optimistic mutations against the query cache.
///
/// Per mutation: `Idle -> Pending -> {Succeeded, RolledBack} -> Idle`.
///
/// - Pending: for every written key, pending fetches are cancelled, the slot
///   is snapshotted and the optimistic value written. These steps run under a
///   per-key guard, so two overlapping mutations on the same key take their
///   snapshots in turn and the second one sees the first one's write.
/// - Succeeded: the keys named by the plan are invalidated; nothing is
///   written back from the response, the next read refetches.
/// - RolledBack: the snapshot is written back verbatim. Keys another mutation
///   touched while this one was in flight (pending or already settled) are
///   invalidated afterwards, so the next read takes the server's state.
///
/// Exactly one notification is shown per mutation.
/// 每个变更只弹出一条通知；失败时按快照原样回滚。
pub struct MutationController {
    cache: Arc<dyn QueryCachePort>,
    notifier: Arc<dyn NotificationPort>,
    guards: KeyGuards,
}

impl MutationController {
    pub fn new(cache: Arc<dyn QueryCachePort>, notifier: Arc<dyn NotificationPort>) -> Self {
        Self {
            cache,
            notifier,
            guards: KeyGuards::default(),
        }
    }

    pub fn cache(&self) -> &Arc<dyn QueryCachePort> {
        &self.cache
    }

    /// Apply `plan` optimistically, then run `send` and settle.
    #[tracing::instrument(
        name = "usecase.optimistic_mutation.execute",
        skip_all,
        fields(resource = %plan.resource(), action = %plan.action())
    )]
    pub async fn execute<R, F, Fut>(&self, plan: MutationPlan<R>, send: F) -> Result<R, MutationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let keys = plan.affected_keys();
        let resource = plan.resource();
        let action = plan.action();
        let (writes, invalidate) = plan.into_parts();

        let in_flight = self.guards.enter(&keys);

        let snapshot = {
            let _held = self.guards.lock(&keys).await;
            for key in &keys {
                self.cache.cancel(key).await;
            }
            let snapshot = Snapshot::capture(self.cache.as_ref(), &keys);
            for (key, apply) in writes {
                let current = self.cache.get(&key);
                self.cache.set(&key, apply(current));
            }
            snapshot
        };
        debug!(keys = keys.len(), "Optimistic write applied");

        let label = resource.label();
        match send().await {
            Ok(response) => {
                let mut targets: Vec<QueryKey> = invalidate(&response);
                targets.sort();
                targets.dedup();
                for key in &targets {
                    self.cache.invalidate(key).await;
                }
                info!(invalidated = targets.len(), "Mutation succeeded");
                self.notifier.show(Notification::success(
                    format!("{label} {}", action.past_tense()),
                    format!("{label} {} successfully", action.past_tense()),
                ));
                Ok(response)
            }
            Err(err) => {
                {
                    let _held = self.guards.lock(&keys).await;
                    snapshot.restore(self.cache.as_ref());
                }
                for key in in_flight.overlapped_keys() {
                    debug!(key = %key, "Rolled back key overlapped another mutation");
                    self.cache.invalidate(&key).await;
                }
                warn!(error = %err, "Mutation failed, cache rolled back");
                self.notifier.show(Notification::error(
                    format!("Failed to {} {}", action.verb(), label.to_lowercase()),
                    err.user_message(),
                ));
                Err(MutationError::Request(err))
            }
        }
    }
}
