//! Optimistic mutations.
//!
//! A mutation writes its expected result into the cache before the server
//! answers, then either lets a refetch reconcile it (success) or puts the
//! captured snapshot back (failure).
//! 乐观更新：先写缓存，成功后失效重取，失败则整体回滚快照。

mod collection_ops;
mod controller;
mod entity_mutations;
mod key_guards;
mod plan;
mod snapshot;

pub use controller::MutationController;
pub use entity_mutations::EntityMutations;
pub use plan::{MutationAction, MutationPlan};
pub use snapshot::Snapshot;

use fd_core::ports::ApiError;
use fd_core::FieldErrors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Rejected before anything reached the cache or the network.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The server rejected the change; the cache has been rolled back.
    #[error(transparent)]
    Request(#[from] ApiError),
}

impl MutationError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            MutationError::Validation(errors) => Some(errors),
            MutationError::Request(_) => None,
        }
    }
}
