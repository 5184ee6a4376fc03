use std::sync::Arc;

use fd_core::ports::EntityApiPort;
use fd_core::{Entity, EntityId, Validate};
use tracing::debug;

use super::collection_ops;
use super::controller::MutationController;
use super::plan::{MutationAction, MutationPlan};
use super::MutationError;

/// Create, update and delete for one resource, each run optimistically.
///
/// Drafts and patches are validated first; a validation failure never touches
/// the cache or the network.
pub struct EntityMutations<E: Entity> {
    api: Arc<dyn EntityApiPort<E>>,
    controller: Arc<MutationController>,
}

impl<E: Entity> Clone for EntityMutations<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            controller: self.controller.clone(),
        }
    }
}

impl<E: Entity> EntityMutations<E> {
    pub fn new(api: Arc<dyn EntityApiPort<E>>, controller: Arc<MutationController>) -> Self {
        Self { api, controller }
    }

    /// The pending record gets a temporary (negative) id. On success the
    /// collection is refetched, which replaces it with the server's record.
    #[tracing::instrument(name = "usecase.create_entity.execute", skip_all, fields(resource = %E::RESOURCE))]
    pub async fn create(&self, draft: E::Draft) -> Result<E, MutationError> {
        if let Err(errors) = draft.validate() {
            debug!(fields = errors.len(), "Draft rejected by validation");
            return Err(MutationError::Validation(errors));
        }

        let optimistic = E::from_draft(EntityId::temporary(), &draft);
        let plan = MutationPlan::new(E::RESOURCE, MutationAction::Create)
            .write(E::collection_key(), move |current| {
                collection_ops::append(current, &optimistic)
            })
            .invalidate_on_success(|created: &E| {
                vec![E::collection_key(), E::entity_key(created.id())]
            });

        let api = &self.api;
        self.controller
            .execute(plan, || async move { api.create(&draft).await })
            .await
    }

    #[tracing::instrument(name = "usecase.update_entity.execute", skip_all, fields(resource = %E::RESOURCE, id = %id))]
    pub async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, MutationError> {
        if let Err(errors) = patch.validate() {
            debug!(fields = errors.len(), "Patch rejected by validation");
            return Err(MutationError::Validation(errors));
        }

        let row_patch = patch.clone();
        let entity_patch = patch.clone();
        let plan = MutationPlan::new(E::RESOURCE, MutationAction::Update)
            .write(E::collection_key(), move |current| {
                collection_ops::patch_row::<E>(current, id, &row_patch)
            })
            .write(E::entity_key(id), move |current| {
                collection_ops::patch_entity::<E>(current, &entity_patch)
            })
            .invalidate_on_success(move |_| vec![E::collection_key(), E::entity_key(id)]);

        let api = &self.api;
        self.controller
            .execute(plan, || async move { api.update(id, &patch).await })
            .await
    }

    /// Removes the row from the cached collection and clears the entity slot.
    #[tracing::instrument(name = "usecase.delete_entity.execute", skip_all, fields(resource = %E::RESOURCE, id = %id))]
    pub async fn delete(&self, id: EntityId) -> Result<(), MutationError> {
        let plan = MutationPlan::new(E::RESOURCE, MutationAction::Delete)
            .write(E::collection_key(), move |current| {
                collection_ops::remove(current, id)
            })
            .write(E::entity_key(id), |_| None)
            .invalidate_on_success(move |_| vec![E::collection_key(), E::entity_key(id)]);

        let api = &self.api;
        self.controller
            .execute(plan, || async move { api.delete(id).await })
            .await
    }
}
