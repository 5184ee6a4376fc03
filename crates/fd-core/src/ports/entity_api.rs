use async_trait::async_trait;

use crate::entity::Entity;
use crate::ids::EntityId;
use crate::ports::errors::ApiError;

/// REST operations on one resource.
#[async_trait]
pub trait EntityApiPort<E: Entity>: Send + Sync {
    /// The whole collection.
    async fn fetch_all(&self) -> Result<Vec<E>, ApiError>;

    /// Errors with [`ApiError::NotFound`] when the record does not exist.
    async fn fetch_by_id(&self, id: EntityId) -> Result<E, ApiError>;

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError>;

    async fn update(&self, id: EntityId, patch: &E::Patch) -> Result<E, ApiError>;

    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;
}
