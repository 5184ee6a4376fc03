//! Record and entity abstractions shared by every CRM resource.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::field::FieldValue;
use crate::ids::{EntityId, QueryKey};
use crate::resource::ResourceKind;
use crate::validation::Validate;

/// Anything a list view can search, filter and sort.
pub trait Record {
    /// Look up a field by accessor name.
    ///
    /// Unknown accessors and unset optional fields return [`FieldValue::Null`].
    fn field(&self, name: &str) -> FieldValue;
}

/// A business record served by the CRM REST API.
///
/// Entities know how to synthesise an optimistic copy of themselves from a
/// create draft and how to merge an update patch. Patches only carry the
/// fields they change; nested relationship fields (contacts, addresses) that
/// a patch does not carry must survive [`Entity::apply_patch`] untouched.
pub trait Entity: Record + Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Create input.
    type Draft: Validate + Clone + Send + Sync + Serialize + 'static;
    /// Update input.
    type Patch: Validate + Clone + Send + Sync + Serialize + 'static;

    const RESOURCE: ResourceKind;

    fn id(&self) -> EntityId;

    /// Build the record shown while a create is pending.
    fn from_draft(id: EntityId, draft: &Self::Draft) -> Self;

    fn apply_patch(&mut self, patch: &Self::Patch);

    fn collection_key() -> QueryKey {
        QueryKey::collection(Self::RESOURCE)
    }

    fn entity_key(id: EntityId) -> QueryKey {
        QueryKey::entity(Self::RESOURCE, id)
    }
}
