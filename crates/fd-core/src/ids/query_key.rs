use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ids::EntityId;
use crate::resource::ResourceKind;

/// Stable identifier of one cache slot.
///
/// A key either addresses the whole collection of a resource (`customers`) or
/// a single record of it (`customers/42`). Both may be cached independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey {
    resource: ResourceKind,
    id: Option<EntityId>,
}

impl QueryKey {
    pub fn collection(resource: ResourceKind) -> Self {
        Self { resource, id: None }
    }

    pub fn entity(resource: ResourceKind, id: EntityId) -> Self {
        Self {
            resource,
            id: Some(id),
        }
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn is_collection(&self) -> bool {
        self.id.is_none()
    }
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}/{}", self.resource.path(), id),
            None => write!(f, "{}", self.resource.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(
            QueryKey::collection(ResourceKind::Customers).to_string(),
            "customers"
        );
        assert_eq!(
            QueryKey::entity(ResourceKind::EngagementLetters, EntityId::new(42)).to_string(),
            "engagement-letters/42"
        );
    }

    #[test]
    fn test_collection_and_entity_keys_differ() {
        let collection = QueryKey::collection(ResourceKind::Partners);
        let entity = QueryKey::entity(ResourceKind::Partners, EntityId::new(1));

        assert_ne!(collection, entity);
        assert!(collection.is_collection());
        assert_eq!(entity.entity_id(), Some(EntityId::new(1)));
    }
}
