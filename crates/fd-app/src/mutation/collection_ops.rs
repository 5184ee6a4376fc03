//! Optimistic edits of cached JSON slots.
//!
//! An absent slot stays absent: there is nothing on screen to update and the
//! next read fetches the server's state anyway. A slot that does not decode
//! is left untouched.

use fd_core::ports::CacheValue;
use fd_core::{Entity, EntityId};
use tracing::warn;

fn row_id(row: &CacheValue) -> Option<EntityId> {
    row.get("id")?.as_i64().map(EntityId::new)
}

pub(crate) fn append<E: Entity>(current: Option<CacheValue>, item: &E) -> Option<CacheValue> {
    let mut value = current?;
    let Some(rows) = value.as_array_mut() else {
        warn!(resource = %E::RESOURCE, "Collection slot is not an array");
        return Some(value);
    };
    match serde_json::to_value(item) {
        Ok(row) => rows.push(row),
        Err(e) => warn!(resource = %E::RESOURCE, error = %e, "Failed to encode optimistic row"),
    }
    Some(value)
}

pub(crate) fn remove(current: Option<CacheValue>, id: EntityId) -> Option<CacheValue> {
    let mut value = current?;
    if let Some(rows) = value.as_array_mut() {
        rows.retain(|row| row_id(row) != Some(id));
    }
    Some(value)
}

/// Patch the row with `id` inside a collection slot.
pub(crate) fn patch_row<E: Entity>(
    current: Option<CacheValue>,
    id: EntityId,
    patch: &E::Patch,
) -> Option<CacheValue> {
    let mut value = current?;
    if let Some(rows) = value.as_array_mut() {
        for row in rows.iter_mut().filter(|row| row_id(row) == Some(id)) {
            if let Some(patched) = patch_value::<E>(row, patch) {
                *row = patched;
            }
        }
    }
    Some(value)
}

/// Patch an entity slot.
pub(crate) fn patch_entity<E: Entity>(
    current: Option<CacheValue>,
    patch: &E::Patch,
) -> Option<CacheValue> {
    let value = current?;
    Some(patch_value::<E>(&value, patch).unwrap_or(value))
}

fn patch_value<E: Entity>(value: &CacheValue, patch: &E::Patch) -> Option<CacheValue> {
    let mut entity: E = match serde_json::from_value(value.clone()) {
        Ok(entity) => entity,
        Err(e) => {
            warn!(resource = %E::RESOURCE, error = %e, "Cached record does not decode, leaving it");
            return None;
        }
    };
    entity.apply_patch(patch);
    serde_json::to_value(&entity).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_core::crm::{Contact, Customer, CustomerPatch, CustomerStatus};
    use serde_json::json;

    fn customer(id: i64, name: &str) -> Customer {
        Customer {
            id: EntityId::new(id),
            name: name.to_string(),
            email: None,
            phone: None,
            status: CustomerStatus::Active,
            partner_id: None,
            created_at: None,
            contacts: vec![Contact {
                name: "Ada".to_string(),
                email: None,
                phone: None,
                is_primary: true,
            }],
            addresses: vec![],
        }
    }

    fn collection(items: &[Customer]) -> Option<CacheValue> {
        Some(serde_json::to_value(items).unwrap())
    }

    #[test]
    fn test_absent_slot_stays_absent() {
        assert_eq!(append(None, &customer(1, "Acme")), None);
        assert_eq!(remove(None, EntityId::new(1)), None);
        assert_eq!(patch_entity::<Customer>(None, &CustomerPatch::default()), None);
    }

    #[test]
    fn test_remove_only_drops_matching_row() {
        let value = remove(collection(&[customer(1, "A"), customer(2, "B")]), EntityId::new(1));
        assert_eq!(value, collection(&[customer(2, "B")]));
    }

    #[test]
    fn test_patch_row_keeps_relationships() {
        let patch = CustomerPatch {
            name: Some("Acme Ltd".to_string()),
            ..Default::default()
        };
        let value =
            patch_row::<Customer>(collection(&[customer(1, "Acme")]), EntityId::new(1), &patch);

        let mut expected = customer(1, "Acme Ltd");
        expected.contacts = customer(1, "Acme").contacts;
        assert_eq!(value, collection(&[expected]));
    }

    #[test]
    fn test_undecodable_slot_is_untouched() {
        let garbage = Some(json!({"unexpected": true}));
        let patch = CustomerPatch::default();
        assert_eq!(patch_entity::<Customer>(garbage.clone(), &patch), garbage);
    }
}
