use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::field::FieldValue;
use crate::ids::EntityId;
use crate::resource::ResourceKind;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Prospect,
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Prospect => "prospect",
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// A client of the firm.
/// 事务所的客户。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: CustomerStatus,
    /// Partner responsible for the relationship.
    #[serde(default)]
    pub partner_id: Option<EntityId>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub partner_id: Option<EntityId>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
}

impl Record for Customer {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "email" => self.email.as_ref().into(),
            "phone" => self.phone.as_ref().into(),
            "status" => self.status.as_str().into(),
            "partner_id" => self.partner_id.into(),
            "created_at" => self.created_at.into(),
            "contact_count" => self.contacts.len().into(),
            "primary_contact" => self
                .contacts
                .iter()
                .find(|c| c.is_primary)
                .map(|c| c.name.as_str())
                .into(),
            "city" => self.addresses.first().map(|a| a.city.as_str()).into(),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for Customer {
    type Draft = CustomerDraft;
    type Patch = CustomerPatch;

    const RESOURCE: ResourceKind = ResourceKind::Customers;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: &CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            status: draft.status,
            partner_id: draft.partner_id,
            created_at: None,
            contacts: draft.contacts.clone(),
            addresses: draft.addresses.clone(),
        }
    }

    fn apply_patch(&mut self, patch: &CustomerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(partner_id) = patch.partner_id {
            self.partner_id = Some(partner_id);
        }
        // Relationships are only replaced when the patch carries them.
        if let Some(contacts) = &patch.contacts {
            self.contacts = contacts.clone();
        }
        if let Some(addresses) = &patch.addresses {
            self.addresses = addresses.clone();
        }
    }
}

fn validate_contacts(errors: &mut FieldErrors, contacts: &[Contact]) {
    for (i, contact) in contacts.iter().enumerate() {
        errors.require_text(&format!("contacts[{i}].name"), &contact.name);
        errors.check_email(&format!("contacts[{i}].email"), contact.email.as_deref());
    }
}

fn validate_addresses(errors: &mut FieldErrors, addresses: &[Address]) {
    for (i, address) in addresses.iter().enumerate() {
        errors.require_text(&format!("addresses[{i}].line1"), &address.line1);
        errors.require_text(&format!("addresses[{i}].city"), &address.city);
    }
}

impl Validate for CustomerDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.check_email("email", self.email.as_deref());
        validate_contacts(&mut errors, &self.contacts);
        validate_addresses(&mut errors, &self.addresses);
        errors.into_result()
    }
}

impl Validate for CustomerPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_optional_text("name", self.name.as_deref());
        errors.check_email("email", self.email.as_deref());
        if let Some(contacts) = &self.contacts {
            validate_contacts(&mut errors, contacts);
        }
        if let Some(addresses) = &self.addresses {
            validate_addresses(&mut errors, addresses);
        }
        errors.into_result()
    }
}
