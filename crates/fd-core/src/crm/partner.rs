use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::field::FieldValue;
use crate::ids::EntityId;
use crate::resource::ResourceKind;
use crate::validation::{FieldErrors, Validate};

/// A partner of the firm, owner of customer relationships and engagements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for Partner {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "email" => (&self.email).into(),
            "title" => self.title.as_ref().into(),
            "active" => self.active.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for Partner {
    type Draft = PartnerDraft;
    type Patch = PartnerPatch;

    const RESOURCE: ResourceKind = ResourceKind::Partners;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: &PartnerDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            title: draft.title.clone(),
            active: draft.active,
        }
    }

    fn apply_patch(&mut self, patch: &PartnerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

impl Validate for PartnerDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.require_text("email", &self.email);
        errors.check_email("email", Some(&self.email));
        errors.into_result()
    }
}

impl Validate for PartnerPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_optional_text("name", self.name.as_deref());
        errors.check_email("email", self.email.as_deref());
        errors.into_result()
    }
}
