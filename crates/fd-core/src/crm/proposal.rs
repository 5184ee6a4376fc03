use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::field::FieldValue;
use crate::ids::EntityId;
use crate::resource::ResourceKind;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Sent => "sent",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Declined => "declined",
        }
    }
}

/// A fee proposal sent to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: EntityId,
    pub title: String,
    pub customer_id: EntityId,
    #[serde(default)]
    pub partner_id: Option<EntityId>,
    pub status: ProposalStatus,
    /// Proposed fee.
    pub value: f64,
    #[serde(default)]
    pub sent_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub customer_id: EntityId,
    pub partner_id: Option<EntityId>,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProposalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<NaiveDate>,
}

impl Record for Proposal {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "title" => (&self.title).into(),
            "customer_id" => self.customer_id.into(),
            "partner_id" => self.partner_id.into(),
            "status" => self.status.as_str().into(),
            "value" => self.value.into(),
            "sent_at" => self.sent_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for Proposal {
    type Draft = ProposalDraft;
    type Patch = ProposalPatch;

    const RESOURCE: ResourceKind = ResourceKind::Proposals;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: &ProposalDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            customer_id: draft.customer_id,
            partner_id: draft.partner_id,
            status: ProposalStatus::Draft,
            value: draft.value,
            sent_at: None,
        }
    }

    fn apply_patch(&mut self, patch: &ProposalPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(partner_id) = patch.partner_id {
            self.partner_id = Some(partner_id);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(sent_at) = patch.sent_at {
            self.sent_at = Some(sent_at);
        }
    }
}

impl Validate for ProposalDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title);
        errors.check_non_negative("value", Some(self.value));
        errors.into_result()
    }
}

impl Validate for ProposalPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_optional_text("title", self.title.as_deref());
        errors.check_non_negative("value", self.value);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_proposals_start_as_draft() {
        let draft = ProposalDraft {
            title: "Annual audit".to_string(),
            customer_id: EntityId::new(1),
            partner_id: None,
            value: 12_000.0,
        };
        let proposal = Proposal::from_draft(EntityId::new(-5), &draft);
        assert_eq!(proposal.status, ProposalStatus::Draft);
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let patch = ProposalPatch {
            value: Some(-1.0),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().get("value").is_some());
    }
}
