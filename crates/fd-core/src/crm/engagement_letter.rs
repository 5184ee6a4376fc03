use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::field::FieldValue;
use crate::ids::EntityId;
use crate::resource::ResourceKind;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    Draft,
    Sent,
    Signed,
    Void,
}

impl LetterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStatus::Draft => "draft",
            LetterStatus::Sent => "sent",
            LetterStatus::Signed => "signed",
            LetterStatus::Void => "void",
        }
    }
}

/// Engagement letter issued once a proposal is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementLetter {
    pub id: EntityId,
    pub reference: String,
    pub proposal_id: EntityId,
    pub customer_id: EntityId,
    pub status: LetterStatus,
    #[serde(default)]
    pub signed_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementLetterDraft {
    pub reference: String,
    pub proposal_id: EntityId,
    pub customer_id: EntityId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementLetterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LetterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<NaiveDate>,
}

impl Record for EngagementLetter {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "reference" => (&self.reference).into(),
            "proposal_id" => self.proposal_id.into(),
            "customer_id" => self.customer_id.into(),
            "status" => self.status.as_str().into(),
            "signed_at" => self.signed_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for EngagementLetter {
    type Draft = EngagementLetterDraft;
    type Patch = EngagementLetterPatch;

    const RESOURCE: ResourceKind = ResourceKind::EngagementLetters;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: &EngagementLetterDraft) -> Self {
        Self {
            id,
            reference: draft.reference.clone(),
            proposal_id: draft.proposal_id,
            customer_id: draft.customer_id,
            status: LetterStatus::Draft,
            signed_at: None,
        }
    }

    fn apply_patch(&mut self, patch: &EngagementLetterPatch) {
        if let Some(reference) = &patch.reference {
            self.reference = reference.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(signed_at) = patch.signed_at {
            self.signed_at = Some(signed_at);
        }
    }
}

impl Validate for EngagementLetterDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("reference", &self.reference);
        errors.into_result()
    }
}

impl Validate for EngagementLetterPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_optional_text("reference", self.reference.as_deref());
        if self.status == Some(LetterStatus::Signed) && self.signed_at.is_none() {
            errors.insert("signed_at", "A signed letter needs a signing date");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_requires_date() {
        let patch = EngagementLetterPatch {
            status: Some(LetterStatus::Signed),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().get("signed_at").is_some());

        let patch = EngagementLetterPatch {
            status: Some(LetterStatus::Signed),
            signed_at: NaiveDate::from_ymd_opt(2024, 5, 2),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
