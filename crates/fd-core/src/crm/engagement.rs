use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::field::FieldValue;
use crate::ids::EntityId;
use crate::resource::ResourceKind;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl EngagementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Planned => "planned",
            EngagementStatus::Active => "active",
            EngagementStatus::Completed => "completed",
            EngagementStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: EntityId,
    pub name: String,
    pub customer_id: EntityId,
    #[serde(default)]
    pub partner_id: Option<EntityId>,
    pub status: EngagementStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementDraft {
    pub name: String,
    pub customer_id: EntityId,
    pub partner_id: Option<EntityId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EngagementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl Record for Engagement {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "customer_id" => self.customer_id.into(),
            "partner_id" => self.partner_id.into(),
            "status" => self.status.as_str().into(),
            "start_date" => self.start_date.into(),
            "end_date" => self.end_date.into(),
            "budget" => self.budget.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Entity for Engagement {
    type Draft = EngagementDraft;
    type Patch = EngagementPatch;

    const RESOURCE: ResourceKind = ResourceKind::Engagements;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: &EngagementDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            customer_id: draft.customer_id,
            partner_id: draft.partner_id,
            status: EngagementStatus::Planned,
            start_date: draft.start_date,
            end_date: draft.end_date,
            budget: draft.budget,
        }
    }

    fn apply_patch(&mut self, patch: &EngagementPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(partner_id) = patch.partner_id {
            self.partner_id = Some(partner_id);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(budget) = patch.budget {
            self.budget = Some(budget);
        }
    }
}

fn check_period(errors: &mut FieldErrors, start: Option<NaiveDate>, end: Option<NaiveDate>) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.insert("end_date", "End date must not be before start date");
        }
    }
}

impl Validate for EngagementDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.check_non_negative("budget", self.budget);
        check_period(&mut errors, self.start_date, self.end_date);
        errors.into_result()
    }
}

impl Validate for EngagementPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_optional_text("name", self.name.as_deref());
        errors.check_non_negative("budget", self.budget);
        // Only checkable when both ends travel in the same patch.
        check_period(&mut errors, self.start_date, self.end_date);
        errors.into_result()
    }
}
