//! Resource kinds served by the CRM backend.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A REST resource, i.e. one kind of business record.
/// 一种业务记录对应的 REST 资源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Customers,
    Partners,
    Proposals,
    EngagementLetters,
    Engagements,
}

impl ResourceKind {
    /// Path segment of the resource on the REST API.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Customers => "customers",
            ResourceKind::Partners => "partners",
            ResourceKind::Proposals => "proposals",
            ResourceKind::EngagementLetters => "engagement-letters",
            ResourceKind::Engagements => "engagements",
        }
    }

    /// Singular, human readable name used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Customers => "Customer",
            ResourceKind::Partners => "Partner",
            ResourceKind::Proposals => "Proposal",
            ResourceKind::EngagementLetters => "Engagement letter",
            ResourceKind::Engagements => "Engagement",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
