//! CRM business records.

pub mod customer;
pub mod engagement;
pub mod engagement_letter;
pub mod partner;
pub mod proposal;

pub use customer::{Address, Contact, Customer, CustomerDraft, CustomerPatch, CustomerStatus};
pub use engagement::{Engagement, EngagementDraft, EngagementPatch, EngagementStatus};
pub use engagement_letter::{
    EngagementLetter, EngagementLetterDraft, EngagementLetterPatch, LetterStatus,
};
pub use partner::{Partner, PartnerDraft, PartnerPatch};
pub use proposal::{Proposal, ProposalDraft, ProposalPatch, ProposalStatus};
