//! # fd-core
//!
//! Core domain models and business logic for FirmDesk.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the CRM entities, the list derivation used by every table view, draft validation
//! and the ports implemented by the infrastructure layer.

pub mod config;
pub mod crm;
pub mod entity;
pub mod field;
pub mod ids;
pub mod list;
pub mod notification;
pub mod ports;
pub mod resource;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use entity::{Entity, Record};
pub use field::FieldValue;
pub use ids::{EntityId, QueryKey};
pub use notification::{Notification, NotificationColor};
pub use resource::ResourceKind;
pub use validation::{FieldErrors, Validate};
