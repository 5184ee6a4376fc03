//! FirmDesk
//!
//! Client state layer of the FirmDesk CRM: list pages, cached queries and
//! optimistic mutations over the CRM REST API.

pub mod bootstrap;

pub use fd_app::{App, AppDeps};
pub use fd_core::AppConfig;
