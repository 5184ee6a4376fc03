//! Process bootstrap: configuration, logging and dependency wiring.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::{run, ListRequest};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, WiredDependencies};
