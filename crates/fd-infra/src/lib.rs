//! FirmDesk infrastructure adapters.
//!
//! Implementations of the `fd-core` ports: the in-memory query cache, the
//! REST client, column preference storage, notification sinks and clocks.

pub mod api;
pub mod cache;
pub mod notify;
pub mod prefs;
pub mod time;

pub use api::HttpEntityApi;
pub use cache::InMemoryQueryCache;
pub use notify::{RecordingNotifier, TracingNotifier};
pub use prefs::{FileColumnPrefsStore, InMemoryColumnPrefsStore};
pub use time::{ManualClock, SystemClock};
