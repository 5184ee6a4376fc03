//! # Dependency Wiring / 依赖注入
//!
//! Builds the concrete adapters named by the configuration and groups them
//! into [`AppDeps`].
//! 根据配置创建具体适配器并打包为 `AppDeps`。

use std::sync::Arc;

use fd_app::AppDeps;
use fd_core::crm::{Customer, Engagement, EngagementLetter, Partner, Proposal};
use fd_core::ports::{ClockPort, ColumnPrefsPort};
use fd_core::AppConfig;
use fd_infra::{
    api::build_client, FileColumnPrefsStore, HttpEntityApi, InMemoryColumnPrefsStore,
    InMemoryQueryCache, SystemClock, TracingNotifier,
};
use tracing::info;

/// Wired dependencies plus the concrete cache, which the runtime also needs
/// for garbage collection.
pub struct WiredDependencies {
    pub deps: AppDeps,
    pub cache: Arc<InMemoryQueryCache>,
}

pub fn wire_dependencies(config: &AppConfig) -> anyhow::Result<WiredDependencies> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let cache = Arc::new(InMemoryQueryCache::new(clock, &config.cache));

    let client = build_client(&config.api)?;
    let api = &config.api;
    info!(base_url = %api.base_url, "Using CRM API");

    let column_prefs: Arc<dyn ColumnPrefsPort> = match &config.storage.prefs_path {
        Some(path) => {
            info!(path = %path.display(), "Storing column preferences on disk");
            Arc::new(FileColumnPrefsStore::new(path))
        }
        None => Arc::new(InMemoryColumnPrefsStore::new()),
    };

    let deps = AppDeps {
        cache: cache.clone(),
        customers: Arc::new(HttpEntityApi::<Customer>::with_client(client.clone(), api)),
        partners: Arc::new(HttpEntityApi::<Partner>::with_client(client.clone(), api)),
        proposals: Arc::new(HttpEntityApi::<Proposal>::with_client(client.clone(), api)),
        engagement_letters: Arc::new(HttpEntityApi::<EngagementLetter>::with_client(
            client.clone(),
            api,
        )),
        engagements: Arc::new(HttpEntityApi::<Engagement>::with_client(client, api)),
        notifier: Arc::new(TracingNotifier),
        column_prefs,
    };

    Ok(WiredDependencies { deps, cache })
}
