//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`crate::App`] construction. Not a builder: every
//! dependency is required and there are no defaults.
//! 仅用于参数打包，所有依赖都是必需的。

use std::sync::Arc;

use fd_core::crm::{Customer, Engagement, EngagementLetter, Partner, Proposal};
use fd_core::ports::*;
use fd_core::Entity;

pub struct AppDeps {
    // Cache / 缓存
    pub cache: Arc<dyn QueryCachePort>,

    // REST API / 接口
    pub customers: Arc<dyn EntityApiPort<Customer>>,
    pub partners: Arc<dyn EntityApiPort<Partner>>,
    pub proposals: Arc<dyn EntityApiPort<Proposal>>,
    pub engagement_letters: Arc<dyn EntityApiPort<EngagementLetter>>,
    pub engagements: Arc<dyn EntityApiPort<Engagement>>,

    // UI / 界面
    pub notifier: Arc<dyn NotificationPort>,
    pub column_prefs: Arc<dyn ColumnPrefsPort>,
}

/// Typed lookup of the API port serving `E`.
pub trait ApiFor<E: Entity> {
    fn api(&self) -> Arc<dyn EntityApiPort<E>>;
}

macro_rules! api_for {
    ($entity:ty, $field:ident) => {
        impl ApiFor<$entity> for AppDeps {
            fn api(&self) -> Arc<dyn EntityApiPort<$entity>> {
                self.$field.clone()
            }
        }
    };
}

api_for!(Customer, customers);
api_for!(Partner, partners);
api_for!(Proposal, proposals);
api_for!(EngagementLetter, engagement_letters);
api_for!(Engagement, engagements);
