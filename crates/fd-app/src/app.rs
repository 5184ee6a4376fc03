use std::sync::Arc;

use fd_core::crm::{Customer, Engagement, EngagementLetter, Partner, Proposal};
use fd_core::{Entity, Record};

use crate::deps::{ApiFor, AppDeps};
use crate::list_page::{ListPageConfig, ListPageState};
use crate::mutation::{EntityMutations, MutationController};
use crate::query::EntityQueries;

/// The application runtime.
///
/// One mutation controller is shared by every resource so overlapping
/// mutations on the same key serialise regardless of who started them.
/// 所有资源共享同一个变更控制器。
pub struct App {
    deps: AppDeps,
    controller: Arc<MutationController>,
}

impl App {
    /// This constructor signature IS the dependency manifest.
    /// 这个构造函数签名就是依赖清单。
    pub fn new(deps: AppDeps) -> Self {
        let controller = Arc::new(MutationController::new(
            deps.cache.clone(),
            deps.notifier.clone(),
        ));
        Self { deps, controller }
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn queries<E: Entity>(&self) -> EntityQueries<E>
    where
        AppDeps: ApiFor<E>,
    {
        EntityQueries::new(
            <AppDeps as ApiFor<E>>::api(&self.deps),
            self.deps.cache.clone(),
        )
    }

    pub fn mutations<E: Entity>(&self) -> EntityMutations<E>
    where
        AppDeps: ApiFor<E>,
    {
        EntityMutations::new(<AppDeps as ApiFor<E>>::api(&self.deps), self.controller.clone())
    }

    pub fn list_page<T: Record + Clone>(&self, config: ListPageConfig) -> ListPageState<T> {
        ListPageState::new(config, self.deps.column_prefs.clone())
    }

    /// Refetch every invalidated key of every resource.
    pub async fn refetch_invalidated(&self) -> usize {
        let customers = self.queries::<Customer>();
        let partners = self.queries::<Partner>();
        let proposals = self.queries::<Proposal>();
        let letters = self.queries::<EngagementLetter>();
        let engagements = self.queries::<Engagement>();

        let counts = futures::join!(
            customers.refetch_invalidated(),
            partners.refetch_invalidated(),
            proposals.refetch_invalidated(),
            letters.refetch_invalidated(),
            engagements.refetch_invalidated(),
        );
        counts.0 + counts.1 + counts.2 + counts.3 + counts.4
    }
}
