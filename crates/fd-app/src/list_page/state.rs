use std::sync::Arc;

use fd_core::list::{
    derive_view, ColumnLayout, FilterPredicate, FilterSet, ListQuery, ListView, Pagination,
    SortStatus,
};
use fd_core::ports::ColumnPrefsPort;
use fd_core::Record;
use tracing::{debug, warn};

use super::ListPageConfig;

/// State of one list page.
///
/// Any change to what is shown (search, filters, sort, page size) puts the
/// page back to 1. Column changes are persisted immediately; a storage failure
/// is logged and the in-memory layout still applies.
pub struct ListPageState<T> {
    config: ListPageConfig,
    prefs: Arc<dyn ColumnPrefsPort>,
    query: ListQuery,
    columns: ColumnLayout,
    selected_item: Option<T>,
    detail_drawer_opened: bool,
}

impl<T: Record + Clone> ListPageState<T> {
    pub fn new(config: ListPageConfig, prefs: Arc<dyn ColumnPrefsPort>) -> Self {
        let stored = match prefs.load(&config.storage_key) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(
                    storage_key = %config.storage_key,
                    error = %e,
                    "Failed to load column preferences, using defaults"
                );
                None
            }
        };
        let columns = ColumnLayout::restore(config.columns.clone(), stored.as_ref());
        let query = ListQuery {
            search_fields: config.search_fields.clone(),
            pagination: Pagination::new(1, config.page_size),
            ..Default::default()
        };

        Self {
            config,
            prefs,
            query,
            columns,
            selected_item: None,
            detail_drawer_opened: false,
        }
    }

    pub fn config(&self) -> &ListPageConfig {
        &self.config
    }

    /// Current inputs of the derivation.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn view(&self, items: &[T]) -> ListView<T> {
        derive_view(items, &self.query)
    }

    // Search, filters, sort

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.first_page();
    }

    pub fn filters(&self) -> &FilterSet {
        &self.query.filters
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.query.filters = filters;
        self.first_page();
    }

    /// Set or clear (`None`) a single filter.
    pub fn set_filter(&mut self, name: impl Into<String>, predicate: Option<FilterPredicate>) {
        self.query.filters.set(name, predicate);
        self.first_page();
    }

    pub fn active_filter_count(&self) -> usize {
        self.query.filters.active_count()
    }

    pub fn sort(&self) -> Option<&SortStatus> {
        self.query.sort.as_ref()
    }

    pub fn set_sort(&mut self, sort: Option<SortStatus>) {
        self.query.sort = sort;
        self.first_page();
    }

    /// Header click on `field`.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = SortStatus::cycle(self.query.sort.as_ref(), field);
        self.set_sort(next);
    }

    /// Clear search and filters. Sort and columns are kept.
    pub fn reset_filters(&mut self) {
        self.query.search.clear();
        self.query.filters = FilterSet::new();
        self.first_page();
    }

    // Pagination

    pub fn page(&self) -> usize {
        self.query.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.query.pagination.page_size()
    }

    /// Pages below 1 are clamped to 1. Pages past the end render empty.
    pub fn set_page(&mut self, page: usize) {
        self.query.pagination = self.query.pagination.with_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.pagination = Pagination::new(1, page_size);
    }

    fn first_page(&mut self) {
        self.query.pagination = self.query.pagination.first_page();
    }

    // Columns

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<String> {
        self.columns.visible_columns()
    }

    pub fn column_order(&self) -> &[String] {
        self.columns.order()
    }

    pub fn set_column_visible(&mut self, accessor: &str, visible: bool) {
        if self.columns.set_visible(accessor, visible) {
            self.persist_columns();
        }
    }

    pub fn move_column(&mut self, accessor: &str, to_index: usize) {
        if self.columns.move_column(accessor, to_index) {
            self.persist_columns();
        }
    }

    /// Back to definition order and default visibility.
    pub fn reset_columns(&mut self) {
        self.columns = ColumnLayout::from_definitions(self.config.columns.clone());
        self.persist_columns();
    }

    fn persist_columns(&self) {
        let prefs = self.columns.to_prefs();
        match self.prefs.save(&self.config.storage_key, &prefs) {
            Ok(()) => debug!(storage_key = %self.config.storage_key, "Column preferences saved"),
            Err(e) => warn!(
                storage_key = %self.config.storage_key,
                error = %e,
                "Failed to save column preferences"
            ),
        }
    }

    // Detail drawer

    pub fn handle_row_click(&mut self, item: T) {
        self.selected_item = Some(item);
        self.detail_drawer_opened = true;
    }

    /// Closes the drawer. The selection is kept so the drawer can animate out
    /// with its content.
    pub fn close_detail_drawer(&mut self) {
        self.detail_drawer_opened = false;
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_item.as_ref()
    }

    pub fn detail_drawer_opened(&self) -> bool {
        self.detail_drawer_opened
    }
}
