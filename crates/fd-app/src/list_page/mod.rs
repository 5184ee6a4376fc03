//! Table page controller: search, filters, sort, pagination, columns and the
//! row detail drawer of one list page.
//! 列表页控制器：搜索、筛选、排序、分页、列设置与详情抽屉。

pub mod pages;
mod state;

pub use state::ListPageState;

use fd_core::list::{ColumnDefinition, DEFAULT_PAGE_SIZE};

/// Static description of a list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPageConfig {
    /// Key under which column preferences are stored, e.g. `"customers-list"`.
    pub storage_key: String,
    /// Accessors matched by the search box.
    pub search_fields: Vec<String>,
    pub columns: Vec<ColumnDefinition>,
    pub page_size: usize,
}

impl ListPageConfig {
    pub fn new(storage_key: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            storage_key: storage_key.into(),
            search_fields: Vec::new(),
            columns,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
