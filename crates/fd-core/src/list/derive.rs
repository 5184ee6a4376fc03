use serde::{Deserialize, Serialize};

use crate::entity::Record;
use crate::field::{compare_for_sort, FieldValue};
use crate::list::filter::FilterSet;
use crate::list::pagination::Pagination;
use crate::list::sort::SortStatus;

/// Inputs of one derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub search_fields: Vec<String>,
    pub filters: FilterSet,
    pub sort: Option<SortStatus>,
    pub pagination: Pagination,
}

/// What a table renders for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    /// Rows of the current page.
    pub rows: Vec<T>,
    /// Size of the filtered-and-sorted set, before pagination.
    pub total_records: usize,
    pub page_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub active_filter_count: usize,
}

/// Apply search, filters and sort; return references in display order.
///
/// Sorting is stable: records comparing equal on the sort field keep their
/// relative order from `items`. Records whose sort field is null come last in
/// both directions.
pub fn filter_and_sort<'a, T: Record>(items: &'a [T], query: &ListQuery) -> Vec<&'a T> {
    let term = query.search.trim().to_lowercase();

    let filtered = items
        .iter()
        .filter(|item| term.is_empty() || matches_search(*item, &term, &query.search_fields))
        .filter(|item| query.filters.matches(*item));

    match &query.sort {
        None => filtered.collect(),
        Some(sort) => {
            let mut keyed: Vec<(FieldValue, &T)> =
                filtered.map(|item| (item.field(&sort.field), item)).collect();
            // `sort_by` is a stable sort.
            keyed.sort_by(|(a, _), (b, _)| compare_for_sort(a, b, sort.is_descending()));
            keyed.into_iter().map(|(_, item)| item).collect()
        }
    }
}

/// Derive the visible slice and its counters.
pub fn derive_view<T: Record + Clone>(items: &[T], query: &ListQuery) -> ListView<T> {
    let ordered = filter_and_sort(items, query);
    let pagination = query.pagination;

    ListView {
        rows: pagination.slice(&ordered).iter().map(|item| (*item).clone()).collect(),
        total_records: ordered.len(),
        page_count: pagination.page_count(ordered.len()),
        page: pagination.page(),
        page_size: pagination.page_size(),
        active_filter_count: query.filters.active_count(),
    }
}

/// `term` must already be trimmed and lowercased. No search fields means no match.
fn matches_search<T: Record>(item: &T, term: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| {
        item.field(field)
            .search_text()
            .map_or(false, |text| text.contains(term))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::filter::FilterPredicate;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
        status: Option<i64>,
    }

    impl Record for Row {
        fn field(&self, name: &str) -> FieldValue {
            match name {
                "id" => self.id.into(),
                "name" => self.name.into(),
                "status" => self.status.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn row(id: i64, name: &'static str, status: Option<i64>) -> Row {
        Row { id, name, status }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(1, "Acme Corp", Some(1)),
            row(2, "Ben & Co", Some(2)),
            row(3, "acme labs", None),
            row(4, "Delta", Some(1)),
            row(5, "Echo", Some(2)),
        ]
    }

    fn query() -> ListQuery {
        ListQuery {
            search_fields: vec!["name".to_string()],
            pagination: Pagination::new(1, 10),
            ..Default::default()
        }
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = vec![row(1, "Acme Corp", None), row(2, "Ben & Co", None)];
        let view = derive_view(
            &items,
            &ListQuery {
                search: "acme".to_string(),
                ..query()
            },
        );
        assert_eq!(view.rows, vec![row(1, "Acme Corp", None)]);
        assert_eq!(view.total_records, 1);
    }

    #[test]
    fn test_search_without_fields_matches_nothing() {
        let view = derive_view(
            &rows(),
            &ListQuery {
                search: "acme".to_string(),
                search_fields: vec![],
                ..query()
            },
        );
        assert_eq!(view.total_records, 0);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let view = derive_view(
            &rows(),
            &ListQuery {
                search: "   ".to_string(),
                ..query()
            },
        );
        assert_eq!(view.total_records, 5);
    }

    #[test]
    fn test_filters_and_active_count() {
        let mut filters = FilterSet::new().with("status", FilterPredicate::equals(2_i64));
        filters.set("name", None);
        let view = derive_view(
            &rows(),
            &ListQuery {
                filters,
                ..query()
            },
        );
        assert_eq!(ids(&view.rows), vec![2, 5]);
        assert_eq!(view.active_filter_count, 1);
    }

    #[test]
    fn test_sort_is_stable_and_nulls_last() {
        let ascending = derive_view(
            &rows(),
            &ListQuery {
                sort: Some(SortStatus::ascending("status")),
                ..query()
            },
        );
        assert_eq!(ids(&ascending.rows), vec![1, 4, 2, 5, 3]);

        let descending = derive_view(
            &rows(),
            &ListQuery {
                sort: Some(SortStatus::descending("status")),
                ..query()
            },
        );
        // Ties keep collection order in both directions.
        assert_eq!(ids(&descending.rows), vec![2, 5, 1, 4, 3]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let view = derive_view(
            &rows(),
            &ListQuery {
                sort: Some(SortStatus::ascending("name")),
                ..query()
            },
        );
        assert_eq!(ids(&view.rows), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_pagination_window_and_counts() {
        let view = derive_view(
            &rows(),
            &ListQuery {
                pagination: Pagination::new(2, 2),
                ..query()
            },
        );
        assert_eq!(ids(&view.rows), vec![3, 4]);
        assert_eq!(view.total_records, 5);
        assert_eq!(view.page_count, 3);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let view = derive_view(
            &rows(),
            &ListQuery {
                pagination: Pagination::new(9, 2),
                ..query()
            },
        );
        assert!(view.rows.is_empty());
        assert_eq!(view.total_records, 5);
    }

    #[test]
    fn test_empty_collection() {
        let view = derive_view::<Row>(&[], &query());
        assert!(view.rows.is_empty());
        assert_eq!(view.page_count, 0);
    }
}
