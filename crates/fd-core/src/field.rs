//! Scalar field values exposed by records for search, filtering and sorting.
//! 记录对外暴露的字段值，用于搜索、筛选与排序。

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// A single field of a record, reduced to the shapes list views care about.
///
/// Comparison rules:
/// - text compares case-insensitively
/// - numbers and dates compare numerically
/// - values of different kinds are ordered by kind so sorting stays total
/// - `Null` has no natural order; sorting places it last in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Lowercased text rendering used for substring search.
    ///
    /// Returns `None` for `Null`, which never matches a search term.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Text(s) => Some(s.to_lowercase()),
            FieldValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Rendering for plain-text output. `Null` renders empty.
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` when either side is `Null` or the kinds differ; range
    /// filters use this to reject values they cannot order.
    pub fn compare_same_kind(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => Some(a.total_cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => {
                Some(a.to_lowercase().cmp(&b.to_lowercase()))
            }
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order over non-null values. Kinds are ranked before contents.
    fn compare_total(&self, other: &FieldValue) -> Ordering {
        self.compare_same_kind(other)
            .unwrap_or_else(|| self.kind_rank().cmp(&other.kind_rank()))
    }

    /// Equality used by `Equals` filters: exact, except text which ignores case.
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => self.compare_same_kind(other) == Some(Ordering::Equal),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }
}

/// Ordering used by list sorting. `Null` sorts last whatever the direction.
pub fn compare_for_sort(a: &FieldValue, b: &FieldValue, descending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare_total(b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<EntityId> for FieldValue {
    fn from(value: EntityId) -> Self {
        FieldValue::Number(value.value() as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> FieldValue {
        FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        let a = FieldValue::from("acme");
        let b = FieldValue::from("Beta");
        assert_eq!(compare_for_sort(&a, &b, false), Ordering::Less);
        assert!(FieldValue::from("ACME").loosely_equals(&a));
    }

    #[test]
    fn test_numbers_and_dates_compare_numerically() {
        assert_eq!(
            compare_for_sort(&FieldValue::from(9_i64), &FieldValue::from(10_i64), false),
            Ordering::Less
        );
        assert_eq!(
            compare_for_sort(&date(2024, 1, 2), &date(2023, 12, 31), false),
            Ordering::Greater
        );
    }

    #[test]
    fn test_null_sorts_last_in_both_directions() {
        let value = FieldValue::from("x");
        assert_eq!(compare_for_sort(&FieldValue::Null, &value, false), Ordering::Greater);
        assert_eq!(compare_for_sort(&FieldValue::Null, &value, true), Ordering::Greater);
        assert_eq!(compare_for_sort(&value, &FieldValue::Null, true), Ordering::Less);
    }

    #[test]
    fn test_search_text_renders_whole_numbers_without_fraction() {
        assert_eq!(FieldValue::from(42_i64).search_text().as_deref(), Some("42"));
        assert_eq!(FieldValue::Null.search_text(), None);
    }

    #[test]
    fn test_mixed_kinds_are_not_comparable_for_ranges() {
        assert_eq!(
            FieldValue::from(1_i64).compare_same_kind(&FieldValue::from("1")),
            None
        );
    }
}
