use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::Record;
use crate::field::FieldValue;

/// Constraint applied to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterPredicate {
    /// Exact match; text ignores case.
    Equals { value: FieldValue },
    /// Inclusive range. An absent bound is open.
    Range {
        min: Option<FieldValue>,
        max: Option<FieldValue>,
    },
    /// Case-insensitive substring.
    Contains { needle: String },
    /// Membership in a set of values.
    OneOf { values: Vec<FieldValue> },
}

impl FilterPredicate {
    pub fn equals(value: impl Into<FieldValue>) -> Self {
        FilterPredicate::Equals {
            value: value.into(),
        }
    }

    pub fn range(min: Option<FieldValue>, max: Option<FieldValue>) -> Self {
        FilterPredicate::Range { min, max }
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        FilterPredicate::Contains {
            needle: needle.into(),
        }
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        FilterPredicate::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            FilterPredicate::Equals { value: expected } => value.loosely_equals(expected),
            FilterPredicate::Range { min, max } => {
                if value.is_null() {
                    return false;
                }
                let above_min = min.as_ref().map_or(true, |min| {
                    matches!(
                        value.compare_same_kind(min),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                });
                let below_max = max.as_ref().map_or(true, |max| {
                    matches!(
                        value.compare_same_kind(max),
                        Some(Ordering::Less | Ordering::Equal)
                    )
                });
                above_min && below_max
            }
            FilterPredicate::Contains { needle } => {
                let needle = needle.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                value
                    .search_text()
                    .map_or(false, |text| text.contains(&needle))
            }
            FilterPredicate::OneOf { values } => values.iter().any(|v| value.loosely_equals(v)),
        }
    }
}

/// Named filters of a list page.
///
/// A filter name is the accessor of the field it constrains. A name mapped to
/// `None`, like an absent name, leaves that field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    entries: BTreeMap<String, Option<FilterPredicate>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSet::set`].
    pub fn with(mut self, name: impl Into<String>, predicate: FilterPredicate) -> Self {
        self.set(name, Some(predicate));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, predicate: Option<FilterPredicate>) {
        self.entries.insert(name.into(), predicate);
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&FilterPredicate> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Number of filters currently holding a value.
    pub fn active_count(&self) -> usize {
        self.entries.values().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterPredicate)> {
        self.entries
            .iter()
            .filter_map(|(name, p)| p.as_ref().map(|p| (name.as_str(), p)))
    }

    /// True when `record` satisfies every active filter.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.active()
            .all(|(name, predicate)| predicate.matches(&record.field(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> FieldValue {
        FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_undefined_filters_do_not_count() {
        let mut filters = FilterSet::new().with("status", FilterPredicate::equals("active"));
        filters.set("partner_id", None);

        assert_eq!(filters.active_count(), 1);
        assert!(filters.get("partner_id").is_none());
    }

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let range = FilterPredicate::range(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));

        assert!(range.matches(&date(2024, 1, 1)));
        assert!(range.matches(&date(2024, 1, 31)));
        assert!(!range.matches(&date(2024, 2, 1)));
        assert!(!range.matches(&FieldValue::Null));
    }

    #[test]
    fn test_open_range_bound() {
        let at_least_ten = FilterPredicate::range(Some(FieldValue::Number(10.0)), None);
        assert!(at_least_ten.matches(&FieldValue::Number(1e9)));
        assert!(!at_least_ten.matches(&FieldValue::Number(9.99)));
    }

    #[test]
    fn test_equals_ignores_text_case() {
        assert!(FilterPredicate::equals("Active").matches(&FieldValue::from("active")));
        assert!(!FilterPredicate::equals(1_i64).matches(&FieldValue::from(2_i64)));
    }

    #[test]
    fn test_contains_and_one_of() {
        assert!(FilterPredicate::contains("CORP").matches(&FieldValue::from("Acme Corp")));
        assert!(!FilterPredicate::contains("x").matches(&FieldValue::Null));
        assert!(FilterPredicate::one_of(["sent", "accepted"]).matches(&FieldValue::from("sent")));
    }

    #[test]
    fn test_serialized_shape_is_tagged() {
        let json = serde_json::to_value(FilterPredicate::contains("acme")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "contains", "needle": "acme" }));
    }
}
