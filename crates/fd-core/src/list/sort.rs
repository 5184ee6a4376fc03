use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort of a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStatus {
    pub field: String,
    pub direction: SortDirection,
}

impl SortStatus {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Header-click cycle: unsorted -> ascending -> descending -> unsorted.
    /// Clicking a different column starts that column ascending.
    pub fn cycle(current: Option<&SortStatus>, field: &str) -> Option<SortStatus> {
        match current {
            Some(status) if status.field == field => match status.direction {
                SortDirection::Ascending => Some(SortStatus::descending(field)),
                SortDirection::Descending => None,
            },
            _ => Some(SortStatus::ascending(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let asc = SortStatus::cycle(None, "name");
        assert_eq!(asc, Some(SortStatus::ascending("name")));

        let desc = SortStatus::cycle(asc.as_ref(), "name");
        assert_eq!(desc, Some(SortStatus::descending("name")));

        assert_eq!(SortStatus::cycle(desc.as_ref(), "name"), None);
        assert_eq!(
            SortStatus::cycle(desc.as_ref(), "email"),
            Some(SortStatus::ascending("email"))
        );
    }
}
