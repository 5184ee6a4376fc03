//! Column visibility and order of a table, and their persisted form.
//! 表格列的可见性与顺序，以及其持久化形式。

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub accessor: String,
    pub title: String,
    /// Visible when the user has no stored preference for this column.
    pub default_visible: bool,
    /// Always rendered; a stored preference cannot hide it.
    pub always_visible: bool,
}

impl ColumnDefinition {
    pub fn new(accessor: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
            title: title.into(),
            default_visible: true,
            always_visible: false,
        }
    }

    pub fn hidden_by_default(mut self) -> Self {
        self.default_visible = false;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }
}

/// User preference as persisted per list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPrefs {
    #[serde(default)]
    pub visible: Vec<String>,
    #[serde(default)]
    pub order: Vec<String>,
}

/// Resolved column layout of one list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    definitions: Vec<ColumnDefinition>,
    order: Vec<String>,
    visible: BTreeSet<String>,
}

impl ColumnLayout {
    /// Layout with no stored preference: definition order, default visibility.
    pub fn from_definitions(definitions: Vec<ColumnDefinition>) -> Self {
        let order = definitions.iter().map(|d| d.accessor.clone()).collect();
        let visible = definitions
            .iter()
            .filter(|d| d.default_visible || d.always_visible)
            .map(|d| d.accessor.clone())
            .collect();
        Self {
            definitions,
            order,
            visible,
        }
    }

    /// Layout restored from stored preferences.
    ///
    /// - accessors no longer defined are dropped silently
    /// - defined columns missing from the stored order are appended in
    ///   definition order with their default visibility
    /// - always-visible columns are visible regardless of the stored value
    pub fn restore(definitions: Vec<ColumnDefinition>, prefs: Option<&ColumnPrefs>) -> Self {
        let Some(prefs) = prefs else {
            return Self::from_definitions(definitions);
        };

        let known: BTreeSet<&str> = definitions.iter().map(|d| d.accessor.as_str()).collect();
        let mentioned: BTreeSet<&str> = prefs
            .order
            .iter()
            .chain(prefs.visible.iter())
            .map(String::as_str)
            .collect();

        let mut order: Vec<String> = Vec::with_capacity(definitions.len());
        for accessor in &prefs.order {
            if known.contains(accessor.as_str()) && !order.contains(accessor) {
                order.push(accessor.clone());
            }
        }
        for definition in &definitions {
            if !order.contains(&definition.accessor) {
                order.push(definition.accessor.clone());
            }
        }

        let mut visible: BTreeSet<String> = prefs
            .visible
            .iter()
            .filter(|a| known.contains(a.as_str()))
            .cloned()
            .collect();
        for definition in &definitions {
            let is_new = !mentioned.contains(definition.accessor.as_str());
            if definition.always_visible || (is_new && definition.default_visible) {
                visible.insert(definition.accessor.clone());
            }
        }

        Self {
            definitions,
            order,
            visible,
        }
    }

    pub fn definitions(&self) -> &[ColumnDefinition] {
        &self.definitions
    }

    pub fn definition(&self, accessor: &str) -> Option<&ColumnDefinition> {
        self.definitions.iter().find(|d| d.accessor == accessor)
    }

    /// Every defined accessor in display order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Visible accessors in display order.
    pub fn visible_columns(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|a| self.visible.contains(a.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_visible(&self, accessor: &str) -> bool {
        self.visible.contains(accessor)
    }

    /// Show or hide a column. Returns whether the layout changed.
    ///
    /// Unknown accessors are ignored and always-visible columns stay visible.
    pub fn set_visible(&mut self, accessor: &str, visible: bool) -> bool {
        let Some(definition) = self.definition(accessor) else {
            return false;
        };
        if !visible && definition.always_visible {
            return false;
        }
        if visible {
            self.visible.insert(accessor.to_string())
        } else {
            self.visible.remove(accessor)
        }
    }

    /// Move a column to `to_index` (clamped). Returns whether the layout changed.
    pub fn move_column(&mut self, accessor: &str, to_index: usize) -> bool {
        let Some(from) = self.order.iter().position(|a| a == accessor) else {
            return false;
        };
        let to = to_index.min(self.order.len() - 1);
        if from == to {
            return false;
        }
        let column = self.order.remove(from);
        self.order.insert(to, column);
        true
    }

    pub fn to_prefs(&self) -> ColumnPrefs {
        ColumnPrefs {
            visible: self.visible_columns(),
            order: self.order.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("name", "Name"),
            ColumnDefinition::new("email", "Email"),
            ColumnDefinition::new("phone", "Phone").hidden_by_default(),
            ColumnDefinition::new("actions", "")
                .hidden_by_default()
                .always_visible(),
        ]
    }

    #[test]
    fn test_always_visible_without_stored_prefs() {
        let layout = ColumnLayout::restore(definitions(), None);
        assert_eq!(layout.visible_columns(), vec!["name", "email", "actions"]);
    }

    #[test]
    fn test_stored_prefs_drop_unknown_and_keep_always_visible() {
        let prefs = ColumnPrefs {
            visible: vec!["phone".into(), "legacy".into()],
            order: vec!["phone".into(), "legacy".into(), "name".into()],
        };
        let layout = ColumnLayout::restore(definitions(), Some(&prefs));

        assert_eq!(layout.order(), &["phone", "name", "email", "actions"]);
        // "name" was stored as hidden; "email" was never stored and shows by default.
        assert_eq!(layout.visible_columns(), vec!["phone", "email", "actions"]);
    }

    #[test]
    fn test_new_column_gets_default_visibility() {
        let prefs = ColumnPrefs {
            visible: vec!["name".into()],
            order: vec!["name".into(), "phone".into(), "actions".into()],
        };
        let layout = ColumnLayout::restore(definitions(), Some(&prefs));

        // "email" was never stored, so it is treated as a newly added column.
        assert!(layout.is_visible("email"));
        assert!(!layout.is_visible("phone"));
    }

    #[test]
    fn test_cannot_hide_always_visible() {
        let mut layout = ColumnLayout::from_definitions(definitions());
        assert!(!layout.set_visible("actions", false));
        assert!(layout.is_visible("actions"));
        assert!(layout.set_visible("email", false));
        assert!(!layout.set_visible("unknown", true));
    }

    #[test]
    fn test_move_column_clamps_index() {
        let mut layout = ColumnLayout::from_definitions(definitions());
        assert!(layout.move_column("name", 99));
        assert_eq!(layout.order(), &["email", "phone", "actions", "name"]);
        assert!(!layout.move_column("missing", 0));
    }

    #[test]
    fn test_prefs_roundtrip_preserves_layout() {
        let mut layout = ColumnLayout::from_definitions(definitions());
        layout.set_visible("phone", true);
        layout.move_column("phone", 0);

        let restored = ColumnLayout::restore(definitions(), Some(&layout.to_prefs()));
        assert_eq!(restored, layout);
    }
}
