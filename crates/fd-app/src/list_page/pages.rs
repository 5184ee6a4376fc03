//! Standard list pages of the CRM.

use fd_core::list::ColumnDefinition;

use super::ListPageConfig;

pub fn customers(page_size: usize) -> ListPageConfig {
    ListPageConfig::new(
        "customers-list",
        vec![
            ColumnDefinition::new("name", "Name").always_visible(),
            ColumnDefinition::new("email", "Email"),
            ColumnDefinition::new("phone", "Phone"),
            ColumnDefinition::new("status", "Status"),
            ColumnDefinition::new("primary_contact", "Primary contact"),
            ColumnDefinition::new("city", "City").hidden_by_default(),
            ColumnDefinition::new("contact_count", "Contacts").hidden_by_default(),
            ColumnDefinition::new("created_at", "Created").hidden_by_default(),
        ],
    )
    .search_fields(["name", "email", "phone", "primary_contact"])
    .page_size(page_size)
}

pub fn partners(page_size: usize) -> ListPageConfig {
    ListPageConfig::new(
        "partners-list",
        vec![
            ColumnDefinition::new("name", "Name").always_visible(),
            ColumnDefinition::new("email", "Email"),
            ColumnDefinition::new("title", "Title"),
            ColumnDefinition::new("active", "Active"),
        ],
    )
    .search_fields(["name", "email", "title"])
    .page_size(page_size)
}

pub fn proposals(page_size: usize) -> ListPageConfig {
    ListPageConfig::new(
        "proposals-list",
        vec![
            ColumnDefinition::new("title", "Title").always_visible(),
            ColumnDefinition::new("customer_id", "Customer"),
            ColumnDefinition::new("status", "Status"),
            ColumnDefinition::new("value", "Value"),
            ColumnDefinition::new("sent_at", "Sent").hidden_by_default(),
        ],
    )
    .search_fields(["title", "status"])
    .page_size(page_size)
}

pub fn engagement_letters(page_size: usize) -> ListPageConfig {
    ListPageConfig::new(
        "engagement-letters-list",
        vec![
            ColumnDefinition::new("reference", "Reference").always_visible(),
            ColumnDefinition::new("proposal_id", "Proposal"),
            ColumnDefinition::new("customer_id", "Customer"),
            ColumnDefinition::new("status", "Status"),
            ColumnDefinition::new("signed_at", "Signed"),
        ],
    )
    .search_fields(["reference", "status"])
    .page_size(page_size)
}

pub fn engagements(page_size: usize) -> ListPageConfig {
    ListPageConfig::new(
        "engagements-list",
        vec![
            ColumnDefinition::new("name", "Name").always_visible(),
            ColumnDefinition::new("customer_id", "Customer"),
            ColumnDefinition::new("status", "Status"),
            ColumnDefinition::new("start_date", "Start"),
            ColumnDefinition::new("end_date", "End"),
            ColumnDefinition::new("budget", "Budget").hidden_by_default(),
        ],
    )
    .search_fields(["name", "status"])
    .page_size(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_fields_are_defined_columns() {
        for config in [
            customers(25),
            partners(25),
            proposals(25),
            engagement_letters(25),
            engagements(25),
        ] {
            for field in &config.search_fields {
                assert!(
                    config.columns.iter().any(|c| &c.accessor == field),
                    "{} searches undefined column {field}",
                    config.storage_key
                );
            }
        }
    }
}
