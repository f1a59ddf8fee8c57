//! Category display formatting

use tabled::Tabled;

use super::render_table;
use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Colour")]
    color: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'ledger init' to create default categories.\n"
            .to_string();
    }

    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            icon: c.icon.clone(),
            name: c.name.clone(),
            kind: c.category_type.to_string(),
            color: c.color.clone(),
            id: c.id.to_string(),
        })
        .collect();

    format!("{}\n{} categories\n", render_table(rows), categories.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn test_empty_list_hints_at_init() {
        assert!(format_category_list(&[]).contains("ledger init"));
    }

    #[test]
    fn test_list_shows_names_and_types() {
        let categories = vec![
            Category::new("Salary", TransactionType::Income),
            Category::new("Travel", TransactionType::Expense),
        ];
        let output = format_category_list(&categories);
        assert!(output.contains("Salary"));
        assert!(output.contains("expense"));
        assert!(output.contains("2 categories"));
    }
}
