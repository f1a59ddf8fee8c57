//! Transaction display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::{CategoryIndex, Transaction};
use crate::reports::Page;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format one page of transactions with a position footer
pub fn format_transaction_page(
    page: &Page<Transaction>,
    categories: &CategoryIndex<'_>,
    symbol: &str,
    date_format: &str,
) -> String {
    if page.items.is_empty() {
        return if page.total == 0 {
            "No transactions found.\n".to_string()
        } else {
            format!("No transactions at offset {} ({} total).\n", page.offset, page.total)
        };
    }

    let rows = page
        .items
        .iter()
        .map(|t| TransactionRow {
            date: t.date.format(date_format).to_string(),
            kind: t.txn_type.as_str(),
            category: categories.name_for(t.category_id).to_string(),
            description: truncate(&t.description, 40),
            amount: t.amount.format_with_symbol(symbol),
            id: t.id.to_string(),
        })
        .collect();

    let first = page.offset + 1;
    let last = page.offset + page.items.len();
    let mut output = render_table(rows);
    output.push_str(&format!("\nShowing {}-{} of {}", first, last, page.total));
    if page.has_more {
        output.push_str(&format!(" (next: --offset {})", last));
    }
    output.push('\n');
    output
}

/// Format transaction details after it was recorded
pub fn format_transaction_details(txn: &Transaction, category_name: &str, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.txn_type));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", category_name));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType, UserId};
    use crate::reports::paginate;
    use chrono::NaiveDate;

    fn txns(n: u32) -> Vec<Transaction> {
        (1..=n)
            .map(|day| {
                Transaction::with_details(
                    UserId::new(),
                    TransactionType::Expense,
                    Money::from_cents(1000 + day as i64),
                    NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    None,
                    "Lunch",
                )
            })
            .collect()
    }

    #[test]
    fn test_page_footer() {
        let page = paginate(txns(5), 2, 2);
        let output = format_transaction_page(&page, &CategoryIndex::default(), "$", "%Y-%m-%d");

        assert!(output.contains("Showing 3-4 of 5"));
        assert!(output.contains("--offset 4"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("$10.03"));
    }

    #[test]
    fn test_empty_pages() {
        let empty = paginate(Vec::<Transaction>::new(), 10, 0);
        assert_eq!(
            format_transaction_page(&empty, &CategoryIndex::default(), "$", "%Y-%m-%d"),
            "No transactions found.\n"
        );

        let past_end = paginate(txns(2), 10, 5);
        assert!(format_transaction_page(&past_end, &CategoryIndex::default(), "$", "%Y-%m-%d")
            .contains("offset 5"));
    }

    #[test]
    fn test_details() {
        let txn = &txns(1)[0];
        let output = format_transaction_details(txn, "Food & Dining", "€");
        assert!(output.contains("Category:    Food & Dining"));
        assert!(output.contains("€10.01"));
    }
}
