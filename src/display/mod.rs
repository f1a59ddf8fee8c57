//! Display formatting for terminal output
//!
//! Table and text rendering of report records. Reports return plain data;
//! currency symbols and date formats are applied only here.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::format_category_list;
pub use report::{
    format_breakdown, format_budget_list, format_budget_performance, format_insights,
    format_summary, format_trend,
};
pub use transaction::{format_transaction_details, format_transaction_page};

use tabled::{settings::Style, Table, Tabled};

/// Render rows as a rounded table
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// "12.5%" with one decimal
pub(crate) fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Shorten to at most `max_chars` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
