//! Report formatting for terminal output
//!
//! Headers and totals are laid out by hand; record lists go through tabled.

use tabled::Tabled;

use super::{format_pct, render_table};
use crate::models::{Budget, CategoryIndex, Money};
use crate::reports::{BudgetPerformance, CategoryShare, Insights, MonthlyTrend, Summary};

const WIDTH: usize = 60;

/// Signed percentage, "+12.5%" / "-3.0%"
fn format_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Horizontal bar proportional to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn separator() -> String {
    "─".repeat(WIDTH)
}

fn title(text: &str, subtitle: &str) -> String {
    format!("{}\n{}\n{}\n", text, subtitle, "═".repeat(WIDTH))
}

/// Format the dashboard summary
pub fn format_summary(summary: &Summary, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = title("Summary", &summary.range.to_string());

    output.push_str(&format!(
        "{:<22} {:>16} {:>12}\n",
        "Income",
        money(summary.total_income),
        format_change(summary.income_change_pct)
    ));
    output.push_str(&format!(
        "{:<22} {:>16} {:>12}\n",
        "Expenses",
        money(summary.total_expense),
        format_change(summary.expense_change_pct)
    ));
    output.push_str(&format!(
        "{:<22} {:>16} {:>12}\n",
        "Net balance",
        money(summary.net_balance),
        format_change(summary.balance_change_pct)
    ));
    output.push_str(&separator());
    output.push('\n');
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Savings rate",
        format_pct(summary.savings_rate)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Avg daily spending",
        money(summary.avg_daily_spending)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Largest transaction",
        money(summary.largest_transaction)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Transactions", summary.transaction_count
    ));
    output.push_str("\nChanges are against the preceding period of equal length.\n");

    output
}

/// Format the monthly trend with expense bars
pub fn format_trend(trend: &MonthlyTrend, symbol: &str) -> String {
    let mut output = title("Monthly Trend", &format!("Last {} months", trend.len()));

    let max = trend
        .points
        .iter()
        .flat_map(|p| [p.income, p.expense])
        .max()
        .unwrap_or_default();

    output.push_str(&format!(
        "{:<10} {:>14} {:>14}  {}\n",
        "Month", "Income", "Expenses", "Spending"
    ));
    output.push_str(&separator());
    output.push('\n');

    for point in &trend.points {
        output.push_str(&format!(
            "{:<10} {:>14} {:>14}  {}\n",
            point.label,
            point.income.format_with_symbol(symbol),
            point.expense.format_with_symbol(symbol),
            format_bar(point.expense.as_f64(), max.as_f64(), 16)
        ));
    }

    output
}

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format evaluated budgets
pub fn format_budget_performance(rows: &[BudgetPerformance], symbol: &str) -> String {
    if rows.is_empty() {
        return "No active budgets.\n\nUse 'ledger budget set' to create one.\n".to_string();
    }

    let table_rows = rows
        .iter()
        .map(|row| PerformanceRow {
            category: row.category_name.clone(),
            period: row.period.to_string(),
            window: row
                .window
                .map(|w| w.to_string())
                .unwrap_or_else(|| "not started".to_string()),
            budget: row.budget_amount.format_with_symbol(symbol),
            spent: row.actual_spent.format_with_symbol(symbol),
            used: format_pct(row.percentage),
            remaining: row.remaining.format_with_symbol(symbol),
            status: row.status.to_string(),
        })
        .collect();

    let over = rows.iter().filter(|r| r.is_over()).count();
    let mut output = render_table(table_rows);
    output.push('\n');
    if over > 0 {
        output.push_str(&format!("{} of {} budgets exceeded\n", over, rows.len()));
    }
    output
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

/// Format configured budgets
pub fn format_budget_list(budgets: &[Budget], categories: &CategoryIndex<'_>, symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets configured.\n".to_string();
    }

    let rows = budgets
        .iter()
        .map(|b| BudgetRow {
            id: b.id.to_string(),
            category: categories.name_for(Some(b.category_id)).to_string(),
            amount: b.amount.format_with_symbol(symbol),
            period: b.period.to_string(),
            start: b.start_date.format("%Y-%m-%d").to_string(),
            active: if b.active { "yes" } else { "no" },
        })
        .collect();

    format!("{}\n", render_table(rows))
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

fn share_rows(shares: &[CategoryShare], symbol: &str) -> Vec<ShareRow> {
    shares
        .iter()
        .map(|s| ShareRow {
            category: s.category_name.clone(),
            total: s.total_amount.format_with_symbol(symbol),
            count: s.transaction_count,
            share: format_pct(s.percentage_of_total),
        })
        .collect()
}

/// Format a per-category breakdown
pub fn format_breakdown(shares: &[CategoryShare], heading: &str, symbol: &str) -> String {
    let mut output = title("Category Breakdown", heading);
    if shares.is_empty() {
        output.push_str("No transactions in this period.\n");
        return output;
    }
    output.push_str(&render_table(share_rows(shares, symbol)));
    output.push('\n');
    output
}

/// Format the insights report
pub fn format_insights(insights: &Insights, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = title(
        "Insights",
        &format!("{} ({} days)", insights.range, insights.period_days),
    );

    output.push_str(&format!("{:<22} {:>16}\n", "Income", money(insights.total_income)));
    output.push_str(&format!("{:<22} {:>16}\n", "Expenses", money(insights.total_expense)));
    output.push_str(&format!("{:<22} {:>16}\n", "Net savings", money(insights.net_savings)));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Savings rate",
        format_pct(insights.savings_rate)
    ));
    output.push_str(&format!(
        "{:<22} {:>16}\n",
        "Avg daily spending",
        money(insights.avg_daily_spending)
    ));

    if let Some(largest) = &insights.largest_transaction {
        let txn = &largest.transaction;
        output.push_str(&format!(
            "{:<22} {:>16}  {} {}, {}\n",
            "Largest transaction",
            money(txn.amount),
            txn.date.format("%Y-%m-%d"),
            largest.category_name,
            txn.txn_type
        ));
    }

    let trend = &insights.spending_trend;
    output.push_str(&format!(
        "\nSpending is {} ({}, {} -> {})\n",
        trend.direction,
        format_change(trend.change_pct),
        money(trend.previous_expense),
        money(trend.current_expense)
    ));

    output.push_str("\nTop spending categories\n");
    if insights.top_categories.is_empty() {
        output.push_str("  none\n");
    } else {
        output.push_str(&render_table(share_rows(&insights.top_categories, symbol)));
        output.push('\n');
    }

    if !insights.budget_alerts.is_empty() {
        output.push_str("\nBudget alerts\n");
        for alert in &insights.budget_alerts {
            output.push_str(&format!(
                "  [{}] {} {} of {} ({})\n",
                alert.status,
                alert.category_name,
                money(alert.actual_spent),
                money(alert.budget_amount),
                format_pct(alert.percentage)
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Transaction, TransactionType, UserId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(0.0, 10.0, 3), "   ");
        assert_eq!(format_bar(20.0, 10.0, 2), "██");
    }

    #[test]
    fn test_format_change_sign() {
        assert_eq!(format_change(12.5), "+12.5%");
        assert_eq!(format_change(-3.0), "-3.0%");
        assert_eq!(format_change(0.0), "0.0%");
    }

    #[test]
    fn test_summary_output() {
        let user = UserId::new();
        let transactions = vec![
            Transaction::new(user, TransactionType::Expense, Money::from_cents(10000), date(2024, 1, 5)),
            Transaction::new(user, TransactionType::Income, Money::from_cents(50000), date(2024, 1, 10)),
        ];
        let summary = Summary::generate(&transactions, DateRange::month(2024, 1).unwrap());
        let output = format_summary(&summary, "$");

        assert!(output.contains("2024-01-01..2024-01-31"));
        assert!(output.contains("$500.00"));
        assert!(output.contains("$400.00"));
        assert!(output.contains("80.0%"));
    }

    #[test]
    fn test_trend_output_lists_every_month() {
        let trend = MonthlyTrend::generate(&[], 3, date(2024, 3, 15)).unwrap();
        let output = format_trend(&trend, "$");
        assert!(output.contains("Jan 2024"));
        assert!(output.contains("Feb 2024"));
        assert!(output.contains("Mar 2024"));
    }

    #[test]
    fn test_empty_budget_performance() {
        assert!(format_budget_performance(&[], "$").contains("No active budgets"));
    }
}
