//! Insights
//!
//! Top spending categories, savings rate and the direction of spending
//! compared with the previous period.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::budget_performance::{evaluate_all, BudgetPerformance, BudgetStatus};
use super::summary::{percent_change, CategoryTotal, PeriodTotals, Summary};
use crate::models::{
    CategoryId, CategoryIndex, DateRange, LedgerSnapshot, Money, Transaction, TransactionType,
};

/// Changes within this many percent either way count as stable
pub const TREND_STABILITY_BAND_PCT: f64 = 5.0;

/// Direction of spending against the preceding range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct > TREND_STABILITY_BAND_PCT {
            Self::Increasing
        } else if change_pct < -TREND_STABILITY_BAND_PCT {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Expense of a range compared with the equal-length range before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub direction: TrendDirection,
    pub change_pct: f64,
    pub current_expense: Money,
    pub previous_expense: Money,
}

impl SpendingTrend {
    pub fn generate(transactions: &[Transaction], range: &DateRange) -> Self {
        let current_expense = PeriodTotals::collect(transactions, range).expense;
        let previous_expense = PeriodTotals::collect(transactions, &range.preceding()).expense;
        let change_pct = percent_change(previous_expense, current_expense);

        Self {
            direction: TrendDirection::from_change(change_pct),
            change_pct,
            current_expense,
            previous_expense,
        }
    }
}

/// One category's share of a transaction type's total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// `None` is the "Uncategorized" bucket
    pub category_id: Option<CategoryId>,
    #[serde(rename = "category")]
    pub category_name: String,
    pub total_amount: Money,
    pub transaction_count: usize,
    #[serde(rename = "percentage_of_total_expense")]
    pub percentage_of_total: f64,
}

/// Per-category totals of `txn_type` in `range`, largest first.
///
/// References to missing categories fold into "Uncategorized". Equal totals
/// are ordered by category ID, with "Uncategorized" after named categories.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &CategoryIndex<'_>,
    range: &DateRange,
    txn_type: TransactionType,
) -> Vec<CategoryShare> {
    let mut buckets: HashMap<Option<CategoryId>, CategoryTotal> = HashMap::new();
    let mut dangling = 0usize;

    for txn in transactions
        .iter()
        .filter(|t| t.txn_type == txn_type && range.contains(t.date))
    {
        let key = categories.effective_id(txn.category_id);
        if key.is_none() && txn.category_id.is_some() {
            dangling += 1;
        }
        let bucket = buckets.entry(key).or_default();
        bucket.total += txn.amount;
        bucket.count += 1;
    }

    if dangling > 0 {
        tracing::warn!(dangling, "transactions reference missing categories; counted as uncategorized");
    }

    let grand_total: Money = buckets.values().map(|b| b.total).sum();

    let mut shares: Vec<_> = buckets
        .into_iter()
        .filter(|(_, b)| !b.total.is_zero())
        .map(|(category_id, b)| CategoryShare {
            category_id,
            category_name: categories.name_for(category_id).to_string(),
            total_amount: b.total,
            transaction_count: b.count,
            percentage_of_total: b.total.percent_of(grand_total).unwrap_or(0.0),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(a.category_id.is_none().cmp(&b.category_id.is_none()))
            .then(a.category_id.cmp(&b.category_id))
    });
    shares
}

/// The `limit` largest expense categories in `range`
pub fn top_categories(
    transactions: &[Transaction],
    categories: &CategoryIndex<'_>,
    range: &DateRange,
    limit: usize,
) -> Vec<CategoryShare> {
    let mut shares = category_breakdown(transactions, categories, range, TransactionType::Expense);
    shares.truncate(limit);
    shares
}

/// The single largest transaction of a range, with its category resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargestTransaction {
    #[serde(rename = "category")]
    pub category_name: String,
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// Largest transaction of any type in `range`; equal amounts go to the
/// smaller transaction ID
pub fn largest_transaction(
    transactions: &[Transaction],
    categories: &CategoryIndex<'_>,
    range: &DateRange,
) -> Option<LargestTransaction> {
    transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .max_by(|a, b| a.amount.cmp(&b.amount).then(b.id.cmp(&a.id)))
        .map(|t| LargestTransaction {
            category_name: categories.name_for(t.category_id).to_string(),
            transaction: t.clone(),
        })
}

/// Insights for one range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub range: DateRange,
    pub top_categories: Vec<CategoryShare>,
    pub savings_rate: f64,
    pub spending_trend: SpendingTrend,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_savings: Money,
    pub avg_daily_spending: Money,
    pub period_days: i64,
    /// `None` when the range has no transactions
    pub largest_transaction: Option<LargestTransaction>,
    /// Budgets not in the safe state on the evaluation date
    pub budget_alerts: Vec<BudgetPerformance>,
}

impl Insights {
    pub fn generate(
        snapshot: &LedgerSnapshot,
        range: DateRange,
        as_of: NaiveDate,
        limit: usize,
    ) -> Self {
        let categories = snapshot.category_index();
        let summary = Summary::generate(&snapshot.transactions, range);

        let budget_alerts = evaluate_all(snapshot, as_of)
            .into_iter()
            .filter(|row| row.status != BudgetStatus::Safe)
            .collect();

        Self {
            range,
            top_categories: top_categories(&snapshot.transactions, &categories, &range, limit),
            savings_rate: summary.savings_rate,
            spending_trend: SpendingTrend::generate(&snapshot.transactions, &range),
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            net_savings: summary.net_balance,
            avg_daily_spending: summary.avg_daily_spending,
            period_days: range.day_count(),
            largest_transaction: largest_transaction(&snapshot.transactions, &categories, &range),
            budget_alerts,
        }
    }
}
