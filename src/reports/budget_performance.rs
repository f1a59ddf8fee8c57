//! Budget Performance
//!
//! Spend against each budget inside its current period window.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::summary::category_totals;
use crate::models::{
    Budget, BudgetId, BudgetPeriod, CategoryId, CategoryIndex, DateRange, LedgerSnapshot, Money,
    Transaction, TransactionType,
};

/// Percentage at which a budget turns from safe to warning
pub const WARNING_THRESHOLD_PCT: f64 = 80.0;

/// Percentage at which a budget is considered exhausted
pub const DANGER_THRESHOLD_PCT: f64 = 100.0;

/// Health of a budget in its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= DANGER_THRESHOLD_PCT {
            Self::Danger
        } else if percentage >= WARNING_THRESHOLD_PCT {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One budget evaluated on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPerformance {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    /// Category name, "Uncategorized" when the category no longer exists
    #[serde(rename = "category")]
    pub category_name: String,
    pub period: BudgetPeriod,
    /// Window evaluated; `None` when the budget has not started
    pub window: Option<DateRange>,
    pub budget_amount: Money,
    pub actual_spent: Money,
    pub percentage: f64,
    /// Negative when over budget
    pub remaining: Money,
    pub status: BudgetStatus,
}

impl BudgetPerformance {
    /// Evaluate `budget` as of `as_of`
    pub fn evaluate(
        budget: &Budget,
        transactions: &[Transaction],
        categories: &CategoryIndex<'_>,
        as_of: NaiveDate,
    ) -> Self {
        let window = budget.window(as_of);

        let actual_spent = window
            .as_ref()
            .and_then(|w| {
                category_totals(transactions, TransactionType::Expense, w)
                    .get(&Some(budget.category_id))
                    .map(|t| t.total)
            })
            .unwrap_or_default();

        let percentage = spent_percentage(actual_spent, budget.amount);

        if categories.resolve(Some(budget.category_id)).is_none() {
            tracing::warn!(budget = %budget.id, category = %budget.category_id, "budget references a missing category");
        }

        Self {
            budget_id: budget.id,
            category_id: budget.category_id,
            category_name: categories.name_for(Some(budget.category_id)).to_string(),
            period: budget.period,
            window,
            budget_amount: budget.amount,
            actual_spent,
            percentage,
            remaining: budget.amount - actual_spent,
            status: BudgetStatus::from_percentage(percentage),
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// `spent / limit * 100`. A zero limit reads as 0 with no spend and
/// saturates at the danger threshold otherwise.
pub fn spent_percentage(spent: Money, limit: Money) -> f64 {
    if limit.is_positive() {
        spent.percent_of(limit).unwrap_or(0.0)
    } else if spent.is_zero() {
        0.0
    } else {
        DANGER_THRESHOLD_PCT
    }
}

/// Evaluate every active budget in the snapshot, ordered by category name
/// then budget ID
pub fn evaluate_all(snapshot: &LedgerSnapshot, as_of: NaiveDate) -> Vec<BudgetPerformance> {
    let categories = snapshot.category_index();
    let mut rows: Vec<_> = snapshot
        .budgets
        .iter()
        .filter(|b| b.active)
        .map(|b| BudgetPerformance::evaluate(b, &snapshot.transactions, &categories, as_of))
        .collect();

    rows.sort_by(|a, b| {
        a.category_name
            .cmp(&b.category_name)
            .then(a.budget_id.cmp(&b.budget_id))
    });

    tracing::debug!(budgets = rows.len(), %as_of, "evaluated budgets");
    rows
}
