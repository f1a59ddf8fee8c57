//! Monthly Trend
//!
//! Income and expense per calendar month over the last `n` months, oldest
//! first. Months without transactions are reported as zero.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::period::{first_of_month, last_of_month};
use crate::models::{Money, Transaction, TransactionType};

/// One month of the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// First day of the month
    pub month: NaiveDate,
    /// Axis label, e.g. "Jan 2024"
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

/// Column-oriented form: three sequences of equal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub months: Vec<String>,
    pub income: Vec<Money>,
    pub expenses: Vec<Money>,
}

/// Monthly income/expense trend ending at the current month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub points: Vec<TrendPoint>,
}

impl MonthlyTrend {
    /// Build `month_count` consecutive months ending with the month of `today`
    pub fn generate(
        transactions: &[Transaction],
        month_count: u32,
        today: NaiveDate,
    ) -> LedgerResult<Self> {
        if month_count == 0 {
            return Err(LedgerError::Validation(
                "month count must be at least 1".to_string(),
            ));
        }

        let current = first_of_month(today);
        let oldest = current
            .checked_sub_months(Months::new(month_count - 1))
            .ok_or_else(|| {
                LedgerError::Validation(format!("{} months before {} is out of range", month_count, today))
            })?;
        let newest_day = last_of_month(current);

        let mut buckets: HashMap<NaiveDate, (Money, Money)> = HashMap::new();
        for txn in transactions
            .iter()
            .filter(|t| t.date >= oldest && t.date <= newest_day)
        {
            let bucket = buckets.entry(first_of_month(txn.date)).or_default();
            match txn.txn_type {
                TransactionType::Income => bucket.0 += txn.amount,
                TransactionType::Expense => bucket.1 += txn.amount,
            }
        }

        let mut points = Vec::with_capacity(month_count as usize);
        let mut month = oldest;
        for _ in 0..month_count {
            let (income, expense) = buckets.get(&month).copied().unwrap_or_default();
            points.push(TrendPoint {
                month,
                label: month.format("%b %Y").to_string(),
                income,
                expense,
            });
            // Only the final step can run past the calendar; the loop ends there
            month = month.checked_add_months(Months::new(1)).unwrap_or(month);
        }

        tracing::debug!(months = month_count, from = %oldest, "computed monthly trend");
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The three-sequence shape used by chart clients
    pub fn series(&self) -> TrendSeries {
        TrendSeries {
            months: self.points.iter().map(|p| p.label.clone()).collect(),
            income: self.points.iter().map(|p| p.income).collect(),
            expenses: self.points.iter().map(|p| p.expense).collect(),
        }
    }
}
