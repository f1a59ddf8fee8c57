//! Period Summary
//!
//! Income, expense and balance totals for a date range, compared against the
//! equal-length range immediately before it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, DateRange, Money, Transaction, TransactionType};

/// Change reported when a metric grows from a zero baseline
pub const GROWTH_FROM_ZERO_PCT: f64 = 100.0;

/// Totals of the transactions dated inside one range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: Money,
    pub expense: Money,
    /// Largest single amount of either type
    pub largest: Money,
    pub count: usize,
}

impl PeriodTotals {
    /// Reduce the transactions dated inside `range`
    pub fn collect<'a, I>(transactions: I, range: &DateRange) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for txn in transactions.into_iter().filter(|t| range.contains(t.date)) {
            match txn.txn_type {
                TransactionType::Income => totals.income += txn.amount,
                TransactionType::Expense => totals.expense += txn.amount,
            }
            totals.largest = totals.largest.max(txn.amount);
            totals.count += 1;
        }
        totals
    }

    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Sum and count for one category bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub total: Money,
    pub count: usize,
}

/// Per-category sums of one transaction type inside `range`, keyed by the raw
/// category reference (`None` for uncategorized)
pub fn category_totals<'a, I>(
    transactions: I,
    txn_type: TransactionType,
    range: &DateRange,
) -> HashMap<Option<CategoryId>, CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: HashMap<Option<CategoryId>, CategoryTotal> = HashMap::new();
    for txn in transactions
        .into_iter()
        .filter(|t| t.txn_type == txn_type && range.contains(t.date))
    {
        let entry = totals.entry(txn.category_id).or_default();
        entry.total += txn.amount;
        entry.count += 1;
    }
    totals
}

/// `net / income * 100`, or 0 when there is no income
pub fn savings_rate(income: Money, expense: Money) -> f64 {
    if income.is_positive() {
        (income - expense).percent_of(income).unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline yields 0 when `current` is also zero, otherwise
/// `±GROWTH_FROM_ZERO_PCT` following the sign of `current`. A negative
/// baseline (possible for balances) is measured against its magnitude.
pub fn percent_change(previous: Money, current: Money) -> f64 {
    if previous.is_zero() {
        return if current.is_zero() {
            0.0
        } else if current.is_positive() {
            GROWTH_FROM_ZERO_PCT
        } else {
            -GROWTH_FROM_ZERO_PCT
        };
    }
    (current - previous).percent_of(previous.abs()).unwrap_or(0.0)
}

/// Dashboard summary for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The range summarized
    pub range: DateRange,
    /// Sum of income amounts in range
    pub total_income: Money,
    /// Sum of expense amounts in range
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub net_balance: Money,
    /// Share of income kept, 0 when there was no income
    pub savings_rate: f64,
    /// Expense per day of the range, rounded to the cent
    pub avg_daily_spending: Money,
    /// Largest amount of any type in range
    pub largest_transaction: Money,
    /// Number of transactions in range
    pub transaction_count: usize,
    /// Change of `total_income` against the preceding range
    #[serde(rename = "income_change")]
    pub income_change_pct: f64,
    /// Change of `total_expense` against the preceding range
    #[serde(rename = "expense_change")]
    pub expense_change_pct: f64,
    /// Change of `net_balance` against the preceding range
    #[serde(rename = "balance_change")]
    pub balance_change_pct: f64,
}

impl Summary {
    /// Summarize `transactions` over `range`
    pub fn generate(transactions: &[Transaction], range: DateRange) -> Self {
        let current = PeriodTotals::collect(transactions, &range);
        let previous = PeriodTotals::collect(transactions, &range.preceding());

        tracing::debug!(%range, count = current.count, "computed summary");

        Self {
            range,
            total_income: current.income,
            total_expense: current.expense,
            net_balance: current.net(),
            savings_rate: savings_rate(current.income, current.expense),
            avg_daily_spending: current.expense.divide_rounded(range.day_count()),
            largest_transaction: current.largest,
            transaction_count: current.count,
            income_change_pct: percent_change(previous.income, current.income),
            expense_change_pct: percent_change(previous.expense, current.expense),
            balance_change_pct: percent_change(previous.net(), current.net()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(txn_type: TransactionType, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(UserId::from_u128(1), txn_type, Money::from_cents(cents), on)
    }

    fn january() -> DateRange {
        DateRange::month(2024, 1).unwrap()
    }

    #[test]
    fn test_january_scenario() {
        let transactions = vec![
            txn(TransactionType::Expense, 10000, date(2024, 1, 5)),
            txn(TransactionType::Income, 50000, date(2024, 1, 10)),
        ];

        let summary = Summary::generate(&transactions, january());
        assert_eq!(summary.total_income, Money::from_cents(50000));
        assert_eq!(summary.total_expense, Money::from_cents(10000));
        assert_eq!(summary.net_balance, Money::from_cents(40000));
        assert_eq!(summary.savings_rate, 80.0);
        assert_eq!(summary.largest_transaction, Money::from_cents(50000));
        assert_eq!(summary.transaction_count, 2);
        // 100.00 / 31 days
        assert_eq!(summary.avg_daily_spending, Money::from_cents(323));
        // Nothing in December: growth from zero
        assert_eq!(summary.income_change_pct, GROWTH_FROM_ZERO_PCT);
        assert_eq!(summary.expense_change_pct, GROWTH_FROM_ZERO_PCT);
        assert_eq!(summary.balance_change_pct, GROWTH_FROM_ZERO_PCT);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let transactions = vec![
            txn(TransactionType::Expense, 100, date(2023, 12, 31)),
            txn(TransactionType::Expense, 200, date(2024, 1, 1)),
            txn(TransactionType::Expense, 400, date(2024, 1, 31)),
            txn(TransactionType::Expense, 800, date(2024, 2, 1)),
        ];

        let summary = Summary::generate(&transactions, january());
        assert_eq!(summary.total_expense, Money::from_cents(600));
    }

    #[test]
    fn test_net_balance_identity() {
        let transactions = vec![
            txn(TransactionType::Expense, 12345, date(2024, 1, 2)),
            txn(TransactionType::Expense, 999, date(2024, 1, 3)),
            txn(TransactionType::Income, 5000, date(2024, 1, 4)),
        ];

        let summary = Summary::generate(&transactions, january());
        assert_eq!(
            summary.net_balance,
            summary.total_income - summary.total_expense
        );
        assert!(summary.net_balance.is_negative());
        assert!(summary.savings_rate < 0.0);
    }

    #[test]
    fn test_savings_rate_zero_without_income() {
        let transactions = vec![txn(TransactionType::Expense, 5000, date(2024, 1, 9))];
        let summary = Summary::generate(&transactions, january());
        assert_eq!(summary.savings_rate, 0.0);
        assert_eq!(savings_rate(Money::zero(), Money::zero()), 0.0);
    }

    #[test]
    fn test_empty_range_is_all_zero() {
        let summary = Summary::generate(&[], january());
        assert_eq!(summary.total_income, Money::zero());
        assert_eq!(summary.largest_transaction, Money::zero());
        assert_eq!(summary.avg_daily_spending, Money::zero());
        assert_eq!(summary.income_change_pct, 0.0);
        assert_eq!(summary.balance_change_pct, 0.0);
    }

    #[test]
    fn test_change_against_preceding_range() {
        let transactions = vec![
            // December 2023 (the preceding 31 days)
            txn(TransactionType::Expense, 20000, date(2023, 12, 15)),
            txn(TransactionType::Income, 40000, date(2023, 12, 1)),
            // January 2024
            txn(TransactionType::Expense, 25000, date(2024, 1, 15)),
            txn(TransactionType::Income, 30000, date(2024, 1, 1)),
        ];

        let summary = Summary::generate(&transactions, january());
        assert_eq!(summary.expense_change_pct, 25.0);
        assert_eq!(summary.income_change_pct, -25.0);
        // Balance 200.00 -> 50.00
        assert_eq!(summary.balance_change_pct, -75.0);
    }

    #[test]
    fn test_percent_change_conventions() {
        assert_eq!(percent_change(Money::zero(), Money::zero()), 0.0);
        assert_eq!(percent_change(Money::zero(), Money::from_cents(1)), 100.0);
        assert_eq!(percent_change(Money::zero(), Money::from_cents(-1)), -100.0);
        // -100.00 -> 50.00 is an improvement of 150%
        assert_eq!(
            percent_change(Money::from_cents(-10000), Money::from_cents(5000)),
            150.0
        );
    }

    #[test]
    fn test_category_totals() {
        let food = CategoryId::from_u128(7);
        let mut coffee = txn(TransactionType::Expense, 450, date(2024, 1, 3));
        coffee.category_id = Some(food);
        let mut lunch = txn(TransactionType::Expense, 1200, date(2024, 1, 4));
        lunch.category_id = Some(food);
        let loose = txn(TransactionType::Expense, 300, date(2024, 1, 5));
        let salary = txn(TransactionType::Income, 90000, date(2024, 1, 5));
        let transactions = vec![coffee, lunch, loose, salary];

        let totals = category_totals(&transactions, TransactionType::Expense, &january());
        assert_eq!(totals.len(), 2);
        assert_eq!(
            totals[&Some(food)],
            CategoryTotal {
                total: Money::from_cents(1650),
                count: 2
            }
        );
        assert_eq!(totals[&None].total, Money::from_cents(300));
    }

    #[test]
    fn test_leap_february() {
        let transactions = vec![txn(TransactionType::Income, 1000, date(2024, 2, 29))];
        let summary = Summary::generate(&transactions, DateRange::month(2024, 2).unwrap());
        assert_eq!(summary.total_income, Money::from_cents(1000));
        assert_eq!(summary.range.day_count(), 29);
        assert_eq!(summary.avg_daily_spending, Money::zero());
    }
}
