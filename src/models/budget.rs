//! Budget model
//!
//! A spending limit for one expense category that resets every period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::period::{BudgetPeriod, DateRange};

/// A recurring spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owner of this budget
    pub user_id: UserId,

    /// The expense category being limited
    pub category_id: CategoryId,

    /// The limit per period
    pub amount: Money,

    /// How often the limit resets
    #[serde(default)]
    pub period: BudgetPeriod,

    /// Anchor date; weekly windows recur every 7 days from here
    pub start_date: NaiveDate,

    /// Inactive budgets are kept but not evaluated
    #[serde(default = "default_active")]
    pub active: bool,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create a new budget
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category_id,
            amount,
            period,
            start_date,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the limit
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// The current window on `as_of`, or `None` before `start_date`
    pub fn window(&self, as_of: NaiveDate) -> Option<DateRange> {
        self.period.window(self.start_date, as_of)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} from {}",
            self.amount,
            self.period,
            self.start_date.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
