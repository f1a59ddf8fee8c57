//! Core data models for ledger-lens
//!
//! This module contains the records the analytics engine reads: transactions,
//! categories and budgets, plus the value types they are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod snapshot;
pub mod transaction;

pub use budget::Budget;
pub use category::{default_categories, Category, UNCATEGORIZED_LABEL};
pub use ids::{BudgetId, CategoryId, TransactionId, UserId};
pub use money::Money;
pub use period::{BudgetPeriod, DateRange, PeriodError};
pub use snapshot::{CategoryIndex, LedgerSnapshot};
pub use transaction::{Transaction, TransactionType};
