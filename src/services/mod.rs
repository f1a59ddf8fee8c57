//! Service layer for ledger-lens
//!
//! The request boundary: validation and persistence on the write path,
//! snapshot-then-compute on the read path.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod period;
pub mod transaction;

pub use analytics::AnalyticsService;
pub use budget::{BudgetService, SetBudgetInput};
pub use category::CategoryService;
pub use period::PeriodService;
pub use transaction::{CreateTransactionInput, TransactionPatch, TransactionService};
