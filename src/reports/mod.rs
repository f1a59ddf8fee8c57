//! Reports module for ledger-lens
//!
//! The analytics engine: pure computations over a [`LedgerSnapshot`] or a
//! transaction slice. Nothing here reads the store or the clock.
//!
//! [`LedgerSnapshot`]: crate::models::LedgerSnapshot

pub mod budget_performance;
pub mod insights;
pub mod search;
pub mod summary;
pub mod trend;

pub use budget_performance::{evaluate_all, BudgetPerformance, BudgetStatus};
pub use insights::{
    category_breakdown, largest_transaction, top_categories, CategoryShare, Insights,
    LargestTransaction, SpendingTrend, TrendDirection,
};
pub use search::{paginate, query, Page, QueryParams, SortOrder, TransactionQuery, TypeFilter};
pub use summary::{PeriodTotals, Summary};
pub use trend::{MonthlyTrend, TrendPoint, TrendSeries};
