//! Analytics service
//!
//! Request boundary for the reports: takes one snapshot per call and hands
//! it to the pure computations in [`crate::reports`].

use std::io::Write;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::export::csv::write_transactions_csv;
use crate::models::{DateRange, Transaction, TransactionType, UserId};
use crate::reports::{
    budget_performance, category_breakdown, insights::Insights, search, BudgetPerformance,
    CategoryShare, MonthlyTrend, Page, Summary, TransactionQuery,
};
use crate::storage::Storage;

/// Service computing reports for one user at a time
pub struct AnalyticsService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Dashboard summary over `range`
    pub fn summary(&self, user_id: UserId, range: DateRange) -> LedgerResult<Summary> {
        let snapshot = self.storage.snapshot(user_id)?;
        Ok(Summary::generate(&snapshot.transactions, range))
    }

    /// Monthly trend; `months` defaults to `Settings::trend_months`
    pub fn trend(
        &self,
        user_id: UserId,
        months: Option<u32>,
        today: NaiveDate,
    ) -> LedgerResult<MonthlyTrend> {
        let months = months.unwrap_or(self.settings.trend_months);
        let snapshot = self.storage.snapshot(user_id)?;
        MonthlyTrend::generate(&snapshot.transactions, months, today)
    }

    /// Every active budget evaluated on `as_of`
    pub fn budget_performance(
        &self,
        user_id: UserId,
        as_of: NaiveDate,
    ) -> LedgerResult<Vec<BudgetPerformance>> {
        let snapshot = self.storage.snapshot(user_id)?;
        Ok(budget_performance::evaluate_all(&snapshot, as_of))
    }

    /// Insights over `range`; `limit` defaults to `Settings::top_categories`
    pub fn insights(
        &self,
        user_id: UserId,
        range: DateRange,
        as_of: NaiveDate,
        limit: Option<usize>,
    ) -> LedgerResult<Insights> {
        let limit = limit.unwrap_or(self.settings.top_categories);
        let snapshot = self.storage.snapshot(user_id)?;
        Ok(Insights::generate(&snapshot, range, as_of, limit))
    }

    /// Per-category totals of one transaction type
    pub fn breakdown(
        &self,
        user_id: UserId,
        range: DateRange,
        txn_type: TransactionType,
    ) -> LedgerResult<Vec<CategoryShare>> {
        let snapshot = self.storage.snapshot(user_id)?;
        let categories = snapshot.category_index();
        Ok(category_breakdown(
            &snapshot.transactions,
            &categories,
            &range,
            txn_type,
        ))
    }

    /// Search with a page size clamped to `Settings::max_page_size`
    pub fn search(
        &self,
        user_id: UserId,
        criteria: &TransactionQuery,
        limit: Option<usize>,
        offset: usize,
    ) -> LedgerResult<Page<Transaction>> {
        let limit = self.settings.clamp_page_size(limit);
        let snapshot = self.storage.snapshot(user_id)?;
        let matched = search::query(&snapshot.transactions, criteria)?
            .into_iter()
            .cloned()
            .collect();
        Ok(search::paginate(matched, limit, offset))
    }

    /// Write every transaction matching `criteria` as CSV, in query order.
    /// Returns the number of rows written.
    pub fn export_csv<W: Write>(
        &self,
        user_id: UserId,
        criteria: &TransactionQuery,
        writer: &mut W,
    ) -> LedgerResult<usize> {
        let snapshot = self.storage.snapshot(user_id)?;
        let categories = snapshot.category_index();
        let matched = search::query(&snapshot.transactions, criteria)?;
        let rows = matched.len();

        tracing::debug!(rows, "exporting transactions");
        write_transactions_csv(writer, matched, &categories)?;
        Ok(rows)
    }
}
