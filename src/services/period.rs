//! Period service
//!
//! Turns user-facing range expressions ("this-month", "last-30-days",
//! "2025-01", "jan") into concrete date ranges.

use chrono::{Datelike, Local, Months, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::DateRange;

/// Preset used when no range is given
pub const DEFAULT_PRESET: &str = "this-month";

/// Service for resolving reporting ranges
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Today's date in the local timezone
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Resolve `expr`, or the default preset when absent
    pub fn resolve_or_default(&self, expr: Option<&str>, today: NaiveDate) -> LedgerResult<DateRange> {
        self.resolve(expr.unwrap_or(DEFAULT_PRESET), today)
    }

    /// The range insights cover by default: the last `insights_days` days
    pub fn insights_default(&self, today: NaiveDate) -> LedgerResult<DateRange> {
        Ok(DateRange::last_days(today, self.settings.insights_days.max(1))?)
    }

    /// Resolve a range expression relative to `today`
    ///
    /// Formats supported:
    /// - Presets: "today", "this-month", "last-month", "this-year", "last-year"
    /// - Rolling: "last-30-days" (the 30 days ending today)
    /// - Month names: "jan", "January" (in today's year)
    /// - Explicit: "2025-01-01..2025-01-15", "2025-01-15", "2025-01", "2025"
    pub fn resolve(&self, expr: &str, today: NaiveDate) -> LedgerResult<DateRange> {
        let normalized = expr.trim().to_lowercase().replace([' ', '_'], "-");

        match normalized.as_str() {
            "today" => return Ok(DateRange::single_day(today)),
            "this-month" | "month" | "current" => return Ok(DateRange::month_containing(today)),
            "last-month" | "previous-month" => {
                let anchor = today
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(|| out_of_range(expr))?;
                return Ok(DateRange::month_containing(anchor));
            }
            "this-year" | "year" => return Ok(DateRange::year_containing(today)),
            "last-year" => return Ok(DateRange::year(today.year() - 1)?),
            _ => {}
        }

        if let Some(days) = normalized
            .strip_prefix("last-")
            .and_then(|rest| rest.strip_suffix("-days"))
        {
            let days: u32 = days
                .parse()
                .map_err(|_| LedgerError::Validation(format!("Invalid day count in '{}'", expr)))?;
            return Ok(DateRange::last_days(today, days)?);
        }

        if let Some(month) = month_number(&normalized) {
            return Ok(DateRange::month(today.year(), month)?);
        }

        DateRange::parse(expr.trim())
            .map_err(|_| LedgerError::Validation(format!("Invalid range: {}", expr)))
    }
}

fn out_of_range(expr: &str) -> LedgerError {
    LedgerError::Validation(format!("Range '{}' is outside the supported calendar", expr))
}

/// Month number for an English month name or three-letter abbreviation
fn month_number(s: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    if s.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| *name == s || (s.len() == 3 && name.starts_with(s)))
        .map(|i| i as u32 + 1)
}
