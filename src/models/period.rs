//! Date ranges and recurring budget periods
//!
//! `DateRange` is inclusive on both ends at day resolution. `BudgetPeriod`
//! describes how a budget recurs and derives its current window.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An inclusive calendar date range, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeFields")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct DateRangeFields {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeFields> for DateRange {
    type Error = PeriodError;

    fn try_from(fields: DateRangeFields) -> Result<Self, Self::Error> {
        DateRange::new(fields.start, fields.end)
    }
}

impl DateRange {
    /// Create a range, rejecting `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The full calendar month `year-month`
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PeriodError::InvalidFormat(format!("{:04}-{:02}", year, month)))?;
        Ok(Self::month_containing(first))
    }

    /// The full calendar year
    pub fn year(year: i32) -> Result<Self, PeriodError> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| PeriodError::InvalidFormat(year.to_string()))?;
        Ok(Self::year_containing(first))
    }

    /// The calendar month containing `date`
    pub fn month_containing(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date),
            end: last_of_month(date),
        }
    }

    /// The calendar year containing `date`
    pub fn year_containing(date: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
        Self { start, end }
    }

    /// The `days` most recent days ending at `today`, inclusive
    pub fn last_days(today: NaiveDate, days: u32) -> Result<Self, PeriodError> {
        if days == 0 {
            return Err(PeriodError::InvalidFormat("last-0-days".into()));
        }
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        Ok(Self { start, end: today })
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day span, `end - start + 1`
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The range of equal length that ends the day before this one starts
    pub fn preceding(&self) -> Self {
        let end = self.start.pred_opt().unwrap_or(NaiveDate::MIN);
        let start = self
            .start
            .checked_sub_signed(Duration::days(self.day_count()))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Parse a range string
    ///
    /// Formats:
    /// - Explicit: "2025-01-01..2025-01-15"
    /// - Single day: "2025-01-15"
    /// - Month: "2025-01"
    /// - Year: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = parse_date(start.trim())?;
            let end = parse_date(end.trim())?;
            return Self::new(start, end);
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [_, _, _] => Ok(Self::single_day(parse_date(s)?)),
            [year, month] => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
                Self::month(year, month)
            }
            [year] if year.len() == 4 => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
                Self::year(year)
            }
            _ => Err(PeriodError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl FromStr for DateRange {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PeriodError::InvalidDate(s.to_string()))
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// How often a budget's limit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Every 7 days, counted from the budget's start date
    Weekly,
    /// Calendar months
    #[default]
    Monthly,
    /// Calendar years
    Yearly,
}

impl BudgetPeriod {
    /// All period kinds
    pub fn all() -> &'static [Self] {
        &[Self::Weekly, Self::Monthly, Self::Yearly]
    }

    /// The window this period applies to on `as_of`, for a budget anchored at
    /// `anchor`. `None` when the budget has not started yet.
    pub fn window(&self, anchor: NaiveDate, as_of: NaiveDate) -> Option<DateRange> {
        if as_of < anchor {
            return None;
        }

        let window = match self {
            Self::Weekly => {
                let elapsed_weeks = (as_of - anchor).num_days() / 7;
                let start = anchor
                    .checked_add_signed(Duration::days(elapsed_weeks * 7))
                    .unwrap_or(NaiveDate::MAX);
                DateRange {
                    start,
                    end: start
                        .checked_add_signed(Duration::days(6))
                        .unwrap_or(NaiveDate::MAX),
                }
            }
            Self::Monthly => DateRange::month_containing(as_of),
            Self::Yearly => DateRange::year_containing(as_of),
        };

        Some(window)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(PeriodError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Error type for range and period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidFormat(String),
    InvalidDate(String),
    InvalidMonth(u32),
    UnknownPeriod(String),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidFormat(s) => write!(f, "Invalid range format: {}", s),
            PeriodError::InvalidDate(s) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", s),
            PeriodError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodError::UnknownPeriod(s) => {
                write!(f, "Unknown budget period '{}' (weekly, monthly, yearly)", s)
            }
            PeriodError::InvertedRange { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 31)).unwrap_err();
        assert!(matches!(err, PeriodError::InvertedRange { .. }));
    }

    #[test]
    fn test_day_count_is_inclusive() {
        let january = DateRange::month(2024, 1).unwrap();
        assert_eq!(january.day_count(), 31);
        assert_eq!(DateRange::single_day(date(2024, 1, 1)).day_count(), 1);

        let leap_feb = DateRange::month(2024, 2).unwrap();
        assert_eq!(leap_feb.end(), date(2024, 2, 29));
    }

    #[test]
    fn test_preceding_has_equal_length() {
        let january = DateRange::month(2024, 1).unwrap();
        let previous = january.preceding();
        assert_eq!(previous.start(), date(2023, 12, 1));
        assert_eq!(previous.end(), date(2023, 12, 31));
        assert_eq!(previous.day_count(), january.day_count());

        let february = DateRange::month(2024, 2).unwrap();
        let previous = february.preceding();
        assert_eq!(previous.start(), date(2024, 1, 3));
        assert_eq!(previous.end(), date(2024, 1, 31));
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 10)).unwrap();
        assert!(range.contains(date(2024, 1, 5)));
        assert!(range.contains(date(2024, 1, 10)));
        assert!(!range.contains(date(2024, 1, 4)));
        assert!(!range.contains(date(2024, 1, 11)));
    }

    #[test]
    fn test_last_days() {
        let range = DateRange::last_days(date(2024, 3, 30), 30).unwrap();
        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.day_count(), 30);
        assert!(DateRange::last_days(date(2024, 3, 30), 0).is_err());
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            DateRange::parse("2024-01-01..2024-01-15").unwrap(),
            DateRange::new(date(2024, 1, 1), date(2024, 1, 15)).unwrap()
        );
        assert_eq!(
            DateRange::parse("2024-02").unwrap(),
            DateRange::month(2024, 2).unwrap()
        );
        assert_eq!(
            DateRange::parse("2024").unwrap().end(),
            date(2024, 12, 31)
        );
        assert_eq!(
            DateRange::parse("2024-06-09").unwrap(),
            DateRange::single_day(date(2024, 6, 9))
        );
        assert_eq!(
            DateRange::parse("2024-13"),
            Err(PeriodError::InvalidMonth(13))
        );
        assert!(matches!(
            DateRange::parse("2024-01-31..2024-01-01"),
            Err(PeriodError::InvertedRange { .. })
        ));
        assert!(DateRange::parse("soon").is_err());
    }

    #[test]
    fn test_deserialize_enforces_order() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-01-31"}"#).unwrap();
        assert_eq!(ok.day_count(), 31);

        let inverted =
            serde_json::from_str::<DateRange>(r#"{"start":"2024-02-01","end":"2024-01-31"}"#);
        assert!(inverted.is_err());
    }

    #[test]
    fn test_monthly_window() {
        let window = BudgetPeriod::Monthly
            .window(date(2023, 6, 17), date(2024, 2, 10))
            .unwrap();
        assert_eq!(window, DateRange::month(2024, 2).unwrap());
    }

    #[test]
    fn test_yearly_window() {
        let window = BudgetPeriod::Yearly
            .window(date(2020, 3, 1), date(2024, 7, 4))
            .unwrap();
        assert_eq!(window.start(), date(2024, 1, 1));
        assert_eq!(window.end(), date(2024, 12, 31));
    }

    #[test]
    fn test_weekly_window_aligns_to_start_weekday() {
        // 2024-01-03 is a Wednesday
        let anchor = date(2024, 1, 3);

        let first = BudgetPeriod::Weekly.window(anchor, anchor).unwrap();
        assert_eq!(first.start(), anchor);
        assert_eq!(first.end(), date(2024, 1, 9));

        // Tuesday 2024-01-16 falls in the window starting Wednesday 2024-01-10
        let later = BudgetPeriod::Weekly.window(anchor, date(2024, 1, 16)).unwrap();
        assert_eq!(later.start(), date(2024, 1, 10));
        assert_eq!(later.end(), date(2024, 1, 16));
        assert_eq!(later.start().weekday(), anchor.weekday());

        let next = BudgetPeriod::Weekly.window(anchor, date(2024, 1, 17)).unwrap();
        assert_eq!(next.start(), date(2024, 1, 17));
    }

    #[test]
    fn test_weekly_window_clamps_at_calendar_end() {
        let anchor = NaiveDate::MAX - Duration::days(3);
        let window = BudgetPeriod::Weekly.window(anchor, NaiveDate::MAX).unwrap();
        assert_eq!(window.start(), anchor);
        assert_eq!(window.end(), NaiveDate::MAX);
        assert!(window.contains(NaiveDate::MAX));
    }

    #[test]
    fn test_window_before_start_is_none() {
        let anchor = date(2024, 5, 1);
        for period in BudgetPeriod::all() {
            assert!(period.window(anchor, date(2024, 4, 30)).is_none());
        }
    }

    #[test]
    fn test_budget_period_parse_and_display() {
        assert_eq!("Weekly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert_eq!("yearly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert!("fortnightly".parse::<BudgetPeriod>().is_err());
        assert_eq!(BudgetPeriod::Monthly.to_string(), "monthly");
    }
}
