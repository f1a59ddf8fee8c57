//! CLI commands for reports
//!
//! Every report takes an optional `--as-of` date so results are reproducible;
//! without it the local date is used.

use clap::Subcommand;

use super::{emit, OutputFormat};
use crate::config::settings::Settings;
use crate::display::{
    format_breakdown, format_budget_performance, format_insights, format_summary, format_trend,
};
use crate::error::LedgerResult;
use crate::models::period::parse_date;
use crate::models::TransactionType;
use crate::services::{AnalyticsService, PeriodService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and balance for a period, compared to the one before
    Summary {
        /// Period (e.g., "this-month", "last-30-days", "2025-01", "2025-01-01..2025-03-31")
        #[arg(short, long)]
        range: Option<String>,
        /// Date "today" refers to (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Income and expenses per month
    Trend {
        /// Number of months, ending with the current one
        #[arg(short, long)]
        months: Option<u32>,
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Budgets evaluated against actual spending
    Budgets {
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Top categories, spending trend, savings and budget alerts
    Insights {
        /// Period (defaults to the last 30 days)
        #[arg(short, long)]
        range: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
        /// Number of top categories
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Totals per category
    Breakdown {
        #[arg(short, long)]
        range: Option<String>,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        txn_type: String,
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let analytics = AnalyticsService::new(storage, settings);
    let periods = PeriodService::new(settings);
    let user_id = settings.user_id;
    let symbol = settings.currency_symbol.as_str();

    let as_of = |value: Option<String>| -> LedgerResult<_> {
        Ok(match value {
            Some(s) => parse_date(&s)?,
            None => PeriodService::today(),
        })
    };

    match cmd {
        ReportCommands::Summary {
            range,
            as_of: date,
            format,
        } => {
            let today = as_of(date)?;
            let range = periods.resolve_or_default(range.as_deref(), today)?;
            let summary = analytics.summary(user_id, range)?;
            emit(&summary, format, |s| format_summary(s, symbol))?;
        }

        ReportCommands::Trend {
            months,
            as_of: date,
            format,
        } => {
            let trend = analytics.trend(user_id, months, as_of(date)?)?;
            match format {
                OutputFormat::Table => emit(&trend, format, |t| format_trend(t, symbol))?,
                _ => emit(&trend.series(), format, |_| String::new())?,
            }
        }

        ReportCommands::Budgets { as_of: date, format } => {
            let rows = analytics.budget_performance(user_id, as_of(date)?)?;
            emit(&rows, format, |rows| format_budget_performance(rows, symbol))?;
        }

        ReportCommands::Insights {
            range,
            as_of: date,
            limit,
            format,
        } => {
            let today = as_of(date)?;
            let range = match range {
                Some(expr) => periods.resolve(&expr, today)?,
                None => periods.insights_default(today)?,
            };
            let insights = analytics.insights(user_id, range, today, limit)?;
            emit(&insights, format, |i| format_insights(i, symbol))?;
        }

        ReportCommands::Breakdown {
            range,
            txn_type,
            as_of: date,
            format,
        } => {
            let txn_type: TransactionType = txn_type.parse()?;
            let range = periods.resolve_or_default(range.as_deref(), as_of(date)?)?;
            let shares = analytics.breakdown(user_id, range, txn_type)?;
            let heading = format!("{} by category, {}", txn_type, range);
            emit(&shares, format, |s| format_breakdown(s, &heading, symbol))?;
        }
    }

    Ok(())
}
