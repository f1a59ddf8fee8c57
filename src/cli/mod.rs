//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::error::LedgerResult;
use crate::export::{write_json, write_yaml};
use crate::reports::QueryParams;

/// How a report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Print `value` as JSON/YAML, or the table text produced by `table`
pub(crate) fn emit<T, F>(value: &T, format: OutputFormat, table: F) -> LedgerResult<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write!(out, "{}", table(value))?,
        OutputFormat::Json => {
            write_json(&mut out, value, true)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => write_yaml(&mut out, value)?,
    }
    Ok(())
}

/// A file writer, or stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> LedgerResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

/// Transaction filters shared by `txn list` and `export transactions`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Transaction type: all, income or expense
    #[arg(short = 't', long = "type")]
    pub txn_type: Option<String>,

    /// Category name or ID
    #[arg(short, long)]
    pub category: Option<String>,

    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Case-insensitive text matched against descriptions
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// date_desc, date_asc, amount_desc or amount_asc
    #[arg(short, long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Raw parameters with the category already resolved to an ID
    pub(crate) fn into_params(self, category_id: Option<String>) -> QueryParams {
        QueryParams {
            txn_type: self.txn_type,
            category_id,
            start_date: self.from,
            end_date: self.to,
            sort_by: self.sort,
            q: self.search,
        }
    }
}
