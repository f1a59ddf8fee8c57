//! CLI commands for data export

use std::io::Write;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::transaction::resolve_category_filter;
use super::{open_output, FilterArgs};
use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::export::{export_ledger_json, export_ledger_yaml};
use crate::reports::TransactionQuery;
use crate::services::AnalyticsService;
use crate::storage::Storage;

/// Full-ledger export formats
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LedgerFormat {
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export matching transactions as CSV
    Transactions {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every transaction, category and budget
    Ledger {
        #[arg(short, long, value_enum, default_value = "json")]
        format: LedgerFormat,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Transactions { filters, output } => {
            let category_id = resolve_category_filter(storage, filters.category.as_deref())?;
            let criteria = TransactionQuery::try_from(filters.into_params(category_id))?;

            let mut writer = open_output(output.as_deref())?;
            let count = AnalyticsService::new(storage, settings).export_csv(
                settings.user_id,
                &criteria,
                &mut writer,
            )?;

            if let Some(path) = output {
                println!("Exported {} transactions to {}", count, path.display());
            }
        }

        ExportCommands::Ledger {
            format,
            output,
            pretty,
        } => {
            let snapshot = storage.snapshot(settings.user_id)?;
            let count = snapshot.transactions.len();

            let mut writer = open_output(output.as_deref())?;
            match format {
                LedgerFormat::Json => {
                    export_ledger_json(snapshot, &mut writer, pretty)?;
                    writeln!(writer)?;
                }
                LedgerFormat::Yaml => export_ledger_yaml(snapshot, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                println!("Exported ledger ({} transactions) to {}", count, path.display());
            }
        }
    }

    Ok(())
}
