//! Transaction CLI commands

use clap::Subcommand;

use super::{emit, FilterArgs, OutputFormat};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_page};
use crate::error::LedgerResult;
use crate::models::period::parse_date;
use crate::models::{CategoryIndex, Money, TransactionType};
use crate::reports::TransactionQuery;
use crate::services::{
    AnalyticsService, CategoryService, CreateTransactionInput, PeriodService, TransactionPatch,
    TransactionService,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// income or expense
        txn_type: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Search and list transactions
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page size
        #[arg(short, long)]
        limit: Option<usize>,
        /// Rows to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short "txn-" form)
        id: String,
        /// New type: income or expense
        #[arg(short = 't', long = "type")]
        txn_type: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID ("none" clears it)
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short "txn-" form)
        id: String,
    },
}

/// Resolve a category argument to the ID string a query expects
pub(crate) fn resolve_category_filter(
    storage: &Storage,
    category: Option<&str>,
) -> LedgerResult<Option<String>> {
    category
        .map(|c| {
            CategoryService::new(storage)
                .find(c)
                .map(|found| found.id.as_uuid().to_string())
        })
        .transpose()
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let user_id = settings.user_id;
    let today = PeriodService::today();

    match cmd {
        TransactionCommands::Add {
            txn_type,
            amount,
            category,
            date,
            description,
        } => {
            let txn_type: TransactionType = txn_type.parse()?;
            let amount = Money::parse(&amount)?;
            let date = date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let category = category
                .as_deref()
                .map(|c| CategoryService::new(storage).find(c))
                .transpose()?;

            let txn = service.add(
                CreateTransactionInput {
                    user_id,
                    txn_type,
                    amount,
                    date,
                    category_id: category.as_ref().map(|c| c.id),
                    description,
                },
                today,
            )?;

            let category_name = CategoryIndex::new(category.as_slice()).name_for(txn.category_id);
            println!("Recorded transaction");
            print!(
                "{}",
                format_transaction_details(&txn, category_name, &settings.currency_symbol)
            );
        }

        TransactionCommands::List {
            filters,
            limit,
            offset,
            format,
        } => {
            let category_id = resolve_category_filter(storage, filters.category.as_deref())?;
            let criteria = TransactionQuery::try_from(filters.into_params(category_id))?;
            let page = AnalyticsService::new(storage, settings).search(user_id, &criteria, limit, offset)?;

            let categories = storage.categories.get_all()?;
            let index = CategoryIndex::new(&categories);
            emit(&page, format, |page| {
                format_transaction_page(page, &index, &settings.currency_symbol, &settings.date_format)
            })?;
        }

        TransactionCommands::Edit {
            id,
            txn_type,
            amount,
            category,
            date,
            description,
        } => {
            let txn = service.find(user_id, &id)?;
            let category_id = match category.as_deref().map(str::trim) {
                None => None,
                Some(c) if c.eq_ignore_ascii_case("none") => Some(None),
                Some(c) => Some(Some(CategoryService::new(storage).find(c)?.id)),
            };

            let patch = TransactionPatch {
                txn_type: txn_type
                    .as_deref()
                    .map(str::parse::<TransactionType>)
                    .transpose()?,
                amount: amount.as_deref().map(Money::parse).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category_id,
                description,
            };
            let updated = service.update(user_id, txn.id, patch, today)?;

            let categories = storage.categories.get_all()?;
            let category_name = CategoryIndex::new(&categories).name_for(updated.category_id);
            println!("Updated transaction");
            print!(
                "{}",
                format_transaction_details(&updated, category_name, &settings.currency_symbol)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service.find(user_id, &id)?;
            service.delete(user_id, txn.id)?;
            println!("Deleted transaction {}: {}", txn.id, txn);
        }
    }

    Ok(())
}
