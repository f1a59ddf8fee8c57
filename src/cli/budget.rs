//! Budget CLI commands
//!
//! Setting, listing and removing per-category spending limits. Evaluation
//! against actual spending lives under `report budgets`.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::LedgerResult;
use crate::models::period::parse_date;
use crate::models::{BudgetPeriod, CategoryIndex, Money};
use crate::services::{BudgetService, CategoryService, PeriodService, SetBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create or replace the budget for a category and period
    Set {
        /// Expense category name or ID
        category: String,
        /// Limit per period (e.g., "500" or "500.00")
        amount: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// Anchor date (YYYY-MM-DD); weekly windows start here
        #[arg(short, long)]
        start: Option<String>,
    },

    /// List configured budgets
    List,

    /// Remove a budget
    Remove {
        /// Budget ID (full or short "bud-" form)
        id: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let user_id = settings.user_id;

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
            start,
        } => {
            let category = CategoryService::new(storage).find(&category)?;
            let period: BudgetPeriod = period.parse()?;
            let start_date = match start {
                Some(s) => parse_date(&s)?,
                None => PeriodService::today(),
            };

            let budget = service.set(SetBudgetInput {
                user_id,
                category_id: category.id,
                amount: Money::parse(&amount)?,
                period,
                start_date,
            })?;

            println!(
                "Budget {} for {}: {} {}",
                budget.id,
                category.name,
                budget.amount.format_with_symbol(&settings.currency_symbol),
                budget.period
            );
        }

        BudgetCommands::List => {
            let budgets = service.list(user_id)?;
            let categories = storage.categories.get_all()?;
            print!(
                "{}",
                format_budget_list(&budgets, &CategoryIndex::new(&categories), &settings.currency_symbol)
            );
        }

        BudgetCommands::Remove { id } => {
            let budget = service.find(user_id, &id)?;
            service.remove(user_id, budget.id)?;
            println!("Removed budget {}", budget.id);
        }
    }

    Ok(())
}
