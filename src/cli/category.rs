//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::LedgerResult;
use crate::models::TransactionType;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or expense categories
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
    },

    /// Create a custom category
    Create {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        category_type: String,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// Colour as #RRGGBB
        #[arg(long)]
        color: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { category_type } => {
            let category_type = category_type
                .as_deref()
                .map(str::parse::<TransactionType>)
                .transpose()?;
            let categories = service.list(category_type)?;
            print!("{}", format_category_list(&categories));
        }
        CategoryCommands::Create {
            name,
            category_type,
            icon,
            color,
        } => {
            let category_type: TransactionType = category_type.parse()?;
            let category =
                service.create(&name, category_type, icon.as_deref(), color.as_deref())?;
            println!("Created {} category: {} ({})", category.category_type, category.name, category.id);
        }
    }

    Ok(())
}
