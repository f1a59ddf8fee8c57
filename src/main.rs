use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use ledger_lens::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_report_command,
    handle_transaction_command, BudgetCommands, CategoryCommands, ExportCommands, ReportCommands,
    TransactionCommands,
};
use ledger_lens::config::{paths::LedgerPaths, settings::Settings};
use ledger_lens::logging;
use ledger_lens::services::PeriodService;
use ledger_lens::storage::{add_sample_data, initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal-finance ledger analytics",
    long_about = "ledger-lens records income and expenses and turns them into \
                  summaries, monthly trends, budget performance and spending \
                  insights from the command line."
)]
struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init {
        /// Also record ten sample transactions over the last ten days
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports and analytics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level, cli.verbose);

    let Some(command) = cli.command else {
        println!("ledger-lens - personal-finance ledger analytics");
        println!();
        println!("Run 'ledger --help' for usage information.");
        println!("Run 'ledger init --sample' to start with example data.");
        return Ok(());
    };

    match command {
        Commands::Init { sample } => return run_init(paths, settings, sample),
        Commands::Config => {
            print_config(&paths, &settings);
            return Ok(());
        }
        _ => {}
    }

    if !paths.is_initialized() {
        bail!("No ledger at {}. Run 'ledger init' first.", paths.base_dir().display());
    }

    let storage = Storage::open(paths)?;

    match command {
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, cmd)?,
        Commands::Init { .. } | Commands::Config => {}
    }

    Ok(())
}

fn run_init(paths: LedgerPaths, settings: Settings, sample: bool) -> Result<()> {
    println!("Initializing ledger-lens at: {}", paths.base_dir().display());

    let already = paths.is_initialized();
    settings.save(&paths)?;
    let storage = Storage::open(paths)?;
    let seeded = initialize_storage(&storage)?;

    if already {
        println!("Ledger already initialized; settings kept.");
    }
    if seeded > 0 {
        println!("Created {} default categories.", seeded);
    }

    if sample {
        let existing = storage.transactions.get_by_user(settings.user_id)?;
        if existing.is_empty() {
            let added = add_sample_data(&storage, settings.user_id, PeriodService::today())?;
            println!("Recorded {} sample transactions.", added.len());
        } else {
            println!(
                "Skipped sample data: ledger already has {} transactions.",
                existing.len()
            );
        }
    }

    println!("Initialization complete!");
    println!();
    println!("Run 'ledger report summary' to see this month's totals.");
    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("ledger-lens Configuration");
    println!("=========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Initialized:    {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  User:            {}", settings.user_id);
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Trend months:    {}", settings.trend_months);
    println!("  Top categories:  {}", settings.top_categories);
    println!("  Insights days:   {}", settings.insights_days);
    println!("  Page size:       {} (max {})", settings.page_size, settings.max_page_size);
    println!("  Log level:       {}", settings.log_level);
}
