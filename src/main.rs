use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use finsight::cli::{
    handle_budget_command, handle_category_command, handle_config_command,
    handle_export_command, handle_goal_command, handle_history_command, handle_report_command,
    handle_transaction_command,
};
use finsight::config::{paths::FinsightPaths, settings::Settings};
use finsight::display::DisplayOptions;
use finsight::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finsight",
    version,
    about = "Personal finance tracking and analytics from the terminal",
    long_about = "finsight records income and expenses, tracks budgets and savings \
                  goals, and turns your transactions into reports: period summaries, \
                  comparisons, spending trends, category breakdowns and a financial \
                  health score."
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the data directory and starter categories
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<finsight::cli::ConfigCommands>,
    },

    /// Show recent changes from the audit log
    History(finsight::cli::HistoryArgs),

    /// Category management commands
    #[command(subcommand)]
    Category(finsight::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finsight::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(finsight::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(finsight::cli::GoalCommands),

    /// Analytics reports
    #[command(subcommand)]
    Report(finsight::cli::ReportCommands),

    /// Export data as CSV, JSON or YAML
    Export(finsight::cli::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    finsight::logging::init(cli.verbose);

    let paths = FinsightPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing finsight at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;

            if created {
                println!("Starter categories have been created:");
                println!("  Income:   Salary, Freelance, Investments, Other Income");
                println!("  Expenses: Housing, Groceries, Transportation, Utilities,");
                println!("            Dining Out, Entertainment, Healthcare, Shopping, Other");
            } else {
                println!("Existing data was left untouched.");
            }
            println!();
            println!("Run 'finsight category list' to see all categories.");
        }
        Some(Commands::Config { cmd }) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        Some(command) => {
            let mut storage = Storage::new(paths)?;
            storage.load_all()?;
            run(&storage, &settings, command)?;
        }
        None => {
            println!("finsight - personal finance tracking and analytics");
            println!();
            println!("Run 'finsight --help' for usage information.");
            if !paths.is_initialized() {
                println!("Run 'finsight init' to get started.");
            }
        }
    }

    Ok(())
}

fn run(storage: &Storage, settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::History(args) => handle_history_command(storage, args)?,
        Commands::Category(cmd) => {
            handle_category_command(storage, &DisplayOptions::from(settings), cmd)?
        }
        Commands::Transaction(cmd) => handle_transaction_command(storage, settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(storage, settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(storage, settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(storage, settings, cmd)?,
        Commands::Export(args) => handle_export_command(storage, args)?,
        Commands::Init | Commands::Config { .. } => {}
    }
    Ok(())
}
