use anyhow::Result;
use clap::{Parser, Subcommand};

use cashplan::cli::{
    handle_budget_command, handle_cards_command, handle_cash_flow_command,
    handle_config_command, handle_export_command, handle_forecast_command,
    handle_payoff_command,
};
use cashplan::config::{CashplanPaths, Settings};
use cashplan::storage::Storage;

#[derive(Parser)]
#[command(
    name = "cashplan",
    author = "Kaylee Beyene",
    version,
    about = "Cash-vs-credit budgeting analysis and debt payoff projection",
    long_about = "cashplan reads a snapshot of your accounts and transactions, \
                  separates what you paid in cash from what went on credit, \
                  forecasts the month against your budget and projects how \
                  fast the surplus could clear your card or loan debt."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cash vs credit-card flow per period
    #[command(alias = "cf")]
    CashFlow(cashplan::cli::CashFlowArgs),

    /// Credit-card balances and paydown progress
    Cards(cashplan::cli::CardsArgs),

    /// End-of-month cash forecast from the budget
    Forecast(cashplan::cli::ForecastArgs),

    /// Debt payoff projections
    Payoff(cashplan::cli::PayoffArgs),

    /// Per-month budget management
    #[command(subcommand)]
    Budget(cashplan::cli::BudgetCommands),

    /// Export a full analysis as JSON, YAML or CSV
    Export(cashplan::cli::ExportArgs),

    /// Show current configuration and paths
    Config(cashplan::cli::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cashplan::logging::init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = CashplanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths);

    match cli.command {
        Some(Commands::CashFlow(args)) => handle_cash_flow_command(&storage, &settings, args)?,
        Some(Commands::Cards(args)) => handle_cards_command(&storage, &settings, args)?,
        Some(Commands::Forecast(args)) => handle_forecast_command(&storage, &settings, args)?,
        Some(Commands::Payoff(args)) => handle_payoff_command(&storage, &settings, args)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, &settings, args)?,
        Some(Commands::Config(args)) => handle_config_command(&storage, &settings, args)?,
        None => {
            println!("cashplan - cash-vs-credit budgeting analysis");
            println!();
            println!("Run 'cashplan --help' for usage information.");
        }
    }

    Ok(())
}
