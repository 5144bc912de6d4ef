//! Configuration command

use clap::Args;

use crate::config::{DebtConfig, Settings};
use crate::error::CashplanResult;
use crate::storage::Storage;

/// Arguments for `cashplan config`
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the current settings and debt configuration to disk
    #[arg(long)]
    pub init: bool,
}

/// Handle the config command
pub fn handle_config_command(
    storage: &Storage,
    settings: &Settings,
    args: ConfigArgs,
) -> CashplanResult<()> {
    let paths = storage.paths();
    let debt = DebtConfig::load_or_create(paths)?;

    if args.init {
        paths.ensure_directories()?;
        settings.save(paths)?;
        debt.save(paths)?;
        println!("Initialized cashplan at: {}", paths.base_dir().display());
        println!();
    }

    println!("cashplan Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!(
        "Initialized:      {}",
        if paths.is_initialized() { "yes" } else { "no (run 'cashplan config --init')" }
    );
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Debt config:      {}", paths.debt_config_file().display());
    println!("Snapshot:         {}", paths.snapshot_file().display());
    println!("Budgets:          {}", paths.budgets_dir().display());
    println!("Output:           {}", paths.output_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:     {}", settings.currency_symbol);
    println!("  Default frequency:   {}", settings.default_frequency);
    println!("  Transfer categories: {}", settings.transfer_categories.join(", "));
    println!();
    println!("Debt:");
    println!("  Credit card APR:     {:.2}%", debt.credit_card_rate * 100.0);
    println!("  Loan APR:            {:.2}%", debt.loan_rate * 100.0);
    println!("  Loan category:       {}", debt.loan_category);
    println!(
        "  Allocations:         {}",
        debt.fractions()?
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Horizon:             {} months", debt.horizon_months);

    Ok(())
}
