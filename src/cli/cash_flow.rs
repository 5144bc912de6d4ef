//! Cash-flow report command

use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Settings;
use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetPeriod, Frequency};
use crate::reports::CashFlowReport;
use crate::storage::Storage;

use super::{create_output, parse_date, AnalysisInput, SnapshotArgs};

/// Arguments for `cashplan cash-flow`
#[derive(Args, Debug)]
pub struct CashFlowArgs {
    /// Start date (YYYY-MM-DD); defaults to the earliest transaction
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to the snapshot date
    #[arg(short, long)]
    pub end: Option<String>,

    /// Bucket size: weekly, biweekly or monthly
    #[arg(short, long)]
    pub frequency: Option<String>,

    /// Export the periods to CSV instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Handle the cash-flow command
pub fn handle_cash_flow_command(
    storage: &Storage,
    settings: &Settings,
    args: CashFlowArgs,
) -> CashplanResult<()> {
    let input = AnalysisInput::load(storage, settings, &args.source)?;

    let frequency = match args.frequency.as_deref() {
        Some(s) => Frequency::parse(s).map_err(|e| CashplanError::Validation(e.to_string()))?,
        None => settings.default_frequency,
    };

    let today = input.snapshot.today();
    let start = match args.start.as_deref() {
        Some(s) => parse_date(s)?,
        None => input
            .snapshot
            .date_range()
            .map(|(first, _)| first)
            .unwrap_or_else(|| BudgetPeriod::month_of(today).start_date()),
    };
    let end = match args.end.as_deref() {
        Some(s) => parse_date(s)?,
        None => today,
    };
    debug!(%start, %end, %frequency, "cash-flow range");

    let classified = input.classify()?;
    let report = CashFlowReport::generate(&classified, start, end, frequency)?;

    if let Some(path) = args.output {
        report.export_csv(create_output(&path)?)?;
        println!("Cash-flow report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
