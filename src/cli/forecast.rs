//! Budget forecast command

use clap::Args;

use crate::config::Settings;
use crate::error::CashplanResult;
use crate::storage::Storage;

use super::{parse_money, AnalysisInput, SnapshotArgs};

/// Arguments for `cashplan forecast`
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Month to forecast (YYYY-MM); defaults to the snapshot's month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Override the snapshot's starting cash (e.g. "1250.00")
    #[arg(long, allow_hyphen_values = true)]
    pub starting_cash: Option<String>,

    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Handle the forecast command
pub fn handle_forecast_command(
    storage: &Storage,
    settings: &Settings,
    args: ForecastArgs,
) -> CashplanResult<()> {
    let input = AnalysisInput::load(storage, settings, &args.source)?;
    let period = input.month(args.month.as_deref())?;
    let starting_cash = args.starting_cash.as_deref().map(parse_money).transpose()?;

    let report = input.forecast(storage, &period, starting_cash)?;
    println!("{}", report.format_terminal());

    Ok(())
}
