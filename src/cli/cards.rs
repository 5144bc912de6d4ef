//! Credit-card report command

use clap::Args;

use crate::config::Settings;
use crate::error::CashplanResult;
use crate::models::ClassifiedTransaction;
use crate::reports::CreditCardReport;
use crate::storage::Storage;

use super::{parse_date, AnalysisInput, SnapshotArgs};

/// Arguments for `cashplan cards`
#[derive(Args, Debug)]
pub struct CardsArgs {
    /// Only count payments and purchases on or after this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Only count payments and purchases on or before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Handle the cards command
pub fn handle_cards_command(
    storage: &Storage,
    settings: &Settings,
    args: CardsArgs,
) -> CashplanResult<()> {
    let input = AnalysisInput::load(storage, settings, &args.source)?;
    let start = args.start.as_deref().map(parse_date).transpose()?;
    let end = args.end.as_deref().map(parse_date).transpose()?;

    let classified: Vec<ClassifiedTransaction<'_>> = input
        .classify()?
        .into_iter()
        .filter(|t| start.map_or(true, |s| t.transaction.date >= s))
        .filter(|t| end.map_or(true, |e| t.transaction.date <= e))
        .collect();

    let report = CreditCardReport::generate(&input.snapshot.accounts, &classified);
    println!("{}", report.format_terminal());

    Ok(())
}
