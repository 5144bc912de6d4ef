//! CLI command for exporting a full analysis
//!
//! Runs every analysis for one month and writes the bundle as JSON or YAML,
//! or the tagged transactions alone as CSV.

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use crate::config::{DebtKind, Settings};
use crate::error::CashplanResult;
use crate::export::{export_json, export_transactions_csv, export_yaml, AnalysisExport};
use crate::reports::{CashFlowReport, CreditCardReport};
use crate::storage::Storage;

use super::payoff::{build_payoff, PayoffOutcome};
use super::{create_output, AnalysisInput, SnapshotArgs};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON (full analysis)
    Json,
    /// YAML (full analysis, human-readable)
    Yaml,
    /// CSV (tagged transactions only)
    Csv,
}

/// Arguments for `cashplan export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Month to analyse (YYYY-MM); defaults to the snapshot's month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Output file path; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> CashplanResult<()> {
    let input = AnalysisInput::load(storage, settings, &args.source)?;
    let classified = input.classify()?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(create_output(path)?),
        None => Box::new(std::io::stdout().lock()),
    };

    if args.format == ExportFormat::Csv {
        export_transactions_csv(&classified, &mut writer)?;
    } else {
        let period = input.month(args.month.as_deref())?;
        let cash_flow = CashFlowReport::generate(
            &classified,
            period.start_date(),
            period.end_date(),
            settings.default_frequency,
        )?;
        let credit_cards = CreditCardReport::generate(&input.snapshot.accounts, &classified);
        let forecast = input.forecast(storage, &period, None)?;
        let payoff = match build_payoff(&input, &forecast, DebtKind::CreditCard, None)? {
            PayoffOutcome::Projected(report) => Some(report),
            PayoffOutcome::NoDebt(_) | PayoffOutcome::NoSurplus(_) => None,
        };

        let export = AnalysisExport::new(
            period,
            input.snapshot.accounts.len(),
            &classified,
            cash_flow,
            credit_cards,
            forecast,
            payoff,
        );

        if args.format == ExportFormat::Yaml {
            export_yaml(&export, &mut writer)?;
        } else {
            export_json(&export, &mut writer, !args.compact)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    if let Some(path) = args.output {
        eprintln!("Analysis exported to: {}", path.display());
    }

    Ok(())
}
