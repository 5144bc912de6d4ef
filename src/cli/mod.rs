//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod cards;
pub mod cash_flow;
pub mod config;
pub mod export;
pub mod forecast;
pub mod payoff;

pub use budget::{handle_budget_command, BudgetCommands};
pub use cards::{handle_cards_command, CardsArgs};
pub use cash_flow::{handle_cash_flow_command, CashFlowArgs};
pub use config::{handle_config_command, ConfigArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use forecast::{handle_forecast_command, ForecastArgs};
pub use payoff::{handle_payoff_command, PayoffArgs};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::{DebtConfig, Settings};
use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetPeriod, ClassifiedTransaction, Money};
use crate::reports::ForecastReport;
use crate::services::classifier::tag_counts;
use crate::services::{classify_all, split_orphans, AccountIndex, BudgetService};
use crate::storage::{Snapshot, Storage};

/// Where to read account and transaction data from
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Snapshot file written by the fetch step (defaults to the data directory)
    #[arg(long, env = "CASHPLAN_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Drop transactions whose account is missing instead of failing
    #[arg(long)]
    pub drop_orphans: bool,
}

/// Everything an analysis command reads before it starts
pub struct AnalysisInput {
    pub snapshot: Snapshot,
    pub settings: Settings,
    pub debt: DebtConfig,
}

impl AnalysisInput {
    /// Load the snapshot and debt configuration, dropping orphans if asked
    pub fn load(storage: &Storage, settings: &Settings, args: &SnapshotArgs) -> CashplanResult<Self> {
        let mut snapshot = storage.load_snapshot(args.snapshot.as_deref())?;

        if args.drop_orphans {
            let transactions = std::mem::take(&mut snapshot.transactions);
            let (kept, _) = split_orphans(transactions, &AccountIndex::new(&snapshot.accounts));
            snapshot.transactions = kept;
        }

        Ok(Self {
            snapshot,
            settings: settings.clone(),
            debt: DebtConfig::load_or_create(storage.paths())?,
        })
    }

    /// Tag every transaction in the snapshot
    pub fn classify(&self) -> CashplanResult<Vec<ClassifiedTransaction<'_>>> {
        let index = AccountIndex::new(&self.snapshot.accounts);
        let classified = classify_all(
            &self.snapshot.transactions,
            &index,
            &self.settings.transfer_categories,
        )?;
        for (tag, count) in tag_counts(&classified) {
            debug!(%tag, count, "tagged");
        }
        Ok(classified)
    }

    /// The month named on the command line, or the snapshot's current month
    pub fn month(&self, month: Option<&str>) -> CashplanResult<BudgetPeriod> {
        match month {
            Some(s) => parse_month(s),
            None => Ok(BudgetPeriod::month_of(self.snapshot.today())),
        }
    }

    /// Forecast a month from its effective budget lines
    pub fn forecast(
        &self,
        storage: &Storage,
        period: &BudgetPeriod,
        starting_cash: Option<Money>,
    ) -> CashplanResult<ForecastReport> {
        let (items, source) =
            BudgetService::new(storage).effective_budget(period, &self.snapshot.budget)?;
        ForecastReport::generate(
            period.clone(),
            source,
            starting_cash.unwrap_or(self.snapshot.starting_cash),
            items,
        )
    }
}

pub(crate) fn parse_month(s: &str) -> CashplanResult<BudgetPeriod> {
    match BudgetPeriod::parse(s) {
        Ok(period @ BudgetPeriod::Monthly { .. }) => Ok(period),
        _ => Err(CashplanError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2025-01)",
            s
        ))),
    }
}

pub(crate) fn parse_date(s: &str) -> CashplanResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        CashplanError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", s))
    })
}

pub(crate) fn parse_money(s: &str) -> CashplanResult<Money> {
    Money::parse(s).map_err(|e| CashplanError::Validation(e.to_string()))
}

/// Open `path` for writing, creating parent directories
pub(crate) fn create_output(path: &Path) -> CashplanResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|e| {
        CashplanError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
