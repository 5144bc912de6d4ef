//! JSON export of a complete analysis
//!
//! Bundles the tagged transactions with the cash-flow, credit-card, forecast
//! and payoff results. Money fields are integer cents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{CashplanError, CashplanResult};
use crate::models::{
    AccountId, BudgetPeriod, ClassificationTag, ClassifiedTransaction, Money, TransactionId,
};
use crate::reports::{CashFlowReport, CreditCardReport, ForecastReport, PayoffReport};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A transaction with its derived tag
#[derive(Debug, Clone, Serialize)]
pub struct TaggedTransaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub account_name: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    pub tag: ClassificationTag,
}

impl From<&ClassifiedTransaction<'_>> for TaggedTransaction {
    fn from(item: &ClassifiedTransaction<'_>) -> Self {
        Self {
            id: item.transaction.id.clone(),
            account_id: item.account.id.clone(),
            account_name: item.account.name.clone(),
            date: item.transaction.date,
            amount: item.transaction.amount,
            category: item.transaction.category.clone(),
            tag: item.tag,
        }
    }
}

/// Counts and date range of the exported data
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub transaction_count: usize,
    pub earliest_transaction: Option<NaiveDate>,
    pub latest_transaction: Option<NaiveDate>,
    pub amount_unit: &'static str,
}

/// Everything one run of the analysis produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub month: BudgetPeriod,
    pub metadata: ExportMetadata,
    pub transactions: Vec<TaggedTransaction>,
    pub cash_flow: CashFlowReport,
    pub credit_cards: CreditCardReport,
    pub forecast: ForecastReport,
    /// Absent when there is no debt or no surplus to project with
    pub payoff: Option<PayoffReport>,
}

impl AnalysisExport {
    pub fn new(
        month: BudgetPeriod,
        account_count: usize,
        transactions: &[ClassifiedTransaction<'_>],
        cash_flow: CashFlowReport,
        credit_cards: CreditCardReport,
        forecast: ForecastReport,
        payoff: Option<PayoffReport>,
    ) -> Self {
        let dates = || transactions.iter().map(|t| t.transaction.date);

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month,
            metadata: ExportMetadata {
                account_count,
                transaction_count: transactions.len(),
                earliest_transaction: dates().min(),
                latest_transaction: dates().max(),
                amount_unit: "cents",
            },
            transactions: transactions.iter().map(TaggedTransaction::from).collect(),
            cash_flow,
            credit_cards,
            forecast,
            payoff,
        }
    }
}

/// Write the export as JSON
pub fn export_json<W: Write>(export: &AnalysisExport, writer: &mut W, pretty: bool) -> CashplanResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| CashplanError::Export(e.to_string()))?;

    Ok(())
}
