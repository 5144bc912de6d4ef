//! Snapshot of fetched data
//!
//! The fetch step writes one JSON document holding the accounts, the
//! transactions, the budget line items with their actual amounts and the
//! starting cash figure. Amounts are decimal dollars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{CashplanError, CashplanResult};
use crate::models::money::{self, Money};
use crate::models::{Account, BudgetLineItem, Transaction};

use super::file_io::read_json_required;

/// Accounts, transactions and budget figures for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    /// Date the data was fetched; stands in for "today" when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Budget line items as reported by the data source, actuals included
    #[serde(default)]
    pub budget: Vec<BudgetLineItem>,

    /// Cash on hand at the start of the budget month
    #[serde(default, with = "money::decimal")]
    pub starting_cash: Money,
}

impl Snapshot {
    /// Load and validate a snapshot file
    pub fn load(path: impl AsRef<Path>) -> CashplanResult<Self> {
        let snapshot: Snapshot = read_json_required(path.as_ref())?;
        snapshot.validate()?;
        debug!(
            accounts = snapshot.accounts.len(),
            transactions = snapshot.transactions.len(),
            budget_lines = snapshot.budget.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Check account records and budget lines
    pub fn validate(&self) -> CashplanResult<()> {
        for account in &self.accounts {
            account.validate().map_err(|e| {
                CashplanError::Validation(format!("Account '{}': {}", account.id, e))
            })?;
        }
        for item in &self.budget {
            item.validate()
                .map_err(|e| CashplanError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    /// Transactions dated within `[start, end]`
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.within(start, end))
            .cloned()
            .collect()
    }

    /// Earliest and latest transaction dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.transactions.iter().map(|t| t.date).min()?;
        let last = self.transactions.iter().map(|t| t.date).max()?;
        Some((first, last))
    }

    /// The snapshot's reference date, or today's local date
    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAMPLE: &str = r#"{
        "as_of": "2025-02-10",
        "starting_cash": 500.0,
        "accounts": [
            {"id": "chk", "name": "Checking", "type": "depository", "balance": 1520.10},
            {"id": "visa", "name": "Visa", "type": "credit", "balance": -830.00}
        ],
        "transactions": [
            {"id": "t1", "account_id": "chk", "date": "2025-01-03", "amount": 2000.0, "category": "Paycheck"},
            {"id": "t2", "account_id": "visa", "date": "2025-01-09", "amount": -45.5, "category": "Dining"},
            {"id": "t3", "account_id": "chk", "date": "2025-02-01", "amount": -1200.0, "category": "Rent"}
        ],
        "budget": [
            {"name": "Paycheck", "group": "income", "planned": 2000.0, "actual": 2000.0},
            {"name": "Rent", "group": "expense", "planned": 1200.0}
        ]
    }"#;

    fn write_sample(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_sample() {
        let dir = TempDir::new().unwrap();
        let snapshot = Snapshot::load(write_sample(&dir, SAMPLE)).unwrap();

        assert_eq!(snapshot.accounts.len(), 2);
        assert_eq!(snapshot.accounts[1].account_type, AccountType::CreditCard);
        assert_eq!(snapshot.starting_cash, Money::from_dollars(500));
        assert_eq!(snapshot.budget[1].actual, None);
        assert_eq!(snapshot.today(), date(2025, 2, 10));
    }

    #[test]
    fn test_filter_and_date_range() {
        let dir = TempDir::new().unwrap();
        let snapshot = Snapshot::load(write_sample(&dir, SAMPLE)).unwrap();

        let january = snapshot.filter_range(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(january.len(), 2);
        assert_eq!(
            snapshot.date_range(),
            Some((date(2025, 1, 3), date(2025, 2, 1)))
        );
        assert_eq!(Snapshot::default().date_range(), None);
    }

    #[test]
    fn test_negative_expense_line_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(
            &dir,
            r#"{"budget": [{"name": "Rent", "group": "expense", "planned": -5.0}]}"#,
        );
        assert!(Snapshot::load(path).unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(Snapshot::load(dir.path().join("absent.json")).is_err());
    }
}
