//! Classification tags
//!
//! A tag is derived from the owning account's type and the sign of the amount.
//! It is never stored on the transaction itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::money::Money;
use super::transaction::Transaction;

/// What a transaction means for cash-vs-credit budgeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTag {
    /// New charge on a credit card or loan
    Purchase,
    /// Money paid toward a credit card or loan balance
    Payment,
    /// Funds moved between accounts
    Transfer,
    /// Inflow to a cash account
    Income,
    /// Outflow from a cash account
    CashExpense,
    /// Account type without a rule; kept for audit, excluded from totals
    Other,
}

impl ClassificationTag {
    /// Tags that feed the headline expense total
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Purchase | Self::CashExpense)
    }

    /// Tags that appear in headline totals at all
    pub fn counts_toward_totals(&self) -> bool {
        !matches!(self, Self::Transfer | Self::Other)
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Purchase => "Purchase",
            Self::Payment => "Payment",
            Self::Transfer => "Transfer",
            Self::Income => "Income",
            Self::CashExpense => "Cash Expense",
            Self::Other => "Other",
        };
        f.pad(label)
    }
}

/// A transaction joined to its account, with its derived tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedTransaction<'a> {
    pub transaction: &'a Transaction,
    pub account: &'a Account,
    pub tag: ClassificationTag,
}

impl<'a> ClassifiedTransaction<'a> {
    /// Unsigned size of the transaction
    pub fn magnitude(&self) -> Money {
        self.transaction.amount.abs()
    }
}
