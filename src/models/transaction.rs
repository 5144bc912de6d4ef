//! Transaction model
//!
//! A transaction as fetched from the aggregation API. It refers to its account
//! by id only; resolving that reference is the classifier's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::{self, Money};

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier issued by the data source
    pub id: TransactionId,

    /// The account this transaction was posted to
    #[serde(alias = "accountId")]
    pub account_id: AccountId,

    /// Posting date
    pub date: NaiveDate,

    /// Signed amount (positive for inflow, negative for outflow)
    #[serde(with = "money::decimal")]
    pub amount: Money,

    /// Category label assigned by the data source
    #[serde(default)]
    pub category: String,

    /// Merchant or payee name
    #[serde(default, alias = "merchant")]
    pub payee: String,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(
        id: impl Into<TransactionId>,
        account_id: impl Into<AccountId>,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            date,
            amount,
            category: String::new(),
            payee: String::new(),
        }
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder-style payee assignment
    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = payee.into();
        self
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Case-insensitive match of the category label against a set of markers
    pub fn category_in<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        let category = self.category.trim();
        !category.is_empty()
            && markers
                .iter()
                .any(|m| m.as_ref().trim().eq_ignore_ascii_case(category))
    }

    /// Check if the transaction falls within an inclusive date range
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.payee.is_empty() {
            &self.category
        } else {
            &self.payee
        };
        write!(f, "{} {} {}", self.date.format("%Y-%m-%d"), label, self.amount)
    }
}
