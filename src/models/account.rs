//! Account model
//!
//! An immutable snapshot of one account as reported by the aggregation API
//! for the current run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::{self, Money};

/// Type of financial account
///
/// The aggregation API reports types such as `credit`, `depository` or
/// `loan`. Anything unrecognised lands in [`AccountType::Other`] instead of
/// failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Credit card
    #[serde(alias = "credit")]
    CreditCard,
    /// Checking, savings or cash
    #[serde(alias = "cash", alias = "checking", alias = "savings")]
    Depository,
    /// Installment loan
    Loan,
    /// Investment, property, or anything the classifier has no rule for
    #[default]
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Returns true for accounts whose balance is money owed
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::CreditCard | Self::Loan)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit" | "credit_card" | "creditcard" | "credit-card" => Some(Self::CreditCard),
            "depository" | "cash" | "checking" | "savings" => Some(Self::Depository),
            "loan" => Some(Self::Loan),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Depository => write!(f, "Cash"),
            Self::Loan => write!(f, "Loan"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Identifier issued by the data source
    pub id: AccountId,

    /// Display name (e.g., "Sapphire Preferred")
    #[serde(alias = "displayName")]
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance; negative for money owed on credit accounts
    #[serde(alias = "currentBalance", with = "money::decimal")]
    pub balance: Money,
}

impl Account {
    /// Create an account snapshot
    pub fn new(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
            balance,
        }
    }

    /// Amount owed on a liability account, as a positive figure
    pub fn debt(&self) -> Money {
        if self.account_type.is_liability() {
            self.balance.abs()
        } else {
            Money::zero()
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(AccountValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    EmptyName,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Account id cannot be empty"),
            Self::EmptyName => write!(f, "Account name cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}
