//! Debt configuration (`debt.json`)
//!
//! Interest rates per kind of debt, the category that marks loan repayments in
//! a budget, the allocation fractions to compare and the payoff horizon cap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::CashplanPaths;
use crate::error::{CashplanError, CashplanResult};
use crate::models::AllocationFraction;

/// Kind of debt being projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    #[default]
    CreditCard,
    Loan,
}

impl DebtKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "credit-card" | "credit_card" | "creditcard" | "card" | "cc" => Some(Self::CreditCard),
            "loan" => Some(Self::Loan),
            _ => None,
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => f.pad("credit card"),
            Self::Loan => f.pad("loan"),
        }
    }
}

/// Payoff projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtConfig {
    /// Annual rate applied to credit-card balances
    #[serde(default = "default_credit_card_rate")]
    pub credit_card_rate: f64,

    /// Annual rate applied to loan balances
    #[serde(default = "default_loan_rate")]
    pub loan_rate: f64,

    /// Budget category holding the regular loan payment
    #[serde(default = "default_loan_category")]
    pub loan_category: String,

    /// Shares of the monthly surplus to compare
    #[serde(default = "default_allocation_fractions")]
    pub allocation_fractions: Vec<f64>,

    /// Months after which a projection counts as never paying off
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,
}

fn default_credit_card_rate() -> f64 {
    0.24
}

fn default_loan_rate() -> f64 {
    0.07
}

fn default_loan_category() -> String {
    "Loan Repayment".to_string()
}

fn default_allocation_fractions() -> Vec<f64> {
    vec![0.25, 0.35, 0.50, 0.60, 0.65, 0.70, 0.75]
}

fn default_horizon_months() -> u32 {
    600
}

impl Default for DebtConfig {
    fn default() -> Self {
        Self {
            credit_card_rate: default_credit_card_rate(),
            loan_rate: default_loan_rate(),
            loan_category: default_loan_category(),
            allocation_fractions: default_allocation_fractions(),
            horizon_months: default_horizon_months(),
        }
    }
}

impl DebtConfig {
    /// Load from disk, falling back to defaults when the file is absent
    pub fn load_or_create(paths: &CashplanPaths) -> CashplanResult<Self> {
        let path = paths.debt_config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| CashplanError::Io(format!("Failed to read debt config: {}", e)))?;
        let config: DebtConfig = serde_json::from_str(&contents)
            .map_err(|e| CashplanError::Config(format!("Failed to parse debt config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to disk
    pub fn save(&self, paths: &CashplanPaths) -> CashplanResult<()> {
        self.validate()?;
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.debt_config_file(), contents)
            .map_err(|e| CashplanError::Io(format!("Failed to write debt config: {}", e)))?;
        Ok(())
    }

    /// Reject negative rates, fractions outside (0, 1] and a zero horizon
    pub fn validate(&self) -> CashplanResult<()> {
        for (name, rate) in [
            ("credit_card_rate", self.credit_card_rate),
            ("loan_rate", self.loan_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(CashplanError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }

        if self.horizon_months == 0 {
            return Err(CashplanError::Config(
                "horizon_months must be at least 1".into(),
            ));
        }

        self.fractions()
            .map_err(|e| CashplanError::Config(e.to_string()))?;
        Ok(())
    }

    /// The configured fractions, validated and deduplicated
    pub fn fractions(&self) -> CashplanResult<Vec<AllocationFraction>> {
        let mut fractions = self
            .allocation_fractions
            .iter()
            .map(|f| AllocationFraction::new(*f))
            .collect::<CashplanResult<Vec<_>>>()?;
        fractions.sort();
        fractions.dedup();
        Ok(fractions)
    }

    /// Annual rate for a kind of debt
    pub fn rate_for(&self, kind: DebtKind) -> f64 {
        match kind {
            DebtKind::CreditCard => self.credit_card_rate,
            DebtKind::Loan => self.loan_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DebtConfig::default();
        assert_eq!(config.credit_card_rate, 0.24);
        assert_eq!(config.loan_category, "Loan Repayment");
        assert_eq!(config.fractions().unwrap().len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DebtConfig::default();
        config.loan_rate = -0.01;
        assert!(config.validate().is_err());

        let mut config = DebtConfig::default();
        config.allocation_fractions = vec![0.5, 1.2];
        assert!(matches!(config.validate(), Err(CashplanError::Config(_))));

        let mut config = DebtConfig::default();
        config.allocation_fractions = vec![0.5, 0.00001];
        assert!(matches!(config.validate(), Err(CashplanError::Config(_))));

        let mut config = DebtConfig::default();
        config.horizon_months = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fractions_sorted_and_deduplicated() {
        let config = DebtConfig {
            allocation_fractions: vec![0.75, 0.25, 0.5, 0.25],
            ..DebtConfig::default()
        };
        let values: Vec<f64> = config.fractions().unwrap().iter().map(|f| f.value()).collect();
        assert_eq!(values, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(DebtConfig::load_or_create(&paths).unwrap(), DebtConfig::default());

        let config = DebtConfig {
            credit_card_rate: 0.1999,
            horizon_months: 360,
            ..DebtConfig::default()
        };
        config.save(&paths).unwrap();

        assert_eq!(DebtConfig::load_or_create(&paths).unwrap(), config);
    }

    #[test]
    fn test_debt_kind_parse() {
        assert_eq!(DebtKind::parse("credit-card"), Some(DebtKind::CreditCard));
        assert_eq!(DebtKind::parse("Loan"), Some(DebtKind::Loan));
        assert_eq!(DebtKind::parse("mortgage"), None);
        assert_eq!(DebtConfig::default().rate_for(DebtKind::Loan), 0.07);
    }
}
