//! Per-month budget files
//!
//! Each month lives in `budgets/<YYYY-MM>.json`. When a month has no file the
//! single `custom_budget.json` is used, and failing that a default budget with
//! one zero "Credit Card Payments" line.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::paths::CashplanPaths;
use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetPeriod, MonthBudget};

use super::file_io::{read_json_optional, write_json_atomic};

/// Where a loaded budget came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetSource {
    Month(PathBuf),
    Custom(PathBuf),
    Default,
}

impl BudgetSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Month(path) | Self::Custom(path) => path.display().to_string(),
            Self::Default => "built-in default".to_string(),
        }
    }
}

/// A budget together with the file it was read from
#[derive(Debug, Clone)]
pub struct LoadedBudget {
    pub budget: MonthBudget,
    pub source: BudgetSource,
}

/// Repository for month budget files
pub struct BudgetRepository {
    paths: CashplanPaths,
}

impl BudgetRepository {
    pub fn new(paths: CashplanPaths) -> Self {
        Self { paths }
    }

    /// Read the file for exactly this month, if there is one
    pub fn get_month(&self, period: &BudgetPeriod) -> CashplanResult<Option<MonthBudget>> {
        read_json_optional(self.paths.month_budget_file(period))
    }

    /// Load the budget for a month, falling back to the custom then default budget
    pub fn load_month(&self, period: &BudgetPeriod) -> CashplanResult<LoadedBudget> {
        let month_file = self.paths.month_budget_file(period);
        if let Some(budget) = read_json_optional(&month_file)? {
            debug!(month = %period, "loaded month budget");
            return Ok(LoadedBudget {
                budget,
                source: BudgetSource::Month(month_file),
            });
        }

        let custom_file = self.paths.custom_budget_file();
        if let Some(budget) = read_json_optional(&custom_file)? {
            debug!(month = %period, "no month budget, using custom budget");
            return Ok(LoadedBudget {
                budget,
                source: BudgetSource::Custom(custom_file),
            });
        }

        warn!(month = %period, "no budget file found, using default budget");
        Ok(LoadedBudget {
            budget: MonthBudget::default_budget(),
            source: BudgetSource::Default,
        })
    }

    /// Write a month's budget; totals are recomputed before saving
    pub fn save_month(&self, period: &BudgetPeriod, budget: &MonthBudget) -> CashplanResult<()> {
        let mut budget = budget.clone();
        budget.recompute_totals();
        write_json_atomic(self.paths.month_budget_file(period), &budget)?;
        debug!(month = %period, "saved month budget");
        Ok(())
    }

    /// Months with a saved budget file, oldest first
    pub fn list_months(&self) -> CashplanResult<Vec<BudgetPeriod>> {
        let dir = self.paths.budgets_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| {
            CashplanError::Storage(format!("Failed to read {}: {}", dir.display(), e))
        })?;

        let mut months = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match BudgetPeriod::parse(stem) {
                Ok(period @ BudgetPeriod::Monthly { .. }) => months.push(period),
                _ => debug!(file = %path.display(), "skipping non-month budget file"),
            }
        }

        months.sort();
        Ok(months)
    }

    /// Copy one month's effective budget to another month
    ///
    /// Refuses to replace an existing target file unless `overwrite` is set.
    /// The built-in default is never copied; only a saved budget is.
    pub fn copy_month(
        &self,
        from: &BudgetPeriod,
        to: &BudgetPeriod,
        overwrite: bool,
    ) -> CashplanResult<MonthBudget> {
        if from == to {
            return Err(CashplanError::Validation(
                "Source and target month are the same".into(),
            ));
        }

        if !overwrite && self.paths.month_budget_file(to).exists() {
            return Err(CashplanError::Validation(format!(
                "A budget for {} already exists; pass --force to replace it",
                to
            )));
        }

        let loaded = self.load_month(from)?;
        if loaded.source == BudgetSource::Default {
            return Err(CashplanError::budget_not_found(from.to_string()));
        }
        self.save_month(to, &loaded.budget)?;
        Ok(loaded.budget)
    }

    /// Delete a month's file; returns an error if none exists
    pub fn delete_month(&self, period: &BudgetPeriod) -> CashplanResult<()> {
        let path = self.paths.month_budget_file(period);
        if !path.exists() {
            return Err(CashplanError::budget_not_found(period.to_string()));
        }
        std::fs::remove_file(&path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItemGroup, Money};
    use tempfile::TempDir;

    fn setup() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, BudgetRepository::new(paths))
    }

    fn sample_budget() -> MonthBudget {
        let mut budget = MonthBudget::default();
        budget.set("Paycheck", LineItemGroup::Income, Money::from_dollars(2000));
        budget.set("Rent", LineItemGroup::Expense, Money::from_dollars(1200));
        budget
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let (_dir, repo) = setup();
        let loaded = repo.load_month(&BudgetPeriod::monthly(2025, 1)).unwrap();
        assert_eq!(loaded.source, BudgetSource::Default);
        assert_eq!(loaded.budget, MonthBudget::default_budget());
    }

    #[test]
    fn test_load_prefers_month_over_custom() {
        let (dir, repo) = setup();
        let jan = BudgetPeriod::monthly(2025, 1);

        let mut custom = MonthBudget::default();
        custom.set("Side gig", LineItemGroup::Income, Money::from_dollars(100));
        write_json_atomic(dir.path().join("custom_budget.json"), &custom).unwrap();

        let loaded = repo.load_month(&jan).unwrap();
        assert!(matches!(loaded.source, BudgetSource::Custom(_)));
        assert_eq!(loaded.budget.total_income, Money::from_dollars(100));

        repo.save_month(&jan, &sample_budget()).unwrap();
        let loaded = repo.load_month(&jan).unwrap();
        assert!(matches!(loaded.source, BudgetSource::Month(_)));
        assert_eq!(loaded.budget.total_income, Money::from_dollars(2000));
    }

    #[test]
    fn test_save_recomputes_totals() {
        let (_dir, repo) = setup();
        let jan = BudgetPeriod::monthly(2025, 1);
        let mut budget = sample_budget();
        budget.total_expenses = Money::from_dollars(1);

        repo.save_month(&jan, &budget).unwrap();
        let saved = repo.get_month(&jan).unwrap().unwrap();
        assert_eq!(saved.total_expenses, Money::from_dollars(1200));
    }

    #[test]
    fn test_list_months_sorted() {
        let (dir, repo) = setup();
        assert!(repo.list_months().unwrap().is_empty());

        repo.save_month(&BudgetPeriod::monthly(2025, 3), &sample_budget()).unwrap();
        repo.save_month(&BudgetPeriod::monthly(2024, 11), &sample_budget()).unwrap();
        std::fs::write(dir.path().join("budgets").join("notes.txt"), "x").unwrap();

        assert_eq!(
            repo.list_months().unwrap(),
            vec![BudgetPeriod::monthly(2024, 11), BudgetPeriod::monthly(2025, 3)]
        );
    }

    #[test]
    fn test_copy_month() {
        let (_dir, repo) = setup();
        let jan = BudgetPeriod::monthly(2025, 1);
        let feb = BudgetPeriod::monthly(2025, 2);
        repo.save_month(&jan, &sample_budget()).unwrap();

        repo.copy_month(&jan, &feb, false).unwrap();
        assert_eq!(repo.get_month(&feb).unwrap(), repo.get_month(&jan).unwrap());

        let err = repo.copy_month(&jan, &feb, false).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.copy_month(&jan, &feb, true).is_ok());
        assert!(repo.copy_month(&jan, &jan, true).is_err());
    }

    #[test]
    fn test_copy_without_saved_budget_writes_nothing() {
        let (_dir, repo) = setup();
        let jan = BudgetPeriod::monthly(2025, 1);
        let feb = BudgetPeriod::monthly(2025, 2);

        assert!(repo.copy_month(&jan, &feb, false).unwrap_err().is_not_found());
        assert!(repo.get_month(&feb).unwrap().is_none());
    }

    #[test]
    fn test_delete_month() {
        let (_dir, repo) = setup();
        let jan = BudgetPeriod::monthly(2025, 1);
        assert!(repo.delete_month(&jan).unwrap_err().is_not_found());

        repo.save_month(&jan, &sample_budget()).unwrap();
        repo.delete_month(&jan).unwrap();
        assert!(repo.get_month(&jan).unwrap().is_none());
    }
}
