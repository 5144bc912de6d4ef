//! Path management for cashplan
//!
//! ## Path Resolution Order
//!
//! 1. `CASHPLAN_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/cashplan` on Linux, `%APPDATA%\cashplan\config` on Windows)

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::CashplanError;
use crate::models::BudgetPeriod;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CASHPLAN_DATA_DIR";

/// Manages all paths used by cashplan
#[derive(Debug, Clone)]
pub struct CashplanPaths {
    base_dir: PathBuf,
}

impl CashplanPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CashplanError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "cashplan")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CashplanError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create CashplanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Debt rates, allocation fractions and horizon
    pub fn debt_config_file(&self) -> PathBuf {
        self.base_dir.join("debt.json")
    }

    /// Accounts, transactions and budget written by the fetch step
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("snapshot.json")
    }

    /// Directory of per-month budget files
    pub fn budgets_dir(&self) -> PathBuf {
        self.base_dir.join("budgets")
    }

    /// Budget file for one month (`budgets/2025-01.json`)
    pub fn month_budget_file(&self, period: &BudgetPeriod) -> PathBuf {
        self.budgets_dir().join(format!("{}.json", period))
    }

    /// Single budget used when a month has no file of its own
    pub fn custom_budget_file(&self) -> PathBuf {
        self.base_dir.join("custom_budget.json")
    }

    /// Default destination for exports
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("output")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CashplanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CashplanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.budgets_dir()).map_err(|e| {
            CashplanError::Io(format!("Failed to create budgets directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.budgets_dir(), temp_dir.path().join("budgets"));
        assert_eq!(paths.output_dir(), temp_dir.path().join("output"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = CashplanPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.budgets_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.debt_config_file(), temp_dir.path().join("debt.json"));
        assert_eq!(
            paths.month_budget_file(&BudgetPeriod::monthly(2025, 3)),
            temp_dir.path().join("budgets").join("2025-03.json")
        );
    }
}
