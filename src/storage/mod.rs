//! Storage layer for cashplan
//!
//! Flat JSON files only: per-month budgets written atomically, and the
//! snapshot left behind by the fetch step.

pub mod budgets;
pub mod file_io;
pub mod snapshot;

pub use budgets::{BudgetRepository, BudgetSource, LoadedBudget};
pub use file_io::{read_json_optional, read_json_required, write_json_atomic};
pub use snapshot::Snapshot;

use std::path::Path;

use crate::config::paths::CashplanPaths;
use crate::error::CashplanError;

/// Entry point to everything cashplan reads from disk
pub struct Storage {
    paths: CashplanPaths,
    pub budgets: BudgetRepository,
}

impl Storage {
    pub fn new(paths: CashplanPaths) -> Self {
        Self {
            budgets: BudgetRepository::new(paths.clone()),
            paths,
        }
    }

    pub fn paths(&self) -> &CashplanPaths {
        &self.paths
    }

    /// Load a snapshot from `path`, or from the default location
    pub fn load_snapshot(&self, path: Option<&Path>) -> Result<Snapshot, CashplanError> {
        match path {
            Some(path) => Snapshot::load(path),
            None => {
                let default = self.paths.snapshot_file();
                if !default.exists() {
                    return Err(CashplanError::Storage(format!(
                        "No snapshot at {}; pass --snapshot or fetch data first",
                        default.display()
                    )));
                }
                Snapshot::load(default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_snapshot_explains() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(CashplanPaths::with_base_dir(temp_dir.path().to_path_buf()));

        let err = storage.load_snapshot(None).unwrap_err();
        assert!(err.to_string().contains("--snapshot"));
    }

    #[test]
    fn test_loads_default_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.snapshot_file(), r#"{"starting_cash": 12.5}"#).unwrap();

        let storage = Storage::new(paths);
        let snapshot = storage.load_snapshot(None).unwrap();
        assert_eq!(snapshot.starting_cash.cents(), 1250);
    }
}
