//! User settings for cashplan
//!
//! Display preferences, the default aggregation frequency and the category
//! labels that mark a transaction as a transfer.

use serde::{Deserialize, Serialize};

use super::paths::CashplanPaths;
use crate::error::CashplanError;
use crate::models::Frequency;

/// User settings for cashplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Bucket size for cash-flow reports when none is given
    #[serde(default)]
    pub default_frequency: Frequency,

    /// Category labels that mark a transaction as a transfer between accounts
    #[serde(default = "default_transfer_categories")]
    pub transfer_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_transfer_categories() -> Vec<String> {
    vec!["Transfer".to_string(), "Credit Card Payment".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_frequency: Frequency::default(),
            transfer_categories: default_transfer_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CashplanPaths) -> Result<Self, CashplanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CashplanError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashplanError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashplanPaths) -> Result<(), CashplanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CashplanError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CashplanError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
