//! Configuration module for cashplan
//!
//! - Path resolution for config, budgets, snapshot and output
//! - User settings persistence
//! - Debt projection settings

pub mod debt;
pub mod paths;
pub mod settings;

pub use debt::{DebtConfig, DebtKind};
pub use paths::CashplanPaths;
pub use settings::Settings;
