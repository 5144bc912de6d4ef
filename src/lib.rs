//! cashplan - cash-vs-credit budgeting analysis
//!
//! This library provides the analysis behind the `cashplan` command: it tags
//! each transaction from a snapshot of financial accounts as income, cash
//! expense, card purchase, card payment or transfer, aggregates the tags into
//! per-period cash flow, forecasts a month's end cash from a budget, and
//! projects how long a credit-card or loan balance takes to pay off.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution, settings and debt configuration
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, periods, budgets, schedules)
//! - `services`: Classification, aggregation, forecast and payoff logic
//! - `storage`: JSON file storage for budgets and the input snapshot
//! - `reports`: Terminal and CSV renderings of each analysis
//! - `export`: JSON / YAML / CSV export of a full analysis
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cashplan::models::Money;
//! use cashplan::services::project;
//!
//! let projection = project(Money::from_dollars(1000), 0.24, Money::from_dollars(200), 600)?;
//! assert_eq!(projection.months(), Some(6));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{CashplanError, CashplanResult};
