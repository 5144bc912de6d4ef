//! Core data models for cashplan
//!
//! Plain value types for the budgeting domain: account and transaction
//! snapshots from the data source, derived classification tags, aggregated
//! cash-flow periods, budget line items and payoff schedules.

pub mod account;
pub mod budget;
pub mod cash_flow;
pub mod classification;
pub mod ids;
pub mod money;
pub mod payoff;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::{BudgetFileEntry, BudgetLineItem, LineItemGroup, MonthBudget};
pub use cash_flow::{CashFlowPeriod, CashFlowSummary, CategoryBreakdown};
pub use classification::{ClassificationTag, ClassifiedTransaction};
pub use ids::{AccountId, TransactionId};
pub use money::Money;
pub use payoff::{
    AllocationFraction, NonConvergence, NonConvergenceReason, PayoffSchedule,
    PayoffScheduleEntry, Projection,
};
pub use period::{BudgetPeriod, Frequency};
pub use transaction::Transaction;
