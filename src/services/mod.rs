//! Service layer for cashplan
//!
//! The analysis itself (classification, aggregation, forecast and payoff
//! projection) is pure functions over in-memory snapshots. Only the budget
//! service touches storage.

pub mod budget;
pub mod cash_flow;
pub mod classifier;
pub mod credit;
pub mod forecast;
pub mod payoff;

pub use budget::{merge_line_items, BudgetService};
pub use cash_flow::{aggregate, category_breakdown, cumulative_net_debt, summary_statistics};
pub use classifier::{classify, classify_all, split_orphans, AccountIndex};
pub use credit::{card_progress, card_summaries, CardProgress, CardSummary, CreditCardOverview};
pub use forecast::{forecast, ForecastResult};
pub use payoff::{project, project_loan_multi, project_multi};
