//! Reports module for cashplan
//!
//! Terminal renderings (and CSV exports where a table makes sense) of the
//! cash-flow, credit-card, forecast and payoff analyses.

pub mod cash_flow;
pub mod credit_card;
pub mod forecast;
pub mod payoff;

pub use cash_flow::CashFlowReport;
pub use credit_card::CreditCardReport;
pub use forecast::ForecastReport;
pub use payoff::{format_schedule, PayoffParams, PayoffReport, PayoffScenario};
