//! Display formatting for terminal output

pub mod report;

pub use report::{amount_line, format_bar, format_percentage, money_bar, separator, truncate};
