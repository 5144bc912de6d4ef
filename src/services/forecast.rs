//! Budget forecast
//!
//! Expected end-of-period cash from a starting balance and budget line items.
//! Planned amounts are magnitudes; the group decides the direction.

use serde::Serialize;
use tracing::debug;

use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetLineItem, LineItemGroup, Money};

/// Expected and actual totals for one budget period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastResult {
    pub starting_cash: Money,
    pub expected_income: Money,
    pub expected_expense: Money,
    /// starting_cash + expected_income − expected_expense
    pub expected_end_cash: Money,
    /// Sum of the actual amounts reported so far on income lines
    pub actual_income: Money,
    /// Sum of the actual amounts reported so far on expense lines
    pub actual_expense: Money,
}

impl ForecastResult {
    /// Cash left over each month, available for extra debt payments
    pub fn surplus(&self) -> Money {
        self.expected_end_cash
    }

    /// Planned income minus planned expense, ignoring starting cash
    pub fn planned_net(&self) -> Money {
        self.expected_income - self.expected_expense
    }
}

/// Compute the forecast; a negative planned expense is a validation error
pub fn forecast(starting_cash: Money, line_items: &[BudgetLineItem]) -> CashplanResult<ForecastResult> {
    for item in line_items {
        item.validate()
            .map_err(|e| CashplanError::Validation(e.to_string()))?;
    }

    let sum = |group: LineItemGroup, amount: fn(&BudgetLineItem) -> Money| -> Money {
        line_items
            .iter()
            .filter(|i| i.group == group)
            .map(amount)
            .sum()
    };
    let planned = |i: &BudgetLineItem| i.planned;
    let actual = |i: &BudgetLineItem| i.actual.unwrap_or_default();

    let expected_income = sum(LineItemGroup::Income, planned);
    let expected_expense = sum(LineItemGroup::Expense, planned);

    let result = ForecastResult {
        starting_cash,
        expected_income,
        expected_expense,
        expected_end_cash: starting_cash + expected_income - expected_expense,
        actual_income: sum(LineItemGroup::Income, actual),
        actual_expense: sum(LineItemGroup::Expense, actual),
    };

    debug!(
        lines = line_items.len(),
        expected_end_cash = %result.expected_end_cash,
        "computed forecast"
    );
    Ok(result)
}
