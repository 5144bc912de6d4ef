//! Budget Forecast Report
//!
//! Expected end-of-month cash with the income and expense lines behind it.

use serde::Serialize;

use crate::display::{amount_line, separator};
use crate::error::CashplanResult;
use crate::models::{BudgetLineItem, BudgetPeriod, LineItemGroup, Money};
use crate::services::forecast::{self, ForecastResult};

const WIDTH: usize = 72;

#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub period: BudgetPeriod,
    /// Where the planned amounts came from
    pub budget_source: String,
    pub line_items: Vec<BudgetLineItem>,
    pub result: ForecastResult,
}

impl ForecastReport {
    pub fn generate(
        period: BudgetPeriod,
        budget_source: impl Into<String>,
        starting_cash: Money,
        line_items: Vec<BudgetLineItem>,
    ) -> CashplanResult<Self> {
        let result = forecast::forecast(starting_cash, &line_items)?;
        Ok(Self {
            period,
            budget_source: budget_source.into(),
            line_items,
            result,
        })
    }

    fn format_group(&self, output: &mut String, group: LineItemGroup) {
        let title = match group {
            LineItemGroup::Income => "Income",
            LineItemGroup::Expense => "Expenses",
        };
        output.push_str(&format!(
            "\n{:<30} {:>12} {:>12} {:>12}\n",
            title, "Planned", "Actual", "Remaining"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let mut any = false;
        for item in self.line_items.iter().filter(|i| i.group == group) {
            any = true;
            let actual = item.actual.map(|a| a.to_string()).unwrap_or_else(|| "-".into());
            let remaining = item
                .remaining()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".into());
            output.push_str(&format!(
                "{:<30} {:>12} {:>12} {:>12}\n",
                crate::display::truncate(&item.name, 30),
                item.planned,
                actual,
                remaining
            ));
        }
        if !any {
            output.push_str("  (none)\n");
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Forecast: {}\n", self.period.friendly()));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!("Budget: {}\n", self.budget_source));

        self.format_group(&mut output, LineItemGroup::Income);
        self.format_group(&mut output, LineItemGroup::Expense);

        output.push('\n');
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&amount_line("Starting cash:", self.result.starting_cash, 40));
        output.push_str(&amount_line("Expected income:", self.result.expected_income, 40));
        output.push_str(&amount_line("Expected expenses:", self.result.expected_expense, 40));
        output.push_str(&amount_line("Expected end-of-month cash:", self.result.expected_end_cash, 40));

        if self.result.expected_end_cash.is_negative() {
            output.push_str("\nThe budget spends more than the month brings in.\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_report() {
        let items = vec![
            BudgetLineItem::income("Paycheck", Money::from_dollars(2000))
                .with_actual(Money::from_dollars(2000)),
            BudgetLineItem::expense("Rent", Money::from_dollars(1800))
                .with_actual(Money::from_dollars(1500)),
        ];
        let report = ForecastReport::generate(
            BudgetPeriod::monthly(2025, 1),
            "budgets/2025-01.json",
            Money::from_dollars(500),
            items,
        )
        .unwrap();

        assert_eq!(report.result.expected_end_cash, Money::from_dollars(700));

        let text = report.format_terminal();
        assert!(text.contains("Budget Forecast: January 2025"));
        assert!(text.contains("Expected end-of-month cash:"));
        assert!(text.contains("$700.00"));
        // rent remaining
        assert!(text.contains("$300.00"));
        assert!(!text.contains("spends more"));
    }

    #[test]
    fn test_overspent_budget_is_flagged() {
        let items = vec![BudgetLineItem::expense("Rent", Money::from_dollars(900))];
        let report =
            ForecastReport::generate(BudgetPeriod::monthly(2025, 1), "default", Money::zero(), items)
                .unwrap();
        let text = report.format_terminal();
        assert!(text.contains("(none)"));
        assert!(text.contains("spends more"));
    }
}
