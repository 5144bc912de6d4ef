//! Cash-Flow Report
//!
//! Per-period income, expense and card figures for a date range, with the
//! range summary and a per-category split of spending.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::display::{format_percentage, money_bar, separator};
use crate::error::CashplanResult;
use crate::models::{
    BudgetPeriod, CashFlowPeriod, CashFlowSummary, CategoryBreakdown, ClassifiedTransaction,
    Frequency, LineItemGroup, Money,
};
use crate::services::cash_flow;

const WIDTH: usize = 96;
const BAR_WIDTH: usize = 16;

/// Cash-flow report for a date range
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    pub periods: Vec<CashFlowPeriod>,
    pub summary: CashFlowSummary,
    pub expense_categories: Vec<CategoryBreakdown>,
    pub income_categories: Vec<CategoryBreakdown>,
    /// Running card debt added since the start of the range
    pub cumulative_net_debt: Vec<(BudgetPeriod, Money)>,
}

impl CashFlowReport {
    /// Generate the report from classified transactions
    pub fn generate(
        transactions: &[ClassifiedTransaction<'_>],
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
    ) -> CashplanResult<Self> {
        let periods = cash_flow::aggregate(transactions, start_date, end_date, frequency)?;
        let in_range: Vec<ClassifiedTransaction<'_>> = transactions
            .iter()
            .filter(|t| t.transaction.within(start_date, end_date))
            .copied()
            .collect();

        Ok(Self {
            start_date,
            end_date,
            frequency,
            summary: cash_flow::summary_statistics(&periods),
            expense_categories: cash_flow::category_breakdown(&in_range, LineItemGroup::Expense),
            income_categories: cash_flow::category_breakdown(&in_range, LineItemGroup::Income),
            cumulative_net_debt: cash_flow::cumulative_net_debt(&periods),
            periods,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Cash Flow Report ({}): {} to {}\n",
            self.frequency, self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>12} {:>12}  {}\n",
            "Period", "Income", "Expense", "Card", "Cash Bal.", "True Cash", "Expense"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let max_expense = self
            .periods
            .iter()
            .map(|p| p.total_expense)
            .max()
            .unwrap_or_default();

        for p in &self.periods {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>12} {:>12}  {}\n",
                p.period.to_string(),
                p.income,
                p.total_expense,
                p.cc_expense,
                p.cash_balance(),
                p.true_cash_remaining(),
                money_bar(p.total_expense, max_expense, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            self.summary.total_income,
            self.summary.total_expense,
            self.summary.total_cc_expense,
            self.summary.total_cash_balance,
            self.summary.total_true_cash_remaining
        ));
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>12}\n",
            "AVERAGE",
            self.summary.avg_income,
            self.summary.avg_expense,
            "",
            self.summary.avg_cash_balance
        ));

        output.push_str(&format!(
            "\nNet income: {}   Card share of expenses: {}   Card payments: {}\n",
            self.summary.net_income(),
            format_percentage(self.summary.cc_expense_percentage),
            self.summary.total_cc_payments
        ));

        if let Some((_, debt)) = self.cumulative_net_debt.last() {
            if debt.is_positive() {
                output.push_str(&format!("Card debt grew by {} over the range\n", debt));
            } else if debt.is_negative() {
                output.push_str(&format!("Card debt fell by {} over the range\n", debt.abs()));
            }
        }

        if !self.expense_categories.is_empty() {
            output.push_str(&format!(
                "\n{:<32} {:>12} {:>12} {:>12} {:>8}\n",
                "Expense Category", "Actual", "Card", "Cash", "Card %"
            ));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for row in &self.expense_categories {
                output.push_str(&format!(
                    "{:<32} {:>12} {:>12} {:>12} {:>8}\n",
                    crate::display::truncate(&row.category, 32),
                    row.actual,
                    row.cc_amount,
                    row.cash_amount,
                    format_percentage(row.cc_percentage())
                ));
            }
        }

        output
    }

    /// Export the per-period figures to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> CashplanResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Period",
            "Start",
            "End",
            "Income",
            "Total Expense",
            "Card Expense",
            "Cash Expense",
            "Cash Balance",
            "Card Payments",
            "True Cash Remaining",
            "Transactions",
        ])?;

        for p in &self.periods {
            csv.write_record([
                p.period.to_string(),
                p.start.to_string(),
                p.end.to_string(),
                decimal(p.income),
                decimal(p.total_expense),
                decimal(p.cc_expense),
                decimal(p.cash_expense()),
                decimal(p.cash_balance()),
                decimal(p.cc_payments),
                decimal(p.true_cash_remaining()),
                p.transaction_count.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

/// Plain decimal for CSV cells (`-1234.50`)
pub(crate) fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Transaction};
    use crate::services::classifier::{classify_all, AccountIndex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> (Vec<Account>, Vec<Transaction>) {
        let accounts = vec![
            Account::new("visa", "Visa", AccountType::CreditCard, Money::zero()),
            Account::new("chk", "Checking", AccountType::Depository, Money::zero()),
        ];
        let transactions = vec![
            Transaction::new("t1", "chk", date(2025, 1, 2), Money::from_dollars(3000))
                .with_category("Paycheck"),
            Transaction::new("t2", "visa", date(2025, 1, 3), Money::from_cents(-4550))
                .with_category("Dining"),
            Transaction::new("t3", "chk", date(2025, 2, 3), Money::from_dollars(-1200))
                .with_category("Rent"),
            Transaction::new("t4", "chk", date(2025, 4, 3), Money::from_dollars(-10))
                .with_category("Outside"),
        ];
        (accounts, transactions)
    }

    #[test]
    fn test_generate_and_format() {
        let (accounts, transactions) = fixture();
        let index = AccountIndex::new(&accounts);
        let classified = classify_all(&transactions, &index, &["Transfer"]).unwrap();

        let report = CashFlowReport::generate(
            &classified,
            date(2025, 1, 1),
            date(2025, 3, 31),
            Frequency::Monthly,
        )
        .unwrap();

        assert_eq!(report.periods.len(), 3);
        assert_eq!(report.summary.total_expense, Money::from_cents(124550));
        assert!(report.expense_categories.iter().all(|c| c.category != "Outside"));

        let text = report.format_terminal();
        assert!(text.contains("Cash Flow Report (monthly)"));
        assert!(text.contains("2025-02"));
        assert!(text.contains("$3,000.00"));
        assert!(text.contains("Dining"));
    }

    #[test]
    fn test_export_csv() {
        let (accounts, transactions) = fixture();
        let index = AccountIndex::new(&accounts);
        let classified = classify_all(&transactions, &index, &["Transfer"]).unwrap();
        let report = CashFlowReport::generate(
            &classified,
            date(2025, 1, 1),
            date(2025, 1, 31),
            Frequency::Monthly,
        )
        .unwrap();

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Period,Start,End,Income"));
        assert_eq!(
            lines[1],
            "2025-01,2025-01-01,2025-01-31,3000.00,45.50,45.50,0.00,3000.00,0.00,3000.00,2"
        );
    }
}
