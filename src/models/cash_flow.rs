//! Aggregated cash-flow figures
//!
//! Only the summed components are stored. Every balance figure is a method so
//! it can be recomputed from those components at any time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::BudgetPeriod;

/// Metrics for one aggregation bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    pub period: BudgetPeriod,
    /// First day of the bucket, clipped to the requested range
    pub start: NaiveDate,
    /// Last day of the bucket, clipped to the requested range
    pub end: NaiveDate,
    /// Sum of income-tagged amounts
    pub income: Money,
    /// Magnitude of cash expenses plus card purchases
    pub total_expense: Money,
    /// Magnitude of card purchases
    pub cc_expense: Money,
    /// Magnitude of payments made toward cards
    pub cc_payments: Money,
    pub transaction_count: usize,
}

impl CashFlowPeriod {
    /// An all-zero bucket
    pub fn empty(period: BudgetPeriod, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            period,
            start,
            end,
            income: Money::zero(),
            total_expense: Money::zero(),
            cc_expense: Money::zero(),
            cc_payments: Money::zero(),
            transaction_count: 0,
        }
    }

    /// Expenses paid directly from cash accounts
    pub fn cash_expense(&self) -> Money {
        self.total_expense - self.cc_expense
    }

    /// income − (total_expense − cc_expense)
    pub fn cash_balance(&self) -> Money {
        self.income - self.cash_expense()
    }

    /// Income minus cash expenses minus card payments
    pub fn true_cash_remaining(&self) -> Money {
        self.cash_balance() - self.cc_payments
    }

    /// Card payments minus card purchases; positive means debt went down
    pub fn net_card_change(&self) -> Money {
        self.cc_payments - self.cc_expense
    }

    /// Income minus all expenses
    pub fn net_income(&self) -> Money {
        self.income - self.total_expense
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// Totals and means over a sequence of periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CashFlowSummary {
    pub period_count: usize,
    pub total_income: Money,
    pub total_expense: Money,
    pub total_cc_expense: Money,
    pub total_cc_payments: Money,
    pub total_cash_balance: Money,
    pub total_true_cash_remaining: Money,
    pub avg_income: Money,
    pub avg_expense: Money,
    pub avg_cash_balance: Money,
    /// Share of total expense charged to cards, in percent
    pub cc_expense_percentage: f64,
}

impl CashFlowSummary {
    pub fn net_income(&self) -> Money {
        self.total_income - self.total_expense
    }

    pub fn total_cash_expense(&self) -> Money {
        self.total_expense - self.total_cc_expense
    }
}

/// Spending (or income) for one category split by how it was paid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    /// Magnitude of all counted transactions in the category
    pub actual: Money,
    /// Portion charged to credit cards
    pub cc_amount: Money,
    /// Portion paid from cash accounts
    pub cash_amount: Money,
}

impl CategoryBreakdown {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            actual: Money::zero(),
            cc_amount: Money::zero(),
            cash_amount: Money::zero(),
        }
    }

    /// Card share of the category, in percent
    pub fn cc_percentage(&self) -> f64 {
        if self.actual.is_zero() {
            0.0
        } else {
            self.cc_amount.cents() as f64 / self.actual.cents() as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CashFlowPeriod {
        let period = BudgetPeriod::monthly(2025, 1);
        let mut p = CashFlowPeriod::empty(period.clone(), period.start_date(), period.end_date());
        p.income = Money::from_dollars(3000);
        p.total_expense = Money::from_dollars(1800);
        p.cc_expense = Money::from_dollars(800);
        p.cc_payments = Money::from_dollars(500);
        p.transaction_count = 12;
        p
    }

    #[test]
    fn test_derived_figures() {
        let p = sample();
        assert_eq!(p.cash_expense(), Money::from_dollars(1000));
        assert_eq!(p.cash_balance(), Money::from_dollars(2000));
        assert_eq!(p.true_cash_remaining(), Money::from_dollars(1500));
        assert_eq!(p.net_card_change(), Money::from_dollars(-300));
        assert_eq!(p.net_income(), Money::from_dollars(1200));
    }

    #[test]
    fn test_cash_balance_tracks_components() {
        let mut p = sample();
        p.cc_expense = Money::zero();
        assert_eq!(p.cash_balance(), Money::from_dollars(1200));
    }

    #[test]
    fn test_cc_percentage() {
        let mut b = CategoryBreakdown::new("Dining");
        assert_eq!(b.cc_percentage(), 0.0);
        b.actual = Money::from_dollars(200);
        b.cc_amount = Money::from_dollars(50);
        assert!((b.cc_percentage() - 25.0).abs() < 1e-9);
    }
}
