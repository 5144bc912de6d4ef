//! Credit-Card Report
//!
//! Current balances on every card and what happened to each over the range.

use serde::Serialize;

use crate::display::separator;
use crate::models::{Account, ClassifiedTransaction, Money};
use crate::services::credit::{self, CardProgress, CreditCardOverview};

const WIDTH: usize = 72;

#[derive(Debug, Clone, Serialize)]
pub struct CreditCardReport {
    pub overview: CreditCardOverview,
    pub progress: Vec<CardProgress>,
}

impl CreditCardReport {
    pub fn generate(accounts: &[Account], transactions: &[ClassifiedTransaction<'_>]) -> Self {
        Self {
            overview: credit::card_summaries(accounts),
            progress: credit::card_progress(accounts, transactions),
        }
    }

    /// Payments minus purchases across all cards
    pub fn total_net_reduction(&self) -> Money {
        self.progress.iter().map(|p| p.net_reduction()).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Credit Card Report\n");
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');

        if self.overview.cards.is_empty() {
            output.push_str("No credit card accounts found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>14} {:>14} {:>12}\n",
            "Card", "Payments", "Purchases", "Balance"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for card in &self.progress {
            output.push_str(&format!(
                "{:<28} {:>14} {:>14} {:>12}\n",
                crate::display::truncate(&card.name, 28),
                card.payments,
                card.purchases,
                card.current_balance
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("Total credit card debt: {}\n", self.overview.total_debt));

        let net = self.total_net_reduction();
        if net.is_negative() {
            output.push_str(&format!(
                "Purchases exceeded payments by {} this range\n",
                net.abs()
            ));
        } else {
            output.push_str(&format!("Net debt reduction this range: {}\n", net));
        }

        output
    }
}
