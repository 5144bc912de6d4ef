//! Credit-card analysis
//!
//! Balances across all cards and, per card, how this range's payments
//! compare with new purchases.

use serde::Serialize;

use crate::models::{
    Account, AccountId, AccountType, ClassificationTag, ClassifiedTransaction, Money,
};

/// One card's balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub account_id: AccountId,
    pub name: String,
    pub balance: Money,
    /// Amount owed, as a positive figure
    pub debt: Money,
}

/// All cards and the total owed across them
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CreditCardOverview {
    pub cards: Vec<CardSummary>,
    pub total_debt: Money,
}

/// Payments against purchases for one card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardProgress {
    pub account_id: AccountId,
    pub name: String,
    pub payments: Money,
    pub purchases: Money,
    pub current_balance: Money,
}

impl CardProgress {
    /// Payments minus purchases; negative means the card's debt grew
    pub fn net_reduction(&self) -> Money {
        self.payments - self.purchases
    }
}

fn credit_cards(accounts: &[Account]) -> impl Iterator<Item = &Account> {
    accounts
        .iter()
        .filter(|a| a.account_type == AccountType::CreditCard)
}

/// Credit-card accounts with their balances and the total debt
pub fn card_summaries(accounts: &[Account]) -> CreditCardOverview {
    let cards: Vec<CardSummary> = credit_cards(accounts)
        .map(|a| CardSummary {
            account_id: a.id.clone(),
            name: a.name.clone(),
            balance: a.balance,
            debt: a.debt(),
        })
        .collect();

    CreditCardOverview {
        total_debt: cards.iter().map(|c| c.debt).sum(),
        cards,
    }
}

/// Per-card payments and purchases over the classified transactions
///
/// Every credit card appears, including cards with no activity.
pub fn card_progress(
    accounts: &[Account],
    transactions: &[ClassifiedTransaction<'_>],
) -> Vec<CardProgress> {
    credit_cards(accounts)
        .map(|card| {
            let on_card = || transactions.iter().filter(|t| t.account.id == card.id);
            let sum_tag = |tag: ClassificationTag| {
                on_card()
                    .filter(|t| t.tag == tag)
                    .map(|t| t.magnitude())
                    .sum::<Money>()
            };

            CardProgress {
                account_id: card.id.clone(),
                name: card.name.clone(),
                payments: sum_tag(ClassificationTag::Payment),
                purchases: sum_tag(ClassificationTag::Purchase),
                current_balance: card.balance,
            }
        })
        .collect()
}
