//! Transaction classification
//!
//! Tags each transaction from its owning account's type and the sign of its
//! amount. The account join is resolved once through an [`AccountIndex`].
//!
//! Rules:
//! - Credit card: negative is a purchase, zero or positive is a payment.
//!   Transfer markers are not consulted, so every card charge stays a purchase.
//! - Loan: a transfer-marked category is a transfer, otherwise the card rules.
//! - Depository: a transfer-marked category is a transfer, negative is a cash
//!   expense, zero or positive is income.
//! - Anything else is tagged other and left out of totals.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CashplanError, CashplanResult};
use crate::models::{
    Account, AccountId, AccountType, ClassificationTag, ClassifiedTransaction, Transaction,
};

/// Derive the tag for a transaction on the given account
pub fn classify<S: AsRef<str>>(
    transaction: &Transaction,
    account: &Account,
    transfer_markers: &[S],
) -> ClassificationTag {
    let by_sign = |negative, non_negative| {
        if transaction.amount.is_negative() {
            negative
        } else {
            non_negative
        }
    };

    match account.account_type {
        AccountType::CreditCard => by_sign(ClassificationTag::Purchase, ClassificationTag::Payment),
        AccountType::Loan if transaction.category_in(transfer_markers) => {
            ClassificationTag::Transfer
        }
        AccountType::Loan => by_sign(ClassificationTag::Purchase, ClassificationTag::Payment),
        AccountType::Depository if transaction.category_in(transfer_markers) => {
            ClassificationTag::Transfer
        }
        AccountType::Depository => by_sign(ClassificationTag::CashExpense, ClassificationTag::Income),
        AccountType::Other => ClassificationTag::Other,
    }
}

/// Accounts keyed by id
#[derive(Debug, Clone, Default)]
pub struct AccountIndex<'a> {
    by_id: HashMap<&'a AccountId, &'a Account>,
}

impl<'a> AccountIndex<'a> {
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            by_id: accounts.iter().map(|a| (&a.id, a)).collect(),
        }
    }

    pub fn get(&self, id: &AccountId) -> Option<&'a Account> {
        self.by_id.get(id).copied()
    }

    /// The transaction's account, or a reference error
    pub fn resolve(&self, transaction: &Transaction) -> CashplanResult<&'a Account> {
        self.get(&transaction.account_id)
            .ok_or_else(|| CashplanError::Reference {
                transaction: transaction.id.to_string(),
                account: transaction.account_id.to_string(),
            })
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Classify every transaction, failing on the first unknown account
pub fn classify_all<'a, S: AsRef<str>>(
    transactions: &'a [Transaction],
    index: &AccountIndex<'a>,
    transfer_markers: &[S],
) -> CashplanResult<Vec<ClassifiedTransaction<'a>>> {
    let classified = transactions
        .iter()
        .map(|transaction| {
            let account = index.resolve(transaction)?;
            Ok(ClassifiedTransaction {
                transaction,
                account,
                tag: classify(transaction, account, transfer_markers),
            })
        })
        .collect::<CashplanResult<Vec<_>>>()?;

    debug!(count = classified.len(), "classified transactions");
    Ok(classified)
}

/// Separate transactions whose account is missing from the index
///
/// Returns `(resolvable, orphans)`. Callers that choose to drop orphans get a
/// warning per dropped transaction in the log.
pub fn split_orphans(
    transactions: Vec<Transaction>,
    index: &AccountIndex<'_>,
) -> (Vec<Transaction>, Vec<Transaction>) {
    let (kept, orphans): (Vec<_>, Vec<_>) = transactions
        .into_iter()
        .partition(|t| index.contains(&t.account_id));

    for orphan in &orphans {
        warn!(
            transaction = %orphan.id,
            account = %orphan.account_id,
            "dropping transaction with unknown account"
        );
    }

    (kept, orphans)
}

/// Count of transactions per tag, in tag order
pub fn tag_counts(classified: &[ClassifiedTransaction<'_>]) -> Vec<(ClassificationTag, usize)> {
    let mut counts: Vec<(ClassificationTag, usize)> = Vec::new();
    for item in classified {
        match counts.iter_mut().find(|(tag, _)| *tag == item.tag) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.tag, 1)),
        }
    }
    counts.sort();
    counts
}
