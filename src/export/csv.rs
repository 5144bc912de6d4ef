//! CSV export of tagged transactions

use std::io::Write;

use crate::error::CashplanResult;
use crate::models::ClassifiedTransaction;

/// Write one row per transaction with its account and tag
pub fn export_transactions_csv<W: Write>(
    transactions: &[ClassifiedTransaction<'_>],
    writer: W,
) -> CashplanResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Account", "Account Type", "Category", "Amount", "Tag"])?;

    for item in transactions {
        let txn = item.transaction;
        csv.write_record([
            txn.id.to_string(),
            txn.date.to_string(),
            item.account.name.clone(),
            item.account.account_type.to_string(),
            txn.category.clone(),
            format!("{:.2}", txn.amount.to_decimal()),
            item.tag.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
