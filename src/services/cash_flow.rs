//! Cash-flow aggregation
//!
//! Buckets classified transactions into contiguous periods and sums the
//! income, expense and card figures for each.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{CashplanError, CashplanResult};
use crate::models::{
    BudgetPeriod, CashFlowPeriod, CashFlowSummary, CategoryBreakdown, ClassificationTag,
    ClassifiedTransaction, Frequency, LineItemGroup, Money,
};

/// The contiguous buckets covering `[start, end]`, clipped to the range
pub fn buckets(
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
) -> CashplanResult<Vec<CashFlowPeriod>> {
    if start > end {
        return Err(CashplanError::Validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }

    let mut periods = Vec::new();
    let mut period = BudgetPeriod::containing(start, frequency, start);
    while period.start_date() <= end {
        let bucket_start = period.start_date().max(start);
        let bucket_end = period.end_date().min(end);
        let next = period.next();
        periods.push(CashFlowPeriod::empty(period, bucket_start, bucket_end));
        period = next;
    }
    Ok(periods)
}

/// Aggregate classified transactions into periods of the given frequency
///
/// Every bucket in the range appears, including ones without transactions.
/// Transactions dated outside the range are ignored.
pub fn aggregate(
    transactions: &[ClassifiedTransaction<'_>],
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
) -> CashplanResult<Vec<CashFlowPeriod>> {
    let mut periods = buckets(start, end, frequency)?;
    let slots: HashMap<BudgetPeriod, usize> = periods
        .iter()
        .enumerate()
        .map(|(i, p)| (p.period.clone(), i))
        .collect();

    let mut skipped = 0usize;
    for item in transactions {
        let date = item.transaction.date;
        if date < start || date > end {
            skipped += 1;
            continue;
        }
        let key = BudgetPeriod::containing(date, frequency, start);
        let Some(&slot) = slots.get(&key) else {
            skipped += 1;
            continue;
        };

        let bucket = &mut periods[slot];
        bucket.transaction_count += 1;
        let magnitude = item.magnitude();
        match item.tag {
            ClassificationTag::Income => bucket.income += item.transaction.amount,
            ClassificationTag::CashExpense => bucket.total_expense += magnitude,
            ClassificationTag::Purchase => {
                bucket.total_expense += magnitude;
                bucket.cc_expense += magnitude;
            }
            ClassificationTag::Payment => bucket.cc_payments += magnitude,
            ClassificationTag::Transfer | ClassificationTag::Other => {}
        }
    }

    debug!(
        periods = periods.len(),
        %frequency,
        skipped,
        "aggregated cash flow"
    );
    Ok(periods)
}

/// Totals and per-period means; an empty sequence gives an all-zero summary
pub fn summary_statistics(periods: &[CashFlowPeriod]) -> CashFlowSummary {
    if periods.is_empty() {
        return CashFlowSummary::default();
    }

    let count = periods.len();
    let total_income: Money = periods.iter().map(|p| p.income).sum();
    let total_expense: Money = periods.iter().map(|p| p.total_expense).sum();
    let total_cc_expense: Money = periods.iter().map(|p| p.cc_expense).sum();
    let total_cash_balance: Money = periods.iter().map(|p| p.cash_balance()).sum();

    let cc_expense_percentage = if total_expense.is_zero() {
        0.0
    } else {
        total_cc_expense.cents() as f64 / total_expense.cents() as f64 * 100.0
    };

    CashFlowSummary {
        period_count: count,
        total_income,
        total_expense,
        total_cc_expense,
        total_cc_payments: periods.iter().map(|p| p.cc_payments).sum(),
        total_cash_balance,
        total_true_cash_remaining: periods.iter().map(|p| p.true_cash_remaining()).sum(),
        avg_income: Money::mean(total_income, count),
        avg_expense: Money::mean(total_expense, count),
        avg_cash_balance: Money::mean(total_cash_balance, count),
        cc_expense_percentage,
    }
}

/// Per-category totals split by card and cash, largest first
///
/// The expense side counts purchases and cash expenses; the income side
/// counts income. Blank categories are grouped under "Uncategorized".
pub fn category_breakdown(
    transactions: &[ClassifiedTransaction<'_>],
    group: LineItemGroup,
) -> Vec<CategoryBreakdown> {
    let mut by_category: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();

    for item in transactions {
        let counted = match group {
            LineItemGroup::Expense => item.tag.is_expense(),
            LineItemGroup::Income => item.tag == ClassificationTag::Income,
        };
        if !counted {
            continue;
        }

        let name = match item.transaction.category.trim() {
            "" => "Uncategorized",
            name => name,
        };
        let entry = by_category
            .entry(name.to_string())
            .or_insert_with(|| CategoryBreakdown::new(name));

        // same split as the period totals: every purchase is credit spending
        let magnitude = item.magnitude();
        entry.actual += magnitude;
        if item.tag == ClassificationTag::Purchase {
            entry.cc_amount += magnitude;
        } else {
            entry.cash_amount += magnitude;
        }
    }

    let mut rows: Vec<_> = by_category.into_values().collect();
    rows.sort_by(|a, b| b.actual.cmp(&a.actual).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Running total of card debt added per period (purchases minus payments)
///
/// A rising line means card spending is outpacing payments.
pub fn cumulative_net_debt(periods: &[CashFlowPeriod]) -> Vec<(BudgetPeriod, Money)> {
    periods
        .iter()
        .scan(Money::zero(), |running, p| {
            *running -= p.net_card_change();
            Some((p.period.clone(), *running))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Transaction};
    use crate::services::classifier::{classify_all, AccountIndex};

    const MARKERS: [&str; 1] = ["Transfer"];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("visa", "Visa", AccountType::CreditCard, Money::zero()),
            Account::new("chk", "Checking", AccountType::Depository, Money::zero()),
        ]
    }

    fn txn(id: &str, account: &str, d: NaiveDate, dollars: i64, category: &str) -> Transaction {
        Transaction::new(id, account, d, Money::from_dollars(dollars)).with_category(category)
    }

    fn q1_transactions() -> Vec<Transaction> {
        vec![
            txn("t1", "chk", date(2025, 1, 1), 3000, "Paycheck"),
            txn("t2", "chk", date(2025, 1, 5), -1200, "Rent"),
            txn("t3", "visa", date(2025, 1, 9), -300, "Groceries"),
            txn("t4", "visa", date(2025, 1, 20), 250, "Payment"),
            txn("t5", "chk", date(2025, 1, 20), -250, "Transfer"),
            // February is left empty on purpose
            txn("t6", "chk", date(2025, 3, 1), 3000, "Paycheck"),
            txn("t7", "visa", date(2025, 3, 2), -100, "Groceries"),
            txn("t8", "chk", date(2025, 3, 3), -50, "Groceries"),
        ]
    }

    #[test]
    fn test_monthly_aggregation() {
        let accounts = accounts();
        let index = AccountIndex::new(&accounts);
        let transactions = q1_transactions();
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();

        let periods =
            aggregate(&classified, date(2025, 1, 1), date(2025, 3, 31), Frequency::Monthly)
                .unwrap();
        assert_eq!(periods.len(), 3);

        let jan = &periods[0];
        assert_eq!(jan.period, BudgetPeriod::monthly(2025, 1));
        assert_eq!(jan.income, Money::from_dollars(3000));
        assert_eq!(jan.total_expense, Money::from_dollars(1500));
        assert_eq!(jan.cc_expense, Money::from_dollars(300));
        assert_eq!(jan.cc_payments, Money::from_dollars(250));
        assert_eq!(jan.cash_balance(), Money::from_dollars(1800));
        assert_eq!(jan.true_cash_remaining(), Money::from_dollars(1550));
        assert_eq!(jan.transaction_count, 5);

        let feb = &periods[1];
        assert!(feb.is_empty());
        assert_eq!(feb.income, Money::zero());
        assert_eq!(feb.cash_balance(), Money::zero());

        for p in &periods {
            assert_eq!(p.cash_balance(), p.income - (p.total_expense - p.cc_expense));
        }
    }

    #[test]
    fn test_no_transactions_still_yields_contiguous_periods() {
        let periods =
            aggregate(&[], date(2025, 1, 15), date(2025, 6, 2), Frequency::Monthly).unwrap();
        assert_eq!(periods.len(), 6);
        assert_eq!(periods[0].start, date(2025, 1, 15));
        assert_eq!(periods[5].end, date(2025, 6, 2));
        for pair in periods.windows(2) {
            assert_eq!(pair[0].period.next(), pair[1].period);
        }
        assert!(periods.iter().all(|p| p.income.is_zero() && p.total_expense.is_zero()));
    }

    #[test]
    fn test_weekly_and_biweekly_buckets() {
        // 2025-01-01 is a Wednesday
        let weekly = buckets(date(2025, 1, 1), date(2025, 1, 31), Frequency::Weekly).unwrap();
        assert_eq!(weekly.len(), 5);
        assert_eq!(weekly[0].start, date(2025, 1, 1));
        assert_eq!(weekly[0].end, date(2025, 1, 5));
        assert_eq!(weekly[1].start, date(2025, 1, 6));

        let biweekly = buckets(date(2025, 1, 1), date(2025, 1, 31), Frequency::BiWeekly).unwrap();
        assert_eq!(biweekly.len(), 3);
        assert_eq!(biweekly[1].start, date(2025, 1, 15));
        assert_eq!(biweekly[2].end, date(2025, 1, 31));
    }

    #[test]
    fn test_transactions_outside_range_ignored() {
        let accounts = accounts();
        let index = AccountIndex::new(&accounts);
        let transactions = q1_transactions();
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();

        let periods =
            aggregate(&classified, date(2025, 3, 1), date(2025, 3, 31), Frequency::Monthly)
                .unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].transaction_count, 3);
    }

    #[test]
    fn test_inverted_range_is_validation_error() {
        let err = aggregate(&[], date(2025, 2, 1), date(2025, 1, 1), Frequency::Monthly)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_summary_statistics() {
        let accounts = accounts();
        let index = AccountIndex::new(&accounts);
        let transactions = q1_transactions();
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();
        let periods =
            aggregate(&classified, date(2025, 1, 1), date(2025, 3, 31), Frequency::Monthly)
                .unwrap();

        let summary = summary_statistics(&periods);
        assert_eq!(summary.period_count, 3);
        assert_eq!(summary.total_income, Money::from_dollars(6000));
        assert_eq!(summary.total_expense, Money::from_dollars(1650));
        assert_eq!(summary.avg_income, Money::from_dollars(2000));
        assert_eq!(summary.net_income(), Money::from_dollars(4350));
        // 400 of 1650 on cards
        assert!((summary.cc_expense_percentage - 24.2424).abs() < 0.001);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = summary_statistics(&[]);
        assert_eq!(summary, CashFlowSummary::default());
        assert_eq!(summary.avg_cash_balance, Money::zero());
    }

    #[test]
    fn test_category_breakdown() {
        let accounts = accounts();
        let index = AccountIndex::new(&accounts);
        let transactions = q1_transactions();
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();

        let expenses = category_breakdown(&classified, LineItemGroup::Expense);
        assert_eq!(expenses[0].category, "Rent");
        let groceries = expenses.iter().find(|b| b.category == "Groceries").unwrap();
        assert_eq!(groceries.actual, Money::from_dollars(450));
        assert_eq!(groceries.cc_amount, Money::from_dollars(400));
        assert_eq!(groceries.cash_amount, Money::from_dollars(50));

        let income = category_breakdown(&classified, LineItemGroup::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].actual, Money::from_dollars(6000));
    }

    #[test]
    fn test_loan_charges_split_like_period_totals() {
        let mut accounts = accounts();
        accounts.push(Account::new("car", "Car Loan", AccountType::Loan, Money::zero()));
        let index = AccountIndex::new(&accounts);
        let transactions = vec![
            txn("l1", "car", date(2025, 1, 10), -75, "Fees"),
            txn("l2", "chk", date(2025, 1, 11), -25, "Fees"),
        ];
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();

        let periods = aggregate(
            &classified,
            date(2025, 1, 1),
            date(2025, 1, 31),
            Frequency::Monthly,
        )
        .unwrap();
        let fees = &category_breakdown(&classified, LineItemGroup::Expense)[0];

        assert_eq!(fees.cc_amount, periods[0].cc_expense);
        assert_eq!(fees.cc_amount, Money::from_dollars(75));
        assert_eq!(fees.cash_amount, Money::from_dollars(25));
    }

    #[test]
    fn test_cumulative_net_debt() {
        let accounts = accounts();
        let index = AccountIndex::new(&accounts);
        let transactions = q1_transactions();
        let classified = classify_all(&transactions, &index, &MARKERS).unwrap();
        let periods =
            aggregate(&classified, date(2025, 1, 1), date(2025, 3, 31), Frequency::Monthly)
                .unwrap();

        let running: Vec<Money> = cumulative_net_debt(&periods).into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            running,
            vec![Money::from_dollars(50), Money::from_dollars(50), Money::from_dollars(150)]
        );
    }
}
