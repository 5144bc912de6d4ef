//! Debt payoff projection command

use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use crate::config::{DebtKind, Settings};
use crate::error::{CashplanError, CashplanResult};
use crate::models::{Account, AccountType, Money};
use crate::reports::{ForecastReport, PayoffParams, PayoffReport};
use crate::services::budget::planned_for;
use crate::services::card_summaries;
use crate::storage::Storage;

use super::{create_output, parse_money, AnalysisInput, SnapshotArgs};

/// Arguments for `cashplan payoff`
#[derive(Args, Debug)]
pub struct PayoffArgs {
    /// Month whose forecast surplus funds the payments (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Which debt to project: credit-card or loan
    #[arg(short, long, default_value = "credit-card")]
    pub debt: String,

    /// Project a single fixed monthly payment instead of surplus fractions
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Export the schedules to CSV instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Why no projection was produced
#[derive(Debug, Clone)]
pub enum PayoffOutcome {
    Projected(PayoffReport),
    NoDebt(DebtKind),
    NoSurplus(Money),
}

/// Total owed on every account of the given kind
pub fn debt_balance(accounts: &[Account], kind: DebtKind) -> Money {
    match kind {
        DebtKind::CreditCard => card_summaries(accounts).total_debt,
        DebtKind::Loan => accounts
            .iter()
            .filter(|a| a.account_type == AccountType::Loan)
            .map(Account::debt)
            .sum(),
    }
}

/// Project payoff of one kind of debt from a month's forecast
///
/// With an explicit payment a single schedule is built. Otherwise every
/// configured fraction of the forecast's expected end-of-month cash is tried.
pub fn build_payoff(
    input: &AnalysisInput,
    forecast: &ForecastReport,
    kind: DebtKind,
    payment: Option<Money>,
) -> CashplanResult<PayoffOutcome> {
    let balance = debt_balance(&input.snapshot.accounts, kind);
    if !balance.is_positive() {
        return Ok(PayoffOutcome::NoDebt(kind));
    }

    let base_payment = match kind {
        DebtKind::Loan => planned_for(&forecast.line_items, &input.debt.loan_category)
            .unwrap_or_default(),
        DebtKind::CreditCard => Money::zero(),
    };

    let params = PayoffParams {
        kind,
        starting_balance: balance,
        annual_rate: input.debt.rate_for(kind),
        base_payment,
        horizon_months: input.debt.horizon_months,
        first_payment: forecast.period.next(),
    };

    if let Some(payment) = payment {
        return Ok(PayoffOutcome::Projected(PayoffReport::generate_single(
            params, payment,
        )?));
    }

    let surplus = forecast.result.expected_end_cash;
    if !surplus.is_positive() {
        warn!(%surplus, "no surplus to allocate to debt");
        return Ok(PayoffOutcome::NoSurplus(surplus));
    }

    let report = PayoffReport::generate_scenarios(params, surplus, &input.debt.fractions()?)?;
    Ok(PayoffOutcome::Projected(report))
}

/// Handle the payoff command
pub fn handle_payoff_command(
    storage: &Storage,
    settings: &Settings,
    args: PayoffArgs,
) -> CashplanResult<()> {
    let kind = DebtKind::parse(&args.debt).ok_or_else(|| {
        CashplanError::Validation(format!(
            "Unknown debt kind: {}. Use credit-card or loan",
            args.debt
        ))
    })?;
    let payment = args.payment.as_deref().map(parse_money).transpose()?;

    let input = AnalysisInput::load(storage, settings, &args.source)?;
    let period = input.month(args.month.as_deref())?;
    let forecast = input.forecast(storage, &period, None)?;

    let report = match build_payoff(&input, &forecast, kind, payment)? {
        PayoffOutcome::Projected(report) => report,
        PayoffOutcome::NoDebt(kind) => {
            println!("No {} debt to pay off.", kind);
            return Ok(());
        }
        PayoffOutcome::NoSurplus(surplus) => {
            return Err(CashplanError::Validation(format!(
                "Expected end-of-month cash for {} is {}; there is no surplus to put toward debt. \
                 Pass --payment to project a fixed payment.",
                period.friendly(),
                surplus
            )));
        }
    };

    if let Some(path) = args.output {
        report.export_csv(create_output(&path)?)?;
        println!("Payoff schedules exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_balance_by_kind() {
        let accounts = vec![
            Account::new("visa", "Visa", AccountType::CreditCard, Money::from_dollars(-900)),
            Account::new("amex", "Amex", AccountType::CreditCard, Money::from_dollars(-100)),
            Account::new("car", "Car Loan", AccountType::Loan, Money::from_dollars(-5000)),
            Account::new("chk", "Checking", AccountType::Depository, Money::from_dollars(800)),
        ];

        assert_eq!(
            debt_balance(&accounts, DebtKind::CreditCard),
            Money::from_dollars(1000)
        );
        assert_eq!(debt_balance(&accounts, DebtKind::Loan), Money::from_dollars(5000));
    }
}
