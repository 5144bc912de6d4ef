//! Debt payoff projection
//!
//! Simple monthly compounding: each month the balance accrues
//! `balance * annual_rate / 12` (rounded to the cent), then the payment is
//! applied. The final month pays exactly what is left.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{CashplanError, CashplanResult};
use crate::models::{
    AllocationFraction, Money, NonConvergence, NonConvergenceReason, PayoffSchedule,
    PayoffScheduleEntry, Projection,
};

fn check_inputs(annual_rate: f64, monthly_payment: Money) -> CashplanResult<()> {
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(CashplanError::Validation(format!(
            "Annual rate must be a non-negative number, got {}",
            annual_rate
        )));
    }
    if monthly_payment.is_negative() {
        return Err(CashplanError::Validation(format!(
            "Monthly payment cannot be negative, got {}",
            monthly_payment
        )));
    }
    Ok(())
}

/// Project the payoff of `starting_balance` at a fixed monthly payment
///
/// A payment that does not exceed the first month's interest never reduces
/// the balance and is reported without iterating. Otherwise the schedule runs
/// until the balance reaches zero or `horizon_months` is exceeded.
pub fn project(
    starting_balance: Money,
    annual_rate: f64,
    monthly_payment: Money,
    horizon_months: u32,
) -> CashplanResult<Projection> {
    check_inputs(annual_rate, monthly_payment)?;

    let monthly_rate = annual_rate / 12.0;
    let mut schedule = PayoffSchedule {
        starting_balance,
        annual_rate,
        monthly_payment,
        entries: Vec::new(),
    };

    if !starting_balance.is_positive() {
        return Ok(Projection::PaidOff(schedule));
    }

    let first_month_interest = starting_balance.apply_rate(monthly_rate);
    let never = |reason| {
        Projection::NeverPaidOff(NonConvergence {
            reason,
            starting_balance,
            monthly_payment,
            first_month_interest,
            horizon_months,
        })
    };

    if monthly_payment <= first_month_interest {
        debug!(%starting_balance, %monthly_payment, %first_month_interest, "payment does not cover interest");
        return Ok(never(NonConvergenceReason::InsufficientPayment));
    }

    let mut balance = starting_balance;
    let mut month = 0u32;
    while balance.is_positive() {
        if month == horizon_months {
            debug!(%starting_balance, %monthly_payment, horizon_months, "horizon exceeded");
            return Ok(never(NonConvergenceReason::HorizonExceeded));
        }
        month += 1;

        let interest = balance.apply_rate(monthly_rate);
        let owed = balance + interest;
        let payment = monthly_payment.min(owed);
        balance = owed - payment;

        schedule.entries.push(PayoffScheduleEntry {
            month,
            interest,
            principal: payment - interest,
            payment,
            remaining_balance: balance,
        });
    }

    Ok(Projection::PaidOff(schedule))
}

/// Project once per allocation fraction, paying `surplus * fraction` monthly
pub fn project_multi(
    starting_balance: Money,
    annual_rate: f64,
    surplus: Money,
    fractions: &[AllocationFraction],
    horizon_months: u32,
) -> CashplanResult<BTreeMap<AllocationFraction, Projection>> {
    project_loan_multi(
        starting_balance,
        annual_rate,
        Money::zero(),
        surplus,
        fractions,
        horizon_months,
    )
}

/// Loan variant: `base_payment + surplus * fraction` monthly
pub fn project_loan_multi(
    starting_balance: Money,
    annual_rate: f64,
    base_payment: Money,
    surplus: Money,
    fractions: &[AllocationFraction],
    horizon_months: u32,
) -> CashplanResult<BTreeMap<AllocationFraction, Projection>> {
    if surplus.is_negative() {
        return Err(CashplanError::Validation(format!(
            "Monthly surplus cannot be negative, got {}",
            surplus
        )));
    }

    let mut projections = BTreeMap::new();
    for fraction in fractions {
        let payment = base_payment + fraction.of(surplus);
        let projection = project(starting_balance, annual_rate, payment, horizon_months)?;
        if let Projection::NeverPaidOff(nc) = &projection {
            warn!(fraction = %fraction, "{}", nc);
        }
        projections.insert(*fraction, projection);
    }

    debug!(
        scenarios = projections.len(),
        paid_off = projections.values().filter(|p| p.is_paid_off()).count(),
        "projected payoff scenarios"
    );
    Ok(projections)
}
