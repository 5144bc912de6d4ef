//! Debt payoff schedules
//!
//! A projection either pays the debt off, producing a finite schedule, or it
//! never does. The second case is a value, not an error, so callers can show
//! "this payment never clears the balance" next to the scenarios that work.

use serde::{Serialize, Serializer};
use std::fmt;

use super::money::Money;
use super::period::BudgetPeriod;
use crate::error::{CashplanError, CashplanResult};

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayoffScheduleEntry {
    /// 1-based month index
    pub month: u32,
    pub interest: Money,
    pub principal: Money,
    /// interest + principal; the final month pays exactly what is left
    pub payment: Money,
    /// Balance after this month's payment, never below zero
    pub remaining_balance: Money,
}

/// A schedule that reaches zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffSchedule {
    pub starting_balance: Money,
    pub annual_rate: f64,
    pub monthly_payment: Money,
    pub entries: Vec<PayoffScheduleEntry>,
}

impl PayoffSchedule {
    /// Months until the balance is cleared
    pub fn months(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn total_interest(&self) -> Money {
        self.entries.iter().map(|e| e.interest).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.entries.iter().map(|e| e.payment).sum()
    }

    /// Month in which the last payment lands, when the first payment is made
    /// in `first_payment`. `None` for a schedule with no payments.
    pub fn payoff_period(&self, first_payment: &BudgetPeriod) -> Option<BudgetPeriod> {
        self.months()
            .checked_sub(1)
            .map(|offset| first_payment.advance(offset))
    }
}

/// Why a projection never reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NonConvergenceReason {
    /// The payment does not exceed the first month's interest
    InsufficientPayment,
    /// The balance falls, but not to zero within the horizon
    HorizonExceeded,
}

/// Details of a projection that never pays off
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonConvergence {
    pub reason: NonConvergenceReason,
    pub starting_balance: Money,
    pub monthly_payment: Money,
    pub first_month_interest: Money,
    pub horizon_months: u32,
}

impl fmt::Display for NonConvergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            NonConvergenceReason::InsufficientPayment => write!(
                f,
                "a payment of {} does not cover the {} of monthly interest on {}",
                self.monthly_payment, self.first_month_interest, self.starting_balance
            ),
            NonConvergenceReason::HorizonExceeded => write!(
                f,
                "a payment of {} does not clear {} within {} months",
                self.monthly_payment, self.starting_balance, self.horizon_months
            ),
        }
    }
}

/// Result of projecting one payment scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Projection {
    PaidOff(PayoffSchedule),
    NeverPaidOff(NonConvergence),
}

impl Projection {
    pub fn is_paid_off(&self) -> bool {
        matches!(self, Self::PaidOff(_))
    }

    pub fn schedule(&self) -> Option<&PayoffSchedule> {
        match self {
            Self::PaidOff(schedule) => Some(schedule),
            Self::NeverPaidOff(_) => None,
        }
    }

    /// Months to payoff, if it happens
    pub fn months(&self) -> Option<u32> {
        self.schedule().map(PayoffSchedule::months)
    }

    pub fn monthly_payment(&self) -> Money {
        match self {
            Self::PaidOff(schedule) => schedule.monthly_payment,
            Self::NeverPaidOff(nc) => nc.monthly_payment,
        }
    }

    /// Turn a non-converging projection into an error for `?` callers
    pub fn into_schedule(self) -> CashplanResult<PayoffSchedule> {
        match self {
            Self::PaidOff(schedule) => Ok(schedule),
            Self::NeverPaidOff(nc) => Err(CashplanError::NonConvergence {
                balance: nc.starting_balance.to_string(),
                payment: nc.monthly_payment.to_string(),
                horizon_months: nc.horizon_months,
            }),
        }
    }
}

/// Share of the monthly surplus sent to debt, in (0, 1]
///
/// Stored as basis points so fractions can key ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllocationFraction(u32);

impl AllocationFraction {
    /// Create a fraction, rejecting anything outside (0, 1]
    ///
    /// Values that round to zero basis points are rejected too.
    pub fn new(fraction: f64) -> CashplanResult<Self> {
        let invalid = || {
            CashplanError::Validation(format!(
                "Allocation fraction must be in (0, 1] with at least 0.0001, got {}",
                fraction
            ))
        };
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(invalid());
        }
        match (fraction * 10_000.0).round() as u32 {
            0 => Err(invalid()),
            bps => Ok(Self(bps)),
        }
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Portion of `surplus` this fraction allocates, rounded to the cent
    pub fn of(&self, surplus: Money) -> Money {
        surplus.apply_rate(self.value())
    }
}

impl fmt::Display for AllocationFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self.0 as f64 / 100.0;
        if self.0 % 100 == 0 {
            f.pad(&format!("{:.0}%", pct))
        } else {
            f.pad(&format!("{}%", pct))
        }
    }
}

impl Serialize for AllocationFraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(month: u32, interest: i64, principal: i64, remaining: i64) -> PayoffScheduleEntry {
        PayoffScheduleEntry {
            month,
            interest: Money::from_cents(interest),
            principal: Money::from_cents(principal),
            payment: Money::from_cents(interest + principal),
            remaining_balance: Money::from_cents(remaining),
        }
    }

    fn schedule() -> PayoffSchedule {
        PayoffSchedule {
            starting_balance: Money::from_cents(20000),
            annual_rate: 0.12,
            monthly_payment: Money::from_cents(10100),
            entries: vec![entry(1, 200, 9900, 10100), entry(2, 101, 10100, 0)],
        }
    }

    #[test]
    fn test_schedule_totals() {
        let s = schedule();
        assert_eq!(s.months(), 2);
        assert_eq!(s.total_interest(), Money::from_cents(301));
        assert_eq!(s.total_paid(), Money::from_cents(20301));
    }

    #[test]
    fn test_payoff_period() {
        let s = schedule();
        assert_eq!(
            s.payoff_period(&BudgetPeriod::monthly(2025, 12)),
            Some(BudgetPeriod::monthly(2026, 1))
        );

        let empty = PayoffSchedule {
            entries: Vec::new(),
            ..schedule()
        };
        assert_eq!(empty.payoff_period(&BudgetPeriod::monthly(2025, 12)), None);
    }

    #[test]
    fn test_into_schedule_reports_non_convergence() {
        let projection = Projection::NeverPaidOff(NonConvergence {
            reason: NonConvergenceReason::InsufficientPayment,
            starting_balance: Money::from_dollars(1000),
            monthly_payment: Money::from_dollars(15),
            first_month_interest: Money::from_dollars(20),
            horizon_months: 600,
        });
        assert!(!projection.is_paid_off());
        assert_eq!(projection.months(), None);
        let err = projection.into_schedule().unwrap_err();
        assert!(err.is_non_convergence());

        assert!(Projection::PaidOff(schedule()).into_schedule().is_ok());
    }

    #[test]
    fn test_allocation_fraction_bounds() {
        assert!(AllocationFraction::new(0.0).is_err());
        assert!(AllocationFraction::new(1.5).is_err());
        assert!(AllocationFraction::new(f64::NAN).is_err());
        assert!(AllocationFraction::new(1.0).is_ok());
    }

    #[test]
    fn test_allocation_fraction_too_small_to_represent() {
        assert!(AllocationFraction::new(0.00001).unwrap_err().is_validation());
        assert!(AllocationFraction::new(0.00004).is_err());

        let smallest = AllocationFraction::new(0.0001).unwrap();
        assert_eq!(smallest.to_string(), "0.01%");
    }

    #[test]
    fn test_allocation_fraction_ordering_and_display() {
        let quarter = AllocationFraction::new(0.25).unwrap();
        let half = AllocationFraction::new(0.5).unwrap();
        assert!(quarter < half);
        assert_eq!(quarter.to_string(), "25%");
        assert_eq!(AllocationFraction::new(0.125).unwrap().to_string(), "12.5%");
        assert_eq!(half.of(Money::from_dollars(1000)), Money::from_dollars(500));
    }
}
