//! Debt Payoff Report
//!
//! Compares payoff scenarios side by side. Scenarios that never clear the
//! balance stay in the table, marked as such.

use serde::Serialize;
use std::io::Write;
use tabled::settings::{object::Columns, Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::cash_flow::decimal;
use crate::config::DebtKind;
use crate::error::CashplanResult;
use crate::models::{AllocationFraction, BudgetPeriod, Money, PayoffSchedule, Projection};
use crate::services::payoff;

/// Inputs shared by every scenario in a report
#[derive(Debug, Clone, Serialize)]
pub struct PayoffParams {
    pub kind: DebtKind,
    pub starting_balance: Money,
    pub annual_rate: f64,
    /// Regular budgeted payment added to each scenario (loans)
    pub base_payment: Money,
    pub horizon_months: u32,
    /// Month of the first payment
    pub first_payment: BudgetPeriod,
}

/// One payment scenario
#[derive(Debug, Clone, Serialize)]
pub struct PayoffScenario {
    /// Share of the surplus; `None` for an explicit payment
    pub fraction: Option<AllocationFraction>,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayoffReport {
    pub params: PayoffParams,
    pub surplus: Option<Money>,
    pub scenarios: Vec<PayoffScenario>,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Allocation")]
    allocation: String,
    #[tabled(rename = "Monthly Payment")]
    payment: String,
    #[tabled(rename = "Months")]
    months: String,
    #[tabled(rename = "Paid Off")]
    paid_off: String,
    #[tabled(rename = "Total Interest")]
    interest: String,
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl PayoffReport {
    /// One scenario per allocation fraction of the monthly surplus
    pub fn generate_scenarios(
        params: PayoffParams,
        surplus: Money,
        fractions: &[AllocationFraction],
    ) -> CashplanResult<Self> {
        let projections = match params.kind {
            DebtKind::Loan => payoff::project_loan_multi(
                params.starting_balance,
                params.annual_rate,
                params.base_payment,
                surplus,
                fractions,
                params.horizon_months,
            )?,
            DebtKind::CreditCard => payoff::project_multi(
                params.starting_balance,
                params.annual_rate,
                surplus,
                fractions,
                params.horizon_months,
            )?,
        };

        Ok(Self {
            params,
            surplus: Some(surplus),
            scenarios: projections
                .into_iter()
                .map(|(fraction, projection)| PayoffScenario {
                    fraction: Some(fraction),
                    projection,
                })
                .collect(),
        })
    }

    /// A single scenario at an explicit monthly payment
    pub fn generate_single(params: PayoffParams, monthly_payment: Money) -> CashplanResult<Self> {
        let projection = payoff::project(
            params.starting_balance,
            params.annual_rate,
            monthly_payment,
            params.horizon_months,
        )?;
        Ok(Self {
            params,
            surplus: None,
            scenarios: vec![PayoffScenario {
                fraction: None,
                projection,
            }],
        })
    }

    fn scenario_row(&self, scenario: &PayoffScenario) -> ScenarioRow {
        let allocation = scenario
            .fraction
            .map(|f| f.to_string())
            .unwrap_or_else(|| "fixed".to_string());
        let payment = scenario.projection.monthly_payment().to_string();

        match &scenario.projection {
            Projection::PaidOff(schedule) => ScenarioRow {
                allocation,
                payment,
                months: schedule.months().to_string(),
                paid_off: schedule
                    .payoff_period(&self.params.first_payment)
                    .map(|p| p.friendly())
                    .unwrap_or_else(|| "now".to_string()),
                interest: schedule.total_interest().to_string(),
            },
            Projection::NeverPaidOff(_) => ScenarioRow {
                allocation,
                payment,
                months: format!("{}+", self.params.horizon_months),
                paid_off: "never".to_string(),
                interest: "-".to_string(),
            },
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Debt Payoff Projection ({}): {} at {:.2}% APR\n",
            self.params.kind,
            self.params.starting_balance,
            self.params.annual_rate * 100.0
        ));
        if let Some(surplus) = self.surplus {
            output.push_str(&format!("Monthly surplus: {}\n", surplus));
        }
        if self.params.base_payment.is_positive() {
            output.push_str(&format!(
                "Budgeted base payment: {}\n",
                self.params.base_payment
            ));
        }
        output.push('\n');

        let rows: Vec<ScenarioRow> = self.scenarios.iter().map(|s| self.scenario_row(s)).collect();
        let mut table = Table::new(rows);
        table
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
        output.push_str(&table.to_string());
        output.push('\n');

        for scenario in &self.scenarios {
            if let Projection::NeverPaidOff(nc) = &scenario.projection {
                output.push_str(&format!("\nNever paid off: {}", nc));
            }
        }

        if let [PayoffScenario {
            projection: Projection::PaidOff(schedule),
            ..
        }] = self.scenarios.as_slice()
        {
            if !schedule.entries.is_empty() {
                output.push('\n');
                output.push_str(&format_schedule(schedule));
            }
        }

        output.push('\n');
        output
    }

    /// Export every converging schedule to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> CashplanResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Allocation",
            "Monthly Payment",
            "Month",
            "Interest",
            "Principal",
            "Payment",
            "Remaining Balance",
        ])?;

        for scenario in &self.scenarios {
            let Some(schedule) = scenario.projection.schedule() else {
                continue;
            };
            let allocation = scenario
                .fraction
                .map(|f| format!("{:.4}", f.value()))
                .unwrap_or_default();
            for entry in &schedule.entries {
                csv.write_record([
                    allocation.clone(),
                    decimal(schedule.monthly_payment),
                    entry.month.to_string(),
                    decimal(entry.interest),
                    decimal(entry.principal),
                    decimal(entry.payment),
                    decimal(entry.remaining_balance),
                ])?;
            }
        }

        csv.flush()?;
        Ok(())
    }
}

/// Month-by-month table for one schedule
pub fn format_schedule(schedule: &PayoffSchedule) -> String {
    let rows: Vec<ScheduleRow> = schedule
        .entries
        .iter()
        .map(|e| ScheduleRow {
            month: e.month,
            interest: e.interest.to_string(),
            principal: e.principal.to_string(),
            payment: e.payment.to_string(),
            balance: e.remaining_balance.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(..)).with(Alignment::right()));

    format!(
        "{}\nTotal paid: {}  Total interest: {}\n",
        table,
        schedule.total_paid(),
        schedule.total_interest()
    )
}
