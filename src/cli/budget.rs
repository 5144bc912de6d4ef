//! Budget CLI commands
//!
//! Manages the per-month budget files whose planned amounts override the
//! external budget in forecasts and payoff projections.

use clap::Subcommand;

use crate::error::CashplanResult;
use crate::models::{BudgetFileEntry, BudgetPeriod, LineItemGroup, MonthBudget};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_money, parse_month};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show the budget in effect for a month
    Show {
        /// Budget month (e.g., "2025-01"); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a category's planned amount
    Set {
        /// Category name
        category: String,
        /// Planned amount (e.g., "400" or "400.00")
        amount: String,
        /// Record the line as income rather than an expense
        #[arg(long)]
        income: bool,
        /// Budget month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a category from a month's budget
    Remove {
        /// Category name
        category: String,
        /// Budget month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Copy one month's budget to another
    Copy {
        /// Source month (YYYY-MM)
        from: String,
        /// Target month (YYYY-MM)
        to: String,
        /// Replace an existing budget for the target month
        #[arg(long)]
        force: bool,
    },

    /// Delete a month's budget file
    Delete {
        /// Budget month (YYYY-MM)
        month: String,
    },

    /// List months with saved budgets
    List,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> CashplanResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Show { month } => {
            let period = month_or_current(month.as_deref())?;
            let loaded = storage.budgets.load_month(&period)?;

            println!("Budget: {}", period.friendly());
            println!("Source: {}", loaded.source.describe());
            print_budget(&loaded.budget);
        }

        BudgetCommands::Set {
            category,
            amount,
            income,
            month,
        } => {
            let period = month_or_current(month.as_deref())?;
            let amount = parse_money(&amount)?;
            let group = if income {
                LineItemGroup::Income
            } else {
                LineItemGroup::Expense
            };

            let budget = service.set_line(&period, &category, group, amount)?;
            println!("{} line '{}' set to {} for {}", group, category, amount, period);
            print_totals(&budget);
        }

        BudgetCommands::Remove { category, month } => {
            let period = month_or_current(month.as_deref())?;
            let budget = service.remove_line(&period, &category)?;
            println!("Removed '{}' from {}", category, period);
            print_totals(&budget);
        }

        BudgetCommands::Copy { from, to, force } => {
            let from = parse_month(&from)?;
            let to = parse_month(&to)?;
            let budget = service.copy(&from, &to, force)?;
            println!("Copied budget from {} to {}", from, to);
            print_totals(&budget);
        }

        BudgetCommands::Delete { month } => {
            let period = parse_month(&month)?;
            storage.budgets.delete_month(&period)?;
            println!("Deleted budget for {}", period);
        }

        BudgetCommands::List => {
            let months = service.list()?;
            if months.is_empty() {
                println!("No saved budgets.");
                println!("Use 'cashplan budget set <category> <amount>' to create one.");
                return Ok(());
            }

            println!("Saved budgets:");
            for month in months {
                println!("  {}  {}", month, month.friendly());
            }
        }
    }

    Ok(())
}

fn month_or_current(month: Option<&str>) -> CashplanResult<BudgetPeriod> {
    match month {
        Some(s) => parse_month(s),
        None => Ok(BudgetPeriod::current_month()),
    }
}

fn print_entries(title: &str, entries: &[BudgetFileEntry]) {
    println!("\n{}", title);
    println!("{}", "-".repeat(44));
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!(
            "  {:28} {:>12}",
            crate::display::truncate(&entry.name, 28),
            entry.amount
        );
    }
}

fn print_budget(budget: &MonthBudget) {
    print_entries("Income", &budget.income_categories);
    print_entries("Expenses", &budget.expense_categories);
    println!();
    print_totals(budget);
}

fn print_totals(budget: &MonthBudget) {
    println!("{:30} {:>12}", "Total income:", budget.total_income);
    println!("{:30} {:>12}", "Total expenses:", budget.total_expenses);
}
