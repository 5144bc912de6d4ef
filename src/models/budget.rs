//! Budget line items and the per-month budget file format
//!
//! Planned amounts are magnitudes; the group decides whether a line adds to or
//! subtracts from expected cash.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{self, Money};

/// Which side of the budget a line item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemGroup {
    Income,
    Expense,
}

impl LineItemGroup {
    /// Parse a group name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "inc" => Some(Self::Income),
            "expense" | "expenses" | "exp" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for LineItemGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

/// One budgeted category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// Category name, matched case-insensitively against overrides
    pub name: String,

    /// Income or expense
    pub group: LineItemGroup,

    /// Planned amount for the period (a magnitude)
    #[serde(with = "money::decimal")]
    pub planned: Money,

    /// Actual amount reported by the data source, if any
    #[serde(default, with = "money::decimal::option")]
    pub actual: Option<Money>,

    /// Heading the data source files this category under ("Housing", "Food")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category_group: String,
}

impl BudgetLineItem {
    /// Create a line item with no actual amount
    pub fn new(name: impl Into<String>, group: LineItemGroup, planned: Money) -> Self {
        Self {
            name: name.into(),
            group,
            planned,
            actual: None,
            category_group: String::new(),
        }
    }

    /// Shorthand for an income line
    pub fn income(name: impl Into<String>, planned: Money) -> Self {
        Self::new(name, LineItemGroup::Income, planned)
    }

    /// Shorthand for an expense line
    pub fn expense(name: impl Into<String>, planned: Money) -> Self {
        Self::new(name, LineItemGroup::Expense, planned)
    }

    /// Builder-style actual amount
    pub fn with_actual(mut self, actual: Money) -> Self {
        self.actual = Some(actual);
        self
    }

    /// Planned minus actual, when an actual amount is known
    pub fn remaining(&self) -> Option<Money> {
        self.actual.map(|actual| self.planned - actual)
    }

    /// Case-insensitive name comparison
    pub fn same_category(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Validate the line item
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.group == LineItemGroup::Expense && self.planned.is_negative() {
            return Err(BudgetValidationError::NegativeExpense {
                name: self.name.clone(),
                planned: self.planned,
            });
        }

        Ok(())
    }
}

impl fmt::Display for BudgetLineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.group, self.planned)
    }
}

/// Validation errors for budget line items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NegativeExpense { name: String, planned: Money },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget category name cannot be empty"),
            Self::NegativeExpense { name, planned } => write!(
                f,
                "Expense '{}' has negative planned amount {}; amounts are magnitudes",
                name, planned
            ),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// One category entry in a budget file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetFileEntry {
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(with = "money::decimal")]
    pub amount: Money,
}

/// On-disk budget for one month (`budgets/2025-01.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthBudget {
    #[serde(with = "money::decimal", default)]
    pub total_income: Money,
    #[serde(with = "money::decimal", default)]
    pub total_expenses: Money,
    #[serde(default)]
    pub income_categories: Vec<BudgetFileEntry>,
    #[serde(default)]
    pub expense_categories: Vec<BudgetFileEntry>,
}

impl MonthBudget {
    /// Budget used when no file exists for a month
    pub fn default_budget() -> Self {
        Self::from_line_items(&[BudgetLineItem::expense(
            "Credit Card Payments",
            Money::zero(),
        )])
    }

    /// Build a file from line items; totals are recomputed
    pub fn from_line_items(items: &[BudgetLineItem]) -> Self {
        let entry = |item: &BudgetLineItem| BudgetFileEntry {
            name: item.name.clone(),
            group: item.category_group.clone(),
            amount: item.planned,
        };

        let mut budget = Self {
            income_categories: items
                .iter()
                .filter(|i| i.group == LineItemGroup::Income)
                .map(entry)
                .collect(),
            expense_categories: items
                .iter()
                .filter(|i| i.group == LineItemGroup::Expense)
                .map(entry)
                .collect(),
            ..Self::default()
        };
        budget.recompute_totals();
        budget
    }

    /// Flatten into line items, income first
    pub fn to_line_items(&self) -> Vec<BudgetLineItem> {
        let lines = |entries: &[BudgetFileEntry], group: LineItemGroup| {
            entries
                .iter()
                .map(move |e| BudgetLineItem {
                    name: e.name.clone(),
                    group,
                    planned: e.amount,
                    actual: None,
                    category_group: e.group.clone(),
                })
                .collect::<Vec<_>>()
        };

        let mut items = lines(&self.income_categories, LineItemGroup::Income);
        items.extend(lines(&self.expense_categories, LineItemGroup::Expense));
        items
    }

    /// Set the totals from the category lists
    pub fn recompute_totals(&mut self) {
        self.total_income = self.income_categories.iter().map(|e| e.amount).sum();
        self.total_expenses = self.expense_categories.iter().map(|e| e.amount).sum();
    }

    /// Set or add a category's planned amount
    pub fn set(&mut self, name: &str, group: LineItemGroup, amount: Money) {
        let entries = self.entries_mut(group);
        match entries
            .iter_mut()
            .find(|e| e.name.trim().eq_ignore_ascii_case(name.trim()))
        {
            Some(entry) => entry.amount = amount,
            None => entries.push(BudgetFileEntry {
                name: name.trim().to_string(),
                group: String::new(),
                amount,
            }),
        }
        self.recompute_totals();
    }

    /// Remove a category from either list; returns whether anything was removed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.income_categories.len() + self.expense_categories.len();
        let keep = |e: &BudgetFileEntry| !e.name.trim().eq_ignore_ascii_case(name.trim());
        self.income_categories.retain(keep);
        self.expense_categories.retain(keep);
        self.recompute_totals();
        before != self.income_categories.len() + self.expense_categories.len()
    }

    fn entries_mut(&mut self, group: LineItemGroup) -> &mut Vec<BudgetFileEntry> {
        match group {
            LineItemGroup::Income => &mut self.income_categories,
            LineItemGroup::Expense => &mut self.expense_categories,
        }
    }
}
