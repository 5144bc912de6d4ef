//! Budget service
//!
//! Combines the budget reported by the data source with locally saved month
//! budgets, and edits those local files.

use tracing::debug;

use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetLineItem, BudgetPeriod, LineItemGroup, MonthBudget, Money};
use crate::storage::{BudgetSource, Storage};

/// Overlay local planned amounts onto the external line items
///
/// Categories are matched by name, ignoring case. A local line replaces the
/// planned amount (and group) of its external match but keeps the external
/// actual amount; local lines with no match are appended.
pub fn merge_line_items(
    external: &[BudgetLineItem],
    local: &[BudgetLineItem],
) -> Vec<BudgetLineItem> {
    let mut merged: Vec<BudgetLineItem> = external.to_vec();

    for line in local {
        match merged.iter_mut().find(|m| m.same_category(&line.name)) {
            Some(existing) => {
                existing.planned = line.planned;
                existing.group = line.group;
                if !line.category_group.is_empty() {
                    existing.category_group = line.category_group.clone();
                }
            }
            None => merged.push(line.clone()),
        }
    }

    merged
}

/// Planned amount for a category, if the budget has one
pub fn planned_for(items: &[BudgetLineItem], name: &str) -> Option<Money> {
    items
        .iter()
        .find(|i| i.same_category(name))
        .map(|i| i.planned)
}

/// Service for month budgets
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The line items in effect for a month
    ///
    /// A saved file for the month (or the custom budget) overrides the
    /// external lines; with neither, the external lines are used as they are.
    pub fn effective_line_items(
        &self,
        period: &BudgetPeriod,
        external: &[BudgetLineItem],
    ) -> CashplanResult<Vec<BudgetLineItem>> {
        Ok(self.effective_budget(period, external)?.0)
    }

    /// Effective line items plus a description of where they came from
    pub fn effective_budget(
        &self,
        period: &BudgetPeriod,
        external: &[BudgetLineItem],
    ) -> CashplanResult<(Vec<BudgetLineItem>, String)> {
        let loaded = self.storage.budgets.load_month(period)?;
        let (items, source) = match loaded.source {
            BudgetSource::Default if !external.is_empty() => {
                (external.to_vec(), "snapshot".to_string())
            }
            source => (
                merge_line_items(external, &loaded.budget.to_line_items()),
                source.describe(),
            ),
        };
        debug!(month = %period, source = %source, lines = items.len(), "budget lines");
        Ok((items, source))
    }

    /// Set a category's planned amount in a month's file
    pub fn set_line(
        &self,
        period: &BudgetPeriod,
        name: &str,
        group: LineItemGroup,
        amount: Money,
    ) -> CashplanResult<MonthBudget> {
        let line = BudgetLineItem::new(name, group, amount);
        line.validate()
            .map_err(|e| CashplanError::Validation(e.to_string()))?;

        // a new month file holds only the lines the user sets
        let loaded = self.storage.budgets.load_month(period)?;
        let mut budget = match loaded.source {
            BudgetSource::Default => MonthBudget::default(),
            _ => loaded.budget,
        };
        budget.set(name, group, amount);
        self.storage.budgets.save_month(period, &budget)?;
        Ok(budget)
    }

    /// Remove a category from a month's file
    pub fn remove_line(&self, period: &BudgetPeriod, name: &str) -> CashplanResult<MonthBudget> {
        let mut budget = self
            .storage
            .budgets
            .get_month(period)?
            .ok_or_else(|| CashplanError::budget_not_found(period.to_string()))?;

        if !budget.remove(name) {
            return Err(CashplanError::category_not_found(name));
        }
        self.storage.budgets.save_month(period, &budget)?;
        Ok(budget)
    }

    /// Copy a month's budget to another month
    pub fn copy(
        &self,
        from: &BudgetPeriod,
        to: &BudgetPeriod,
        overwrite: bool,
    ) -> CashplanResult<MonthBudget> {
        self.storage.budgets.copy_month(from, to, overwrite)
    }

    /// Months with saved budgets
    pub fn list(&self) -> CashplanResult<Vec<BudgetPeriod>> {
        self.storage.budgets.list_months()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashplanPaths;
    use tempfile::TempDir;

    fn external() -> Vec<BudgetLineItem> {
        vec![
            BudgetLineItem::income("Paycheck", Money::from_dollars(2000))
                .with_actual(Money::from_dollars(2000)),
            BudgetLineItem::expense("Groceries", Money::from_dollars(400))
                .with_actual(Money::from_dollars(250)),
        ]
    }

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(CashplanPaths::with_base_dir(temp_dir.path().to_path_buf()));
        (temp_dir, storage)
    }

    #[test]
    fn test_merge_overrides_planned_and_keeps_actual() {
        let local = vec![
            BudgetLineItem::expense("groceries", Money::from_dollars(500)),
            BudgetLineItem::expense("Gym", Money::from_dollars(40)),
        ];

        let merged = merge_line_items(&external(), &local);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].name, "Groceries");
        assert_eq!(merged[1].planned, Money::from_dollars(500));
        assert_eq!(merged[1].actual, Some(Money::from_dollars(250)));
        assert_eq!(merged[2].name, "Gym");
        assert_eq!(merged[2].actual, None);
    }

    #[test]
    fn test_merge_with_no_local_lines() {
        assert_eq!(merge_line_items(&external(), &[]), external());
    }

    #[test]
    fn test_planned_for() {
        assert_eq!(
            planned_for(&external(), "GROCERIES"),
            Some(Money::from_dollars(400))
        );
        assert_eq!(planned_for(&external(), "Loan Repayment"), None);
    }

    #[test]
    fn test_effective_lines_without_local_files() {
        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);

        assert_eq!(service.effective_line_items(&jan, &external()).unwrap(), external());

        // no external data either: the default budget applies
        let lines = service.effective_line_items(&jan, &[]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Credit Card Payments");
    }

    #[test]
    fn test_effective_budget_names_its_source() {
        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);

        let (_, source) = service.effective_budget(&jan, &external()).unwrap();
        assert_eq!(source, "snapshot");

        let (_, source) = service.effective_budget(&jan, &[]).unwrap();
        assert_eq!(source, "built-in default");

        service
            .set_line(&jan, "Rent", LineItemGroup::Expense, Money::from_dollars(1200))
            .unwrap();
        let (_, source) = service.effective_budget(&jan, &external()).unwrap();
        assert!(source.ends_with("2025-01.json"));
    }

    #[test]
    fn test_set_line_overrides_external() {
        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);

        service
            .set_line(&jan, "Groceries", LineItemGroup::Expense, Money::from_dollars(350))
            .unwrap();

        let lines = service.effective_line_items(&jan, &external()).unwrap();
        let groceries = lines.iter().find(|l| l.name == "Groceries").unwrap();
        assert_eq!(groceries.planned, Money::from_dollars(350));
        assert_eq!(groceries.actual, Some(Money::from_dollars(250)));
        assert_eq!(lines.len(), external().len());
        assert!(!lines.iter().any(|l| l.name == "Credit Card Payments"));
    }

    #[test]
    fn test_new_expense_lowers_end_cash_by_its_amount() {
        use crate::services::forecast::forecast;

        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);
        let snapshot_budget = vec![
            BudgetLineItem::income("Paycheck", Money::from_dollars(3000)),
            BudgetLineItem::expense("Credit Card Payments", Money::from_dollars(500)),
        ];

        let before = forecast(
            Money::zero(),
            &service.effective_line_items(&jan, &snapshot_budget).unwrap(),
        )
        .unwrap();
        service
            .set_line(&jan, "Gym", LineItemGroup::Expense, Money::from_dollars(40))
            .unwrap();
        let after = forecast(
            Money::zero(),
            &service.effective_line_items(&jan, &snapshot_budget).unwrap(),
        )
        .unwrap();

        assert_eq!(before.expected_end_cash, Money::from_dollars(2500));
        assert_eq!(
            after.expected_end_cash,
            before.expected_end_cash - Money::from_dollars(40)
        );
    }

    #[test]
    fn test_set_line_starts_from_custom_budget() {
        let (dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);

        let mut custom = MonthBudget::default();
        custom.set("Side gig", LineItemGroup::Income, Money::from_dollars(100));
        crate::storage::write_json_atomic(dir.path().join("custom_budget.json"), &custom).unwrap();

        let budget = service
            .set_line(&jan, "Gym", LineItemGroup::Expense, Money::from_dollars(40))
            .unwrap();
        assert_eq!(budget.total_income, Money::from_dollars(100));
        assert_eq!(budget.total_expenses, Money::from_dollars(40));
    }

    #[test]
    fn test_set_line_rejects_negative_expense() {
        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let err = service
            .set_line(
                &BudgetPeriod::monthly(2025, 1),
                "Rent",
                LineItemGroup::Expense,
                Money::from_dollars(-1),
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_remove_line() {
        let (_dir, storage) = setup();
        let service = BudgetService::new(&storage);
        let jan = BudgetPeriod::monthly(2025, 1);

        assert!(service.remove_line(&jan, "Rent").unwrap_err().is_not_found());

        service
            .set_line(&jan, "Rent", LineItemGroup::Expense, Money::from_dollars(1200))
            .unwrap();
        let budget = service.remove_line(&jan, "rent").unwrap();
        assert_eq!(budget.total_expenses, Money::zero());
        assert!(service.remove_line(&jan, "Rent").unwrap_err().is_not_found());
        assert_eq!(service.list().unwrap(), vec![jan]);
    }
}
