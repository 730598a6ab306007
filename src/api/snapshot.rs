//! File-backed budget API
//!
//! Reads each collection from its JSON file under the data directory on
//! every call, so a fetch always sees the latest state on disk. A missing
//! file is an empty collection.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use super::{BudgetApi, PlannedExpenseFilter, PlannedIncomeFilter};
use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Budget, BudgetId, BudgetItem, Expense, Money, PlannedExpense, PlannedExpenseId, PlannedIncome,
    PlannedIncomeId,
};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Budget API over the JSON snapshot files in a data directory
#[derive(Debug, Clone)]
pub struct SnapshotApi {
    paths: BudgetPaths,
}

impl SnapshotApi {
    pub fn new(paths: BudgetPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Replace the stored budgets
    pub fn save_budgets(&self, budgets: &[Budget]) -> BudgetResult<()> {
        write_json_atomic(self.paths.budgets_file(), &budgets)
    }

    pub fn save_budget_items(&self, items: &[BudgetItem]) -> BudgetResult<()> {
        write_json_atomic(self.paths.budget_items_file(), &items)
    }

    pub fn save_planned_expenses(&self, expenses: &[PlannedExpense]) -> BudgetResult<()> {
        write_json_atomic(self.paths.planned_expenses_file(), &expenses)
    }

    pub fn save_planned_incomes(&self, incomes: &[PlannedIncome]) -> BudgetResult<()> {
        write_json_atomic(self.paths.planned_incomes_file(), &incomes)
    }

    pub fn save_expenses(&self, expenses: &[Expense]) -> BudgetResult<()> {
        write_json_atomic(self.paths.expenses_file(), &expenses)
    }

    /// Load a collection, apply `f` to the matching entry and write it back
    fn update_entry<T, F>(
        &self,
        path: &Path,
        find: impl Fn(&T) -> bool,
        not_found: impl FnOnce() -> BudgetError,
        f: F,
    ) -> BudgetResult<T>
    where
        T: DeserializeOwned + Serialize + Clone,
        F: FnOnce(&mut T) -> BudgetResult<()>,
    {
        let mut entries: Vec<T> = load(path)?;
        let entry = entries.iter_mut().find(|e| find(e)).ok_or_else(not_found)?;
        f(entry)?;
        let updated = entry.clone();
        write_json_atomic(path, &entries)?;
        Ok(updated)
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> BudgetResult<Vec<T>> {
    let entries: Vec<T> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded collection");
    Ok(entries)
}

impl BudgetApi for SnapshotApi {
    fn list_budgets(&self) -> BudgetResult<Vec<Budget>> {
        let mut budgets: Vec<Budget> = load(&self.paths.budgets_file())?;
        budgets.sort_by(|a, b| a.period.cmp(&b.period));
        Ok(budgets)
    }

    fn list_budget_items(&self, budget_id: BudgetId) -> BudgetResult<Vec<BudgetItem>> {
        let items: Vec<BudgetItem> = load(&self.paths.budget_items_file())?;
        Ok(items
            .into_iter()
            .filter(|i| i.budget_id.map_or(true, |id| id == budget_id))
            .collect())
    }

    fn list_planned_expenses(&self, filter: &PlannedExpenseFilter) -> BudgetResult<Vec<PlannedExpense>> {
        let expenses: Vec<PlannedExpense> = load(&self.paths.planned_expenses_file())?;
        Ok(expenses
            .into_iter()
            .filter(|e| filter.matches(e.budget_id, e.status))
            .collect())
    }

    fn list_planned_incomes(&self, filter: &PlannedIncomeFilter) -> BudgetResult<Vec<PlannedIncome>> {
        let incomes: Vec<PlannedIncome> = load(&self.paths.planned_incomes_file())?;
        Ok(incomes
            .into_iter()
            .filter(|i| filter.matches(i.budget_id, i.status))
            .collect())
    }

    fn list_expenses(&self, from: NaiveDate, to: NaiveDate) -> BudgetResult<Vec<Expense>> {
        let expenses: Vec<Expense> = load(&self.paths.expenses_file())?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect())
    }

    fn confirm_planned_expense(
        &self,
        id: PlannedExpenseId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedExpense> {
        let updated = self.update_entry(
            &self.paths.planned_expenses_file(),
            |e: &PlannedExpense| e.id == id,
            || BudgetError::planned_expense_not_found(id.to_string()),
            |e: &mut PlannedExpense| Ok(e.confirm(actual)?),
        )?;
        tracing::info!(id = %id, amount = %updated.effective_amount(), "Confirmed planned expense");
        Ok(updated)
    }

    fn skip_planned_expense(&self, id: PlannedExpenseId) -> BudgetResult<PlannedExpense> {
        let updated = self.update_entry(
            &self.paths.planned_expenses_file(),
            |e: &PlannedExpense| e.id == id,
            || BudgetError::planned_expense_not_found(id.to_string()),
            |e: &mut PlannedExpense| Ok(e.skip()?),
        )?;
        tracing::info!(id = %id, "Skipped planned expense");
        Ok(updated)
    }

    fn receive_planned_income(
        &self,
        id: PlannedIncomeId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedIncome> {
        let updated = self.update_entry(
            &self.paths.planned_incomes_file(),
            |i: &PlannedIncome| i.id == id,
            || BudgetError::planned_income_not_found(id.to_string()),
            |i: &mut PlannedIncome| Ok(i.receive(actual)?),
        )?;
        tracing::info!(id = %id, amount = %updated.effective_amount(), "Received planned income");
        Ok(updated)
    }

    fn skip_planned_income(&self, id: PlannedIncomeId) -> BudgetResult<PlannedIncome> {
        let updated = self.update_entry(
            &self.paths.planned_incomes_file(),
            |i: &PlannedIncome| i.id == id,
            || BudgetError::planned_income_not_found(id.to_string()),
            |i: &mut PlannedIncome| Ok(i.skip()?),
        )?;
        tracing::info!(id = %id, "Skipped planned income");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlannedFilter;
    use crate::models::{
        BudgetPeriod, CategoryId, CurrencyCode, PlannedExpenseStatus, PlannedIncomeStatus,
    };
    use tempfile::TempDir;

    fn setup() -> (TempDir, SnapshotApi) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, SnapshotApi::new(paths))
    }

    fn rub() -> CurrencyCode {
        CurrencyCode::new("RUB").unwrap()
    }

    #[test]
    fn test_empty_directory_has_empty_collections() {
        let (_temp, api) = setup();
        assert!(api.list_budgets().unwrap().is_empty());
        assert!(api.list_budget_items(BudgetId::new()).unwrap().is_empty());
        assert!(api
            .list_planned_incomes(&PlannedFilter::budget(BudgetId::new()))
            .unwrap()
            .is_empty());
        assert!(api.get_budget(BudgetId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_budgets_sorted_and_found_by_period() {
        let (_temp, api) = setup();
        let feb = Budget::new("February", BudgetPeriod::monthly(2025, 2));
        let jan = Budget::new("January", BudgetPeriod::monthly(2025, 1));
        api.save_budgets(&[feb.clone(), jan.clone()]).unwrap();

        let budgets = api.list_budgets().unwrap();
        assert_eq!(budgets[0].id, jan.id);
        assert_eq!(api.get_budget(feb.id).unwrap(), feb);
        assert_eq!(
            api.find_budget_for_period(&BudgetPeriod::monthly(2025, 2)).unwrap(),
            Some(feb)
        );
        assert_eq!(
            api.find_budget_for_period(&BudgetPeriod::monthly(2025, 3)).unwrap(),
            None
        );
    }

    #[test]
    fn test_items_filtered_by_budget() {
        let (_temp, api) = setup();
        let budget = BudgetId::new();
        let mut mine = BudgetItem::new(CategoryId::new(), "Food", Money::from_units(100));
        mine.budget_id = Some(budget);
        let mut other = BudgetItem::new(CategoryId::new(), "Rent", Money::from_units(900));
        other.budget_id = Some(BudgetId::new());
        api.save_budget_items(&[mine.clone(), other]).unwrap();

        assert_eq!(api.list_budget_items(budget).unwrap(), vec![mine]);
    }

    #[test]
    fn test_planned_expenses_status_filter() {
        let (_temp, api) = setup();
        let budget = BudgetId::new();
        let mut pending = PlannedExpense::new(CategoryId::new(), Money::from_units(10), rub());
        pending.budget_id = Some(budget);
        let mut skipped = pending.clone();
        skipped.id = PlannedExpenseId::new();
        skipped.status = PlannedExpenseStatus::Skipped;
        api.save_planned_expenses(&[pending.clone(), skipped]).unwrap();

        let filter = PlannedFilter::budget(budget).with_status(PlannedExpenseStatus::Pending);
        assert_eq!(api.list_planned_expenses(&filter).unwrap(), vec![pending]);
        assert_eq!(
            api.list_planned_expenses(&PlannedFilter::budget(budget))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_expenses_date_range_is_inclusive() {
        let (_temp, api) = setup();
        let cat = CategoryId::new();
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        api.save_expenses(&[
            Expense::new(cat, Money::from_units(1), day(1)),
            Expense::new(cat, Money::from_units(2), day(31)),
            Expense::new(cat, Money::from_units(4), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
        ])
        .unwrap();

        let january = api.list_expenses(day(1), day(31)).unwrap();
        assert_eq!(january.len(), 2);
    }

    #[test]
    fn test_confirm_persists_and_terminal_is_rejected() {
        let (_temp, api) = setup();
        let expense = PlannedExpense::new(CategoryId::new(), Money::from_units(15000), rub());
        api.save_planned_expenses(&[expense.clone()]).unwrap();

        let confirmed = api
            .confirm_planned_expense(expense.id, Some(Money::from_units(14000)))
            .unwrap();
        assert_eq!(confirmed.status, PlannedExpenseStatus::Confirmed);

        let stored = api
            .list_planned_expenses(&PlannedFilter::budget(BudgetId::new()))
            .unwrap();
        assert_eq!(stored[0].actual_amount, Some(Money::from_units(14000)));

        let err = api.skip_planned_expense(expense.id).unwrap_err();
        assert!(matches!(err, BudgetError::Transition(_)));
    }

    #[test]
    fn test_income_mutations() {
        let (_temp, api) = setup();
        let salary = PlannedIncome::new(Money::from_units(100000), rub());
        let bonus = PlannedIncome::new(Money::from_units(20000), rub());
        api.save_planned_incomes(&[salary.clone(), bonus.clone()]).unwrap();

        api.receive_planned_income(salary.id, None).unwrap();
        api.skip_planned_income(bonus.id).unwrap();

        let received = api
            .list_planned_incomes(
                &PlannedFilter::budget(BudgetId::new()).with_status(PlannedIncomeStatus::Received),
            )
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, salary.id);

        assert!(api
            .receive_planned_income(PlannedIncomeId::new(), None)
            .unwrap_err()
            .is_not_found());
    }
}
