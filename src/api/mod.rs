//! Budget API contracts
//!
//! The calculators never fetch anything themselves. Whatever owns the data
//! (a remote service, a directory of snapshot files) implements
//! [`BudgetApi`] and hands whole collections to the dashboard.

pub mod snapshot;

pub use snapshot::SnapshotApi;

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Budget, BudgetId, BudgetItem, BudgetPeriod, Expense, Money, PlannedExpense,
    PlannedExpenseId, PlannedExpenseStatus, PlannedIncome, PlannedIncomeId, PlannedIncomeStatus,
};

/// Selects planned items of one budget, optionally of one status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedFilter<S> {
    pub budget_id: BudgetId,
    pub status: Option<S>,
}

impl<S: PartialEq + Copy> PlannedFilter<S> {
    pub fn budget(budget_id: BudgetId) -> Self {
        Self {
            budget_id,
            status: None,
        }
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Items without a budget ID belong to every budget
    pub fn matches(&self, budget_id: Option<BudgetId>, status: S) -> bool {
        budget_id.map_or(true, |id| id == self.budget_id)
            && self.status.map_or(true, |wanted| wanted == status)
    }
}

pub type PlannedExpenseFilter = PlannedFilter<PlannedExpenseStatus>;
pub type PlannedIncomeFilter = PlannedFilter<PlannedIncomeStatus>;

/// Request/response boundary to wherever budget data lives
pub trait BudgetApi {
    fn list_budgets(&self) -> BudgetResult<Vec<Budget>>;

    fn get_budget(&self, id: BudgetId) -> BudgetResult<Budget> {
        self.list_budgets()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))
    }

    /// The budget covering a period, if one exists
    fn find_budget_for_period(&self, period: &BudgetPeriod) -> BudgetResult<Option<Budget>> {
        Ok(self
            .list_budgets()?
            .into_iter()
            .find(|b| &b.period == period))
    }

    fn list_budget_items(&self, budget_id: BudgetId) -> BudgetResult<Vec<BudgetItem>>;

    fn list_planned_expenses(&self, filter: &PlannedExpenseFilter) -> BudgetResult<Vec<PlannedExpense>>;

    fn list_planned_incomes(&self, filter: &PlannedIncomeFilter) -> BudgetResult<Vec<PlannedIncome>>;

    /// Expenses dated within `from..=to`
    fn list_expenses(&self, from: NaiveDate, to: NaiveDate) -> BudgetResult<Vec<Expense>>;

    fn confirm_planned_expense(
        &self,
        id: PlannedExpenseId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedExpense>;

    fn skip_planned_expense(&self, id: PlannedExpenseId) -> BudgetResult<PlannedExpense>;

    fn receive_planned_income(
        &self,
        id: PlannedIncomeId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedIncome>;

    fn skip_planned_income(&self, id: PlannedIncomeId) -> BudgetResult<PlannedIncome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let budget = BudgetId::new();
        let filter = PlannedExpenseFilter::budget(budget);

        assert!(filter.matches(Some(budget), PlannedExpenseStatus::Skipped));
        assert!(filter.matches(None, PlannedExpenseStatus::Pending));
        assert!(!filter.matches(Some(BudgetId::new()), PlannedExpenseStatus::Pending));

        let pending = filter.with_status(PlannedExpenseStatus::Pending);
        assert!(pending.matches(Some(budget), PlannedExpenseStatus::Pending));
        assert!(!pending.matches(Some(budget), PlannedExpenseStatus::Confirmed));
    }
}
