//! Budget dashboard
//!
//! Owns the selected budget and period and the collections fetched for them.
//! Changing the period refetches everything; a mutation refetches only the
//! collection it touched. Derived statistics are memoized on the identity of
//! the fetched collections, so reads between refetches are free.

use serde::Serialize;
use std::sync::Arc;

use crate::api::{BudgetApi, PlannedFilter};
use crate::error::BudgetResult;
use crate::models::{
    Budget, BudgetId, BudgetItem, BudgetPeriod, CategoryId, Money, PlannedExpense,
    PlannedExpenseId, PlannedIncome, PlannedIncomeId,
};

use super::grouping::CategoryCurrencyIndex;
use super::limits::{CategoryLimitInput, CategoryLimitStatus, CurrencyTotals};
use super::memo::{Snapshot, StatsMemo};
use super::stats::BudgetStats;

/// A fetched collection that can be invalidated on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Budget,
    BudgetItems,
    PlannedExpenses,
    PlannedIncomes,
    Expenses,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Budget,
        Collection::BudgetItems,
        Collection::PlannedExpenses,
        Collection::PlannedIncomes,
        Collection::Expenses,
    ];
}

/// A budget item joined with its real spend and classification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudgetRow {
    pub category_id: CategoryId,
    pub category_name: String,
    pub planned_amount: Money,
    pub total_limit: Money,
    pub actual_amount: Money,
    pub status: CategoryLimitStatus,
}

impl CategoryBudgetRow {
    fn new(item: &BudgetItem, actual_amount: Money) -> Self {
        Self {
            category_id: item.category_id,
            category_name: item.category_name.clone(),
            planned_amount: item.planned_amount,
            total_limit: item.total_limit,
            actual_amount,
            status: CategoryLimitStatus::analyze(&CategoryLimitInput::from_item(item, actual_amount)),
        }
    }
}

/// The enclosing recompute loop around the calculators
#[derive(Debug)]
pub struct BudgetDashboard<A: BudgetApi> {
    api: A,
    period: BudgetPeriod,
    snapshot: Snapshot,
    memo: StatsMemo,
}

impl<A: BudgetApi> BudgetDashboard<A> {
    /// Open the budget covering `period` and fetch its collections
    ///
    /// A period without a budget still loads its expenses; the budget-scoped
    /// collections are empty.
    pub fn load(api: A, period: BudgetPeriod) -> BudgetResult<Self> {
        let mut dashboard = Self {
            api,
            period: period.clone(),
            snapshot: Snapshot::default(),
            memo: StatsMemo::new(),
        };
        dashboard.select_period(period)?;
        Ok(dashboard)
    }

    /// Open a specific budget and fetch its collections
    pub fn load_budget(api: A, budget_id: BudgetId) -> BudgetResult<Self> {
        let budget = api.get_budget(budget_id)?;
        let mut dashboard = Self {
            api,
            period: budget.period.clone(),
            snapshot: Snapshot {
                budget: Some(Arc::new(budget)),
                ..Default::default()
            },
            memo: StatsMemo::new(),
        };
        dashboard.refetch_all()?;
        Ok(dashboard)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn period(&self) -> &BudgetPeriod {
        &self.period
    }

    pub fn budget(&self) -> Option<&Budget> {
        self.snapshot.budget.as_deref()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn items(&self) -> &[BudgetItem] {
        &self.snapshot.items
    }

    pub fn planned_expenses(&self) -> &[PlannedExpense] {
        &self.snapshot.planned_expenses
    }

    pub fn planned_incomes(&self) -> &[PlannedIncome] {
        &self.snapshot.planned_incomes
    }

    /// Switch to another month and refetch everything
    pub fn select_period(&mut self, period: BudgetPeriod) -> BudgetResult<()> {
        tracing::debug!(period = %period, "Selecting budget period");
        self.snapshot.budget = self.api.find_budget_for_period(&period)?.map(Arc::new);
        if self.snapshot.budget.is_none() {
            tracing::info!(period = %period, "No budget for period");
        }
        self.period = period;
        self.refetch_all()
    }

    /// Refetch one collection after it changed upstream
    pub fn invalidate(&mut self, collection: Collection) -> BudgetResult<()> {
        tracing::debug!(?collection, "Invalidating collection");
        let budget_id = self.snapshot.budget.as_ref().map(|b| b.id);

        match collection {
            Collection::Budget => {
                if let Some(id) = budget_id {
                    self.snapshot.budget = Some(Arc::new(self.api.get_budget(id)?));
                }
            }
            Collection::BudgetItems => {
                let items = match budget_id {
                    Some(id) => self.api.list_budget_items(id)?,
                    None => Vec::new(),
                };
                warn_on_inconsistent_limits(&items);
                self.snapshot.items = Arc::new(items);
            }
            Collection::PlannedExpenses => {
                let expenses = match budget_id {
                    Some(id) => self.api.list_planned_expenses(&PlannedFilter::budget(id))?,
                    None => Vec::new(),
                };
                self.snapshot.planned_expenses = Arc::new(expenses);
            }
            Collection::PlannedIncomes => {
                let incomes = match budget_id {
                    Some(id) => self.api.list_planned_incomes(&PlannedFilter::budget(id))?,
                    None => Vec::new(),
                };
                self.snapshot.planned_incomes = Arc::new(incomes);
            }
            Collection::Expenses => {
                let expenses = self
                    .api
                    .list_expenses(self.period.start_date(), self.period.end_date())?;
                self.snapshot.expenses = Arc::new(expenses);
            }
        }
        Ok(())
    }

    fn refetch_all(&mut self) -> BudgetResult<()> {
        for collection in Collection::ALL {
            if collection != Collection::Budget {
                self.invalidate(collection)?;
            }
        }
        Ok(())
    }

    /// Statistics for the current snapshot
    pub fn stats(&mut self) -> &BudgetStats {
        self.memo.stats(&self.snapshot)
    }

    /// How many times statistics were computed since the dashboard opened
    pub fn computations(&self) -> usize {
        self.memo.computations()
    }

    /// One classified row per budget item, in item order
    pub fn category_statuses(&mut self) -> Vec<CategoryBudgetRow> {
        let actual = self.memo.actual_by_category(&self.snapshot);
        self.snapshot
            .items
            .iter()
            .map(|item| {
                let spent = actual.get(&item.category_id).copied().unwrap_or_default();
                CategoryBudgetRow::new(item, spent)
            })
            .collect()
    }

    /// Row for a single category, if it has a budget item
    pub fn category_status(&mut self, category_id: &CategoryId) -> Option<CategoryBudgetRow> {
        let actual = self.memo.actual_by_category(&self.snapshot);
        let index = CategoryCurrencyIndex::build(&self.snapshot.items);
        index.item(category_id).map(|item| {
            CategoryBudgetRow::new(item, actual.get(category_id).copied().unwrap_or_default())
        })
    }

    /// Spend in categories that have no budget item, largest first
    pub fn unbudgeted_spend(&mut self) -> Vec<(CategoryId, Money)> {
        let actual = self.memo.actual_by_category(&self.snapshot);
        let index = CategoryCurrencyIndex::build(&self.snapshot.items);
        let mut rows: Vec<(CategoryId, Money)> = actual
            .iter()
            .filter(|(category_id, _)| index.item(category_id).is_none())
            .map(|(category_id, amount)| (*category_id, *amount))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }

    pub fn currency_totals(&self) -> CurrencyTotals {
        CurrencyTotals::aggregate(&self.snapshot.items)
    }

    pub fn confirm_planned_expense(
        &mut self,
        id: PlannedExpenseId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedExpense> {
        let updated = self.api.confirm_planned_expense(id, actual)?;
        self.invalidate(Collection::PlannedExpenses)?;
        Ok(updated)
    }

    pub fn skip_planned_expense(&mut self, id: PlannedExpenseId) -> BudgetResult<PlannedExpense> {
        let updated = self.api.skip_planned_expense(id)?;
        self.invalidate(Collection::PlannedExpenses)?;
        Ok(updated)
    }

    pub fn receive_planned_income(
        &mut self,
        id: PlannedIncomeId,
        actual: Option<Money>,
    ) -> BudgetResult<PlannedIncome> {
        let updated = self.api.receive_planned_income(id, actual)?;
        self.invalidate(Collection::PlannedIncomes)?;
        Ok(updated)
    }

    pub fn skip_planned_income(&mut self, id: PlannedIncomeId) -> BudgetResult<PlannedIncome> {
        let updated = self.api.skip_planned_income(id)?;
        self.invalidate(Collection::PlannedIncomes)?;
        Ok(updated)
    }
}

fn warn_on_inconsistent_limits(items: &[BudgetItem]) {
    for item in items {
        if !item.limit_invariant_holds() {
            tracing::warn!(
                category = %item.category_name,
                total_limit = %item.total_limit,
                planned_expenses_sum = %item.planned_expenses_sum,
                buffer_total = %item.buffer_total(),
                "Budget item limit does not match planned expenses plus buffers"
            );
        }
        for limit in item.currency_limits.iter().filter(|l| !l.is_consistent()) {
            tracing::warn!(
                category = %item.category_name,
                currency = %limit.currency,
                "Currency limit totals are inconsistent"
            );
        }
    }
}
