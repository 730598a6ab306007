//! Memoization of derived statistics by input identity
//!
//! A fetched collection is shared as an `Arc<Vec<T>>`. Refetching replaces
//! the `Arc`, so pointer identity tells whether anything changed since the
//! last computation without comparing contents.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{Budget, BudgetItem, CategoryId, Expense, Money, PlannedExpense, PlannedIncome};

use super::grouping::actual_by_category;
use super::stats::{BudgetStats, StatsInputs};

/// One month's fetched collections
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub budget: Option<Arc<Budget>>,
    pub items: Arc<Vec<BudgetItem>>,
    pub planned_expenses: Arc<Vec<PlannedExpense>>,
    pub planned_incomes: Arc<Vec<PlannedIncome>>,
    pub expenses: Arc<Vec<Expense>>,
}

impl Snapshot {
    /// True when every collection is the same allocation as in `other`
    pub fn same_inputs(&self, other: &Snapshot) -> bool {
        let same_budget = match (&self.budget, &other.budget) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_budget
            && Arc::ptr_eq(&self.items, &other.items)
            && Arc::ptr_eq(&self.planned_expenses, &other.planned_expenses)
            && Arc::ptr_eq(&self.planned_incomes, &other.planned_incomes)
            && Arc::ptr_eq(&self.expenses, &other.expenses)
    }
}

#[derive(Debug)]
struct Cached {
    key: Snapshot,
    actual: Arc<HashMap<CategoryId, Money>>,
    stats: BudgetStats,
}

/// Last computed statistics, reused until an input changes identity
#[derive(Debug, Default)]
pub struct StatsMemo {
    cached: Option<Cached>,
    computations: usize,
}

impl StatsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for the snapshot, recomputed only if its inputs changed
    pub fn stats(&mut self, snapshot: &Snapshot) -> &BudgetStats {
        &self.refresh(snapshot).stats
    }

    /// Real spend per category for the snapshot, shared with the stats cache
    pub fn actual_by_category(&mut self, snapshot: &Snapshot) -> Arc<HashMap<CategoryId, Money>> {
        Arc::clone(&self.refresh(snapshot).actual)
    }

    /// Drop the cached record so the next read recomputes
    pub fn clear(&mut self) {
        self.cached = None;
    }

    /// How many times the statistics were actually computed
    pub fn computations(&self) -> usize {
        self.computations
    }

    fn refresh(&mut self, snapshot: &Snapshot) -> &Cached {
        let fresh = matches!(&self.cached, Some(cached) if cached.key.same_inputs(snapshot));
        if !fresh {
            self.computations += 1;
            self.cached = None;
            tracing::trace!(computations = self.computations, "Recomputing budget stats");
        }
        self.cached.get_or_insert_with(|| Cached::compute(snapshot))
    }
}

impl Cached {
    fn compute(snapshot: &Snapshot) -> Self {
        let actual = Arc::new(actual_by_category(&snapshot.expenses));
        let summary = snapshot
            .budget
            .as_ref()
            .and_then(|b| b.distribution_summary.as_ref());
        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .items(&snapshot.items)
                .planned_expenses(&snapshot.planned_expenses)
                .planned_incomes(&snapshot.planned_incomes)
                .actual_by_category(&actual)
                .distribution_summary(summary),
        );
        Self {
            key: snapshot.clone(),
            actual,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetPeriod;
    use chrono::NaiveDate;

    fn snapshot_with_spend(amount: i64) -> Snapshot {
        let category = CategoryId::new();
        let item = BudgetItem::new(category, "Food", Money::from_units(500));
        let expense = Expense::new(
            category,
            Money::from_units(amount),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        );
        Snapshot {
            budget: Some(Arc::new(Budget::new("January", BudgetPeriod::monthly(2025, 1)))),
            items: Arc::new(vec![item]),
            expenses: Arc::new(vec![expense]),
            ..Default::default()
        }
    }

    #[test]
    fn test_unchanged_inputs_reuse_cache() {
        let snapshot = snapshot_with_spend(200);
        let mut memo = StatsMemo::new();

        let first = memo.stats(&snapshot).clone();
        let second = memo.stats(&snapshot.clone()).clone();

        assert_eq!(first, second);
        assert_eq!(first.total_actual, Money::from_units(200));
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_new_collection_forces_recompute() {
        let mut snapshot = snapshot_with_spend(200);
        let mut memo = StatsMemo::new();
        memo.stats(&snapshot);

        // Same contents, new allocation: a refetch
        snapshot.expenses = Arc::new(snapshot.expenses.as_ref().clone());
        memo.stats(&snapshot);
        assert_eq!(memo.computations(), 2);

        let mut changed = (*snapshot.expenses).clone();
        changed[0].amount = Money::from_units(700);
        snapshot.expenses = Arc::new(changed);
        assert!(memo.stats(&snapshot).is_over_budget);
        assert_eq!(memo.computations(), 3);
    }

    #[test]
    fn test_actual_by_category_shares_cache() {
        let snapshot = snapshot_with_spend(120);
        let mut memo = StatsMemo::new();

        let actual = memo.actual_by_category(&snapshot);
        memo.stats(&snapshot);
        assert_eq!(memo.computations(), 1);
        assert_eq!(actual.values().copied().sum::<Money>(), Money::from_units(120));

        memo.clear();
        memo.stats(&snapshot);
        assert_eq!(memo.computations(), 2);
    }
}
