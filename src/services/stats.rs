//! Budget availability calculation
//!
//! Folds one month's budget items, planned expenses, planned incomes, real
//! spend and fund distributions into a single [`BudgetStats`] record. Every
//! summary card reads that record; nothing downstream recomputes it.
//!
//! Planned spend comes from budget items while real spend comes from expense
//! rows, so the two can cover different category sets. `available_for_planning`
//! uses expected figures and `actually_available` uses realized ones; they are
//! reported side by side and never merged.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{
    BudgetItem, CategoryId, FundDistributionSummary, Money, PlannedExpense, PlannedExpenseStatus,
    PlannedIncome, PlannedIncomeStatus,
};

/// Borrowed inputs for one calculation; anything not supplied is empty
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsInputs<'a> {
    pub items: &'a [BudgetItem],
    pub planned_expenses: &'a [PlannedExpense],
    pub planned_incomes: &'a [PlannedIncome],
    pub actual_by_category: Option<&'a HashMap<CategoryId, Money>>,
    pub distribution_summary: Option<&'a FundDistributionSummary>,
}

impl<'a> StatsInputs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(mut self, items: &'a [BudgetItem]) -> Self {
        self.items = items;
        self
    }

    pub fn planned_expenses(mut self, planned_expenses: &'a [PlannedExpense]) -> Self {
        self.planned_expenses = planned_expenses;
        self
    }

    pub fn planned_incomes(mut self, planned_incomes: &'a [PlannedIncome]) -> Self {
        self.planned_incomes = planned_incomes;
        self
    }

    pub fn actual_by_category(mut self, actual: &'a HashMap<CategoryId, Money>) -> Self {
        self.actual_by_category = Some(actual);
        self
    }

    pub fn distribution_summary(mut self, summary: Option<&'a FundDistributionSummary>) -> Self {
        self.distribution_summary = summary;
        self
    }
}

/// Derived statistics for one month, all in the base currency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStats {
    /// Discretionary category plans
    pub total_planned: Money,
    /// Real spend from expense rows
    pub total_actual: Money,
    pub variance: Money,
    pub is_over_budget: bool,

    /// Planned expenses that are pending or confirmed, at their planned amount
    pub total_planned_expenses: Money,
    pub pending_planned: Money,
    pub confirmed_planned: Money,

    /// Planned incomes that are pending or received, at their expected amount
    pub expected_income: Money,
    pub received_income: Money,
    pub pending_income: Money,

    pub expected_fund_distributions: Money,
    pub actual_fund_distributions: Money,

    /// What is left to allocate, from expected figures
    pub available_for_planning: Money,
    /// What is left to spend right now, from realized figures
    pub actually_available: Money,
}

impl BudgetStats {
    /// Compute the statistics record; never fails
    pub fn compute(inputs: &StatsInputs<'_>) -> Self {
        let total_planned: Money = inputs.items.iter().map(|i| i.planned_amount).sum();
        let total_actual: Money = inputs
            .actual_by_category
            .map(|actual| actual.values().sum())
            .unwrap_or_default();
        let variance = total_planned - total_actual;

        let mut total_planned_expenses = Money::zero();
        let mut pending_planned = Money::zero();
        let mut confirmed_planned = Money::zero();
        for expense in inputs.planned_expenses {
            match expense.status {
                PlannedExpenseStatus::Pending => {
                    total_planned_expenses += expense.planned_amount;
                    pending_planned += expense.planned_amount;
                }
                PlannedExpenseStatus::Confirmed => {
                    total_planned_expenses += expense.planned_amount;
                    confirmed_planned += expense.effective_amount();
                }
                PlannedExpenseStatus::Skipped => {}
            }
        }

        let mut expected_income = Money::zero();
        let mut received_income = Money::zero();
        let mut pending_income = Money::zero();
        for income in inputs.planned_incomes {
            match income.status {
                PlannedIncomeStatus::Pending => {
                    expected_income += income.expected_amount;
                    pending_income += income.expected_amount;
                }
                PlannedIncomeStatus::Received => {
                    expected_income += income.expected_amount;
                    received_income += income.effective_amount();
                }
                PlannedIncomeStatus::Skipped => {}
            }
        }

        let (expected_fund_distributions, actual_fund_distributions) = inputs
            .distribution_summary
            .map(|s| (s.total_expected_distribution, s.total_actual_distribution))
            .unwrap_or_default();

        let available_for_planning =
            expected_income - total_planned - pending_planned - expected_fund_distributions;
        let actually_available = received_income - total_actual - actual_fund_distributions;

        tracing::debug!(
            total_planned = %total_planned,
            total_actual = %total_actual,
            available_for_planning = %available_for_planning,
            actually_available = %actually_available,
            "Computed budget stats"
        );

        Self {
            total_planned,
            total_actual,
            variance,
            is_over_budget: variance.is_negative(),
            total_planned_expenses,
            pending_planned,
            confirmed_planned,
            expected_income,
            received_income,
            pending_income,
            expected_fund_distributions,
            actual_fund_distributions,
            available_for_planning,
            actually_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, FundDistribution};

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn rub() -> CurrencyCode {
        CurrencyCode::new("RUB").unwrap()
    }

    fn item(planned: i64) -> BudgetItem {
        BudgetItem::new(CategoryId::new(), "Category", units(planned))
    }

    fn expense(amount: i64, status: PlannedExpenseStatus, actual: Option<i64>) -> PlannedExpense {
        let mut e = PlannedExpense::new(CategoryId::new(), units(amount), rub());
        e.status = status;
        e.actual_amount = actual.map(units);
        e
    }

    fn income(amount: i64, status: PlannedIncomeStatus, actual: Option<i64>) -> PlannedIncome {
        let mut i = PlannedIncome::new(units(amount), rub());
        i.status = status;
        i.actual_amount = actual.map(units);
        i
    }

    #[test]
    fn test_empty_inputs_are_all_zero() {
        let stats = BudgetStats::compute(&StatsInputs::new());
        assert_eq!(stats, BudgetStats::default());
        assert!(!stats.is_over_budget);
    }

    #[test]
    fn test_overspent_plan() {
        let items = vec![item(50000)];
        let mut actual = HashMap::new();
        actual.insert(items[0].category_id, units(62000));

        let stats = BudgetStats::compute(
            &StatsInputs::new().items(&items).actual_by_category(&actual),
        );

        assert_eq!(stats.total_planned, units(50000));
        assert_eq!(stats.total_actual, units(62000));
        assert_eq!(stats.variance, units(-12000));
        assert!(stats.is_over_budget);
    }

    #[test]
    fn test_received_income_drives_actually_available() {
        let incomes = vec![income(100000, PlannedIncomeStatus::Received, Some(95000))];
        let mut actual = HashMap::new();
        actual.insert(CategoryId::new(), units(40000));

        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .planned_incomes(&incomes)
                .actual_by_category(&actual),
        );

        assert_eq!(stats.received_income, units(95000));
        assert_eq!(stats.expected_income, units(100000));
        assert_eq!(stats.actually_available, units(55000));
    }

    #[test]
    fn test_available_for_planning() {
        let items = vec![item(60000)];
        let expenses = vec![expense(20000, PlannedExpenseStatus::Pending, None)];
        let incomes = vec![income(150000, PlannedIncomeStatus::Pending, None)];
        let summary = FundDistributionSummary {
            total_expected_distribution: units(30000),
            ..Default::default()
        };

        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .items(&items)
                .planned_expenses(&expenses)
                .planned_incomes(&incomes)
                .distribution_summary(Some(&summary)),
        );

        assert_eq!(stats.expected_income, units(150000));
        assert_eq!(stats.total_planned, units(60000));
        assert_eq!(stats.pending_planned, units(20000));
        assert_eq!(stats.expected_fund_distributions, units(30000));
        assert_eq!(stats.available_for_planning, units(40000));
    }

    #[test]
    fn test_confirmed_uses_actual_with_fallback() {
        let expenses = vec![
            expense(1000, PlannedExpenseStatus::Confirmed, Some(900)),
            expense(500, PlannedExpenseStatus::Confirmed, None),
            expense(300, PlannedExpenseStatus::Pending, Some(999)),
        ];
        let stats = BudgetStats::compute(&StatsInputs::new().planned_expenses(&expenses));

        assert_eq!(stats.confirmed_planned, units(1400));
        // Pending items always count at their planned amount
        assert_eq!(stats.pending_planned, units(300));
        assert_eq!(stats.total_planned_expenses, units(1800));
    }

    #[test]
    fn test_skipped_items_contribute_nothing() {
        let expenses = vec![
            expense(7000, PlannedExpenseStatus::Skipped, Some(7000)),
            expense(100, PlannedExpenseStatus::Pending, None),
        ];
        let incomes = vec![
            income(50000, PlannedIncomeStatus::Skipped, Some(50000)),
            income(1000, PlannedIncomeStatus::Received, None),
        ];

        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .planned_expenses(&expenses)
                .planned_incomes(&incomes),
        );

        assert_eq!(stats.total_planned_expenses, units(100));
        assert_eq!(stats.pending_planned, units(100));
        assert_eq!(stats.confirmed_planned, Money::zero());
        assert_eq!(stats.expected_income, units(1000));
        assert_eq!(stats.received_income, units(1000));
        assert_eq!(stats.pending_income, Money::zero());
    }

    #[test]
    fn test_actual_fund_distributions_reduce_actually_available() {
        let incomes = vec![income(100000, PlannedIncomeStatus::Received, None)];
        let summary = FundDistributionSummary::from_funds(vec![
            FundDistribution {
                fund_name: "Emergency".to_string(),
                expected_amount: units(10000),
                actual_amount: Some(units(8000)),
            },
            FundDistribution {
                fund_name: "Vacation".to_string(),
                expected_amount: units(5000),
                actual_amount: None,
            },
        ]);

        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .planned_incomes(&incomes)
                .distribution_summary(Some(&summary)),
        );

        assert_eq!(stats.expected_fund_distributions, units(15000));
        assert_eq!(stats.actual_fund_distributions, units(8000));
        assert_eq!(stats.actually_available, units(92000));
        assert_eq!(stats.available_for_planning, units(85000));
    }

    #[test]
    fn test_spend_outside_budget_items() {
        // Food has a plan; Taxi has spend but no budget item
        let items = vec![item(1000)];
        let mut actual = HashMap::new();
        actual.insert(items[0].category_id, units(400));
        actual.insert(CategoryId::new(), units(250));
        let incomes = vec![income(2000, PlannedIncomeStatus::Received, None)];

        let stats = BudgetStats::compute(
            &StatsInputs::new()
                .items(&items)
                .planned_incomes(&incomes)
                .actual_by_category(&actual),
        );

        assert_eq!(stats.total_planned, units(1000));
        assert_eq!(stats.total_actual, units(650));
        assert_eq!(stats.actually_available, units(1350));
        assert_eq!(stats.available_for_planning, units(1000));
    }

    #[test]
    fn test_headline_figures_diverge_in_sign() {
        let items = vec![item(3000)];
        let incomes = vec![
            income(2000, PlannedIncomeStatus::Received, None),
            income(500, PlannedIncomeStatus::Pending, None),
        ];

        let stats = BudgetStats::compute(
            &StatsInputs::new().items(&items).planned_incomes(&incomes),
        );

        assert!(stats.available_for_planning.is_negative());
        assert!(stats.actually_available.is_positive());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let items = vec![item(1234), item(99)];
        let expenses = vec![expense(10, PlannedExpenseStatus::Confirmed, Some(12))];
        let incomes = vec![income(5000, PlannedIncomeStatus::Pending, None)];
        let inputs = StatsInputs::new()
            .items(&items)
            .planned_expenses(&expenses)
            .planned_incomes(&incomes);

        assert_eq!(BudgetStats::compute(&inputs), BudgetStats::compute(&inputs));
    }

    #[test]
    fn test_fractional_amounts_stay_exact() {
        let items: Vec<BudgetItem> = (0..10)
            .map(|_| BudgetItem::new(CategoryId::new(), "Cat", Money::from_cents(10)))
            .collect();
        let mut actual = HashMap::new();
        actual.insert(CategoryId::new(), Money::from_units(1));

        let stats = BudgetStats::compute(
            &StatsInputs::new().items(&items).actual_by_category(&actual),
        );

        assert!(stats.variance.is_zero());
        assert!(!stats.is_over_budget);
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let items: Vec<BudgetItem> =
            serde_json::from_str(r#"[{"categoryId": "6f1c2d3e-0000-4000-8000-000000000001", "totalLimit": 5e16},
                                    {"categoryId": "6f1c2d3e-0000-4000-8000-000000000002", "totalLimit": 5e16}]"#)
                .unwrap();
        let stats = BudgetStats::compute(&StatsInputs::new().items(&items));

        assert_eq!(stats.total_planned.cents(), i64::MAX);
        assert_eq!(stats.available_for_planning.cents(), i64::MIN + 1);
        assert!(!stats.is_over_budget);
    }
}
