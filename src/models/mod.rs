//! Core data models for household-budget
//!
//! Read-only snapshots of what the budget API returns for a month: budgets,
//! budget items with per-currency limits, planned expenses and incomes,
//! fund distributions and actual expenses.

pub mod budget;
pub mod currency;
pub mod expense;
pub mod ids;
pub mod money;
pub mod nullable;
pub mod period;
pub mod planned;
pub mod preferences;

pub use budget::{Budget, BudgetItem, CurrencyLimit, FundDistribution, FundDistributionSummary};
pub use currency::{format_money, CurrencyCode, CurrencyCodeError};
pub use expense::Expense;
pub use ids::{BudgetId, CategoryId, ExpenseId, PlannedExpenseId, PlannedIncomeId};
pub use money::{Money, MoneyParseError};
pub use nullable::{extract_amount, extract_date, NullableAmount, NullableDate};
pub use period::{BudgetPeriod, PeriodParseError};
pub use planned::{
    PlannedExpense, PlannedExpenseStatus, PlannedIncome, PlannedIncomeStatus,
    StatusTransitionError,
};
pub use preferences::HiddenCategories;
