//! Reports module for household-budget

pub mod budget_overview;

pub use budget_overview::{BudgetOverviewReport, UnbudgetedRow};
