//! Planned expenses and planned incomes
//!
//! Both follow a one-way status machine: an item starts `pending` and moves
//! once to a terminal status. Terminal statuses never revert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::CurrencyCode;
use super::ids::{BudgetId, CategoryId, PlannedExpenseId, PlannedIncomeId};
use super::money::Money;
use super::nullable::{deserialize_amount, deserialize_date};

/// Status of a planned expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlannedExpenseStatus {
    #[default]
    Pending,
    Confirmed,
    Skipped,
}

impl PlannedExpenseStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for PlannedExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Status of a planned income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlannedIncomeStatus {
    #[default]
    Pending,
    Received,
    Skipped,
}

impl PlannedIncomeStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for PlannedIncomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Received => write!(f, "received"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// A mandatory or recurring obligation, e.g. a loan installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExpense {
    pub id: PlannedExpenseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,
    pub category_id: CategoryId,
    #[serde(default)]
    pub description: String,
    pub planned_amount: Money,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub status: PlannedExpenseStatus,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub actual_amount: Option<Money>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub planned_date: Option<NaiveDate>,
}

impl PlannedExpense {
    /// Create a pending planned expense
    pub fn new(category_id: CategoryId, planned_amount: Money, currency: CurrencyCode) -> Self {
        Self {
            id: PlannedExpenseId::new(),
            budget_id: None,
            category_id,
            description: String::new(),
            planned_amount,
            currency,
            status: PlannedExpenseStatus::Pending,
            actual_amount: None,
            planned_date: None,
        }
    }

    /// Actual amount if known, else the planned amount
    pub fn effective_amount(&self) -> Money {
        self.actual_amount.unwrap_or(self.planned_amount)
    }

    /// Mark the expense as paid, optionally recording what was actually paid
    pub fn confirm(&mut self, actual: Option<Money>) -> Result<(), StatusTransitionError> {
        self.transition(PlannedExpenseStatus::Confirmed)?;
        if actual.is_some() {
            self.actual_amount = actual;
        }
        Ok(())
    }

    /// Mark the expense as not happening this month
    pub fn skip(&mut self) -> Result<(), StatusTransitionError> {
        self.transition(PlannedExpenseStatus::Skipped)
    }

    fn transition(&mut self, to: PlannedExpenseStatus) -> Result<(), StatusTransitionError> {
        if self.status.is_terminal() {
            return Err(StatusTransitionError {
                item: "planned expense",
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// An expected income for the month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedIncome {
    pub id: PlannedIncomeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,
    #[serde(default)]
    pub description: String,
    pub expected_amount: Money,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub status: PlannedIncomeStatus,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub actual_amount: Option<Money>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub expected_date: Option<NaiveDate>,
}

impl PlannedIncome {
    /// Create a pending planned income
    pub fn new(expected_amount: Money, currency: CurrencyCode) -> Self {
        Self {
            id: PlannedIncomeId::new(),
            budget_id: None,
            description: String::new(),
            expected_amount,
            currency,
            status: PlannedIncomeStatus::Pending,
            actual_amount: None,
            expected_date: None,
        }
    }

    /// Actual amount if known, else the expected amount
    pub fn effective_amount(&self) -> Money {
        self.actual_amount.unwrap_or(self.expected_amount)
    }

    /// Mark the income as received, optionally recording the real amount
    pub fn receive(&mut self, actual: Option<Money>) -> Result<(), StatusTransitionError> {
        self.transition(PlannedIncomeStatus::Received)?;
        if actual.is_some() {
            self.actual_amount = actual;
        }
        Ok(())
    }

    /// Mark the income as not arriving this month
    pub fn skip(&mut self) -> Result<(), StatusTransitionError> {
        self.transition(PlannedIncomeStatus::Skipped)
    }

    fn transition(&mut self, to: PlannedIncomeStatus) -> Result<(), StatusTransitionError> {
        if self.status.is_terminal() {
            return Err(StatusTransitionError {
                item: "planned income",
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Attempt to move a planned item out of a terminal status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransitionError {
    pub item: &'static str,
    pub from: String,
    pub to: String,
}

impl fmt::Display for StatusTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is already {} and cannot become {}",
            self.item, self.from, self.to
        )
    }
}

impl std::error::Error for StatusTransitionError {}
