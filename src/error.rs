//! Custom error types for household-budget
//!
//! The reconciliation calculators are total functions and never produce
//! errors. Everything around them (configuration, snapshot files, exports,
//! status transitions requested through the API) reports through
//! [`BudgetError`].

use thiserror::Error;

/// The main error type for household-budget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Errors reported by the budget API collaborator
    #[error("API error: {0}")]
    Api(String),

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A planned item was asked to leave a terminal status
    #[error("Status transition error: {0}")]
    Transition(String),
}

impl BudgetError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for planned expenses
    pub fn planned_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Planned expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for planned incomes
    pub fn planned_income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Planned income",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for BudgetError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<crate::models::StatusTransitionError> for BudgetError {
    fn from(err: crate::models::StatusTransitionError) -> Self {
        Self::Transition(err.to_string())
    }
}

/// Result type alias for household-budget operations
pub type BudgetResult<T> = Result<T, BudgetError>;
