//! Budget selection shared by the report and mutation commands

use clap::Args;

use crate::api::SnapshotApi;
use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetId, BudgetPeriod, Money};
use crate::services::BudgetDashboard;

/// Which budget a command works on
#[derive(Args, Debug, Clone, Default)]
pub struct BudgetSelection {
    /// Budget ID
    #[arg(short, long, conflicts_with = "period")]
    pub budget: Option<String>,

    /// Budget period (e.g., "2025-01" or "2025-01-01..2025-01-15")
    #[arg(short, long)]
    pub period: Option<String>,
}

impl BudgetSelection {
    /// Open the dashboard for the selected budget
    ///
    /// Order: `--budget`, `--period`, the configured default budget, then the
    /// current month.
    pub fn open(
        &self,
        paths: &BudgetPaths,
        settings: &Settings,
    ) -> BudgetResult<BudgetDashboard<SnapshotApi>> {
        let api = SnapshotApi::new(paths.clone());

        if let Some(id) = &self.budget {
            return BudgetDashboard::load_budget(api, parse_budget_id(id)?);
        }
        if let Some(period) = &self.period {
            return BudgetDashboard::load(api, parse_period(period)?);
        }
        match settings.default_budget {
            Some(id) => BudgetDashboard::load_budget(api, id),
            None => BudgetDashboard::load(api, BudgetPeriod::current_month()),
        }
    }
}

pub(crate) fn parse_budget_id(s: &str) -> BudgetResult<BudgetId> {
    BudgetId::parse(s.trim())
        .map_err(|e| BudgetError::Validation(format!("Invalid budget ID '{}': {}", s, e)))
}

pub(crate) fn parse_period(s: &str) -> BudgetResult<BudgetPeriod> {
    BudgetPeriod::parse(s).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid period format: {}. Use YYYY-MM (e.g., 2025-01)",
            e
        ))
    })
}

pub(crate) fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(format!("Invalid amount '{}': {}", s, e)))
}
