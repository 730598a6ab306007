//! Planned expense and planned income CLI commands
//!
//! Status changes go through the dashboard so the affected collection is
//! refetched and the new availability figures are shown right away.

use clap::Subcommand;

use super::selection::{parse_amount, BudgetSelection};
use crate::api::BudgetApi;
use crate::config::{BudgetPaths, Settings};
use crate::display::{format_balance, left_align, right_align, truncate};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{format_money, PlannedExpenseId, PlannedIncomeId};
use crate::services::BudgetDashboard;

/// Planned expense subcommands
#[derive(Subcommand, Debug)]
pub enum PlannedCommands {
    /// List planned expenses of the selected budget
    List {
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Mark a planned expense as confirmed
    Confirm {
        /// Planned expense ID
        id: String,
        /// Amount actually paid (defaults to the planned amount)
        #[arg(short, long)]
        actual: Option<String>,
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Mark a planned expense as skipped
    Skip {
        /// Planned expense ID
        id: String,
        #[command(flatten)]
        selection: BudgetSelection,
    },
}

/// Planned income subcommands
#[derive(Subcommand, Debug)]
pub enum IncomeCommands {
    /// List planned incomes of the selected budget
    List {
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Mark a planned income as received
    Receive {
        /// Planned income ID
        id: String,
        /// Amount actually received (defaults to the expected amount)
        #[arg(short, long)]
        actual: Option<String>,
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Mark a planned income as skipped
    Skip {
        /// Planned income ID
        id: String,
        #[command(flatten)]
        selection: BudgetSelection,
    },
}

/// Handle planned expense commands
pub fn handle_planned_command(
    paths: &BudgetPaths,
    settings: &Settings,
    cmd: PlannedCommands,
) -> BudgetResult<()> {
    match cmd {
        PlannedCommands::List { selection } => {
            let dashboard = selection.open(paths, settings)?;
            if dashboard.planned_expenses().is_empty() {
                println!("No planned expenses for {}", dashboard.period());
                return Ok(());
            }
            for expense in dashboard.planned_expenses() {
                println!(
                    "{}  {} {} {}",
                    expense.id,
                    left_align(&truncate(&expense.description, 24), 24),
                    right_align(&format_money(expense.planned_amount, &expense.currency), 14),
                    expense.status
                );
            }
        }
        PlannedCommands::Confirm {
            id,
            actual,
            selection,
        } => {
            let id = parse_planned_expense_id(&id)?;
            let actual = actual.as_deref().map(parse_amount).transpose()?;
            let mut dashboard = selection.open(paths, settings)?;
            let updated = dashboard.confirm_planned_expense(id, actual)?;
            println!(
                "Confirmed '{}': {}",
                updated.description,
                format_money(updated.effective_amount(), &updated.currency)
            );
            print_availability(&mut dashboard, settings);
        }
        PlannedCommands::Skip { id, selection } => {
            let id = parse_planned_expense_id(&id)?;
            let mut dashboard = selection.open(paths, settings)?;
            let updated = dashboard.skip_planned_expense(id)?;
            println!("Skipped '{}'", updated.description);
            print_availability(&mut dashboard, settings);
        }
    }
    Ok(())
}

/// Handle planned income commands
pub fn handle_income_command(
    paths: &BudgetPaths,
    settings: &Settings,
    cmd: IncomeCommands,
) -> BudgetResult<()> {
    match cmd {
        IncomeCommands::List { selection } => {
            let dashboard = selection.open(paths, settings)?;
            if dashboard.planned_incomes().is_empty() {
                println!("No planned incomes for {}", dashboard.period());
                return Ok(());
            }
            for income in dashboard.planned_incomes() {
                println!(
                    "{}  {} {} {}",
                    income.id,
                    left_align(&truncate(&income.description, 24), 24),
                    right_align(&format_money(income.expected_amount, &income.currency), 14),
                    income.status
                );
            }
        }
        IncomeCommands::Receive {
            id,
            actual,
            selection,
        } => {
            let id = parse_planned_income_id(&id)?;
            let actual = actual.as_deref().map(parse_amount).transpose()?;
            let mut dashboard = selection.open(paths, settings)?;
            let updated = dashboard.receive_planned_income(id, actual)?;
            println!(
                "Received '{}': {}",
                updated.description,
                format_money(updated.effective_amount(), &updated.currency)
            );
            print_availability(&mut dashboard, settings);
        }
        IncomeCommands::Skip { id, selection } => {
            let id = parse_planned_income_id(&id)?;
            let mut dashboard = selection.open(paths, settings)?;
            let updated = dashboard.skip_planned_income(id)?;
            println!("Skipped '{}'", updated.description);
            print_availability(&mut dashboard, settings);
        }
    }
    Ok(())
}

fn print_availability<A: BudgetApi>(dashboard: &mut BudgetDashboard<A>, settings: &Settings) {
    let currency = dashboard
        .budget()
        .and_then(|b| b.base_currency.clone())
        .unwrap_or_else(|| settings.base_currency.clone());
    let stats = dashboard.stats();
    println!(
        "Available for planning: {}",
        format_balance(stats.available_for_planning, &currency)
    );
    println!(
        "Actually available:     {}",
        format_balance(stats.actually_available, &currency)
    );
}

fn parse_planned_expense_id(s: &str) -> BudgetResult<PlannedExpenseId> {
    PlannedExpenseId::parse(s.trim()).map_err(|e| {
        BudgetError::Validation(format!("Invalid planned expense ID '{}': {}", s, e))
    })
}

fn parse_planned_income_id(s: &str) -> BudgetResult<PlannedIncomeId> {
    PlannedIncomeId::parse(s.trim())
        .map_err(|e| BudgetError::Validation(format!("Invalid planned income ID '{}': {}", s, e)))
}
