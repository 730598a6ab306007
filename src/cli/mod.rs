//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod planned;
pub mod report;
pub mod selection;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use planned::{handle_income_command, handle_planned_command, IncomeCommands, PlannedCommands};
pub use report::{
    build_report, handle_export_command, handle_limits_command, handle_report_command,
    handle_stats_command,
};
pub use selection::BudgetSelection;
