//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{BudgetPaths, Settings};
use crate::error::BudgetResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change a setting (base_currency, default_budget, log_level, date_format)
    Set {
        /// Setting name
        key: String,
        /// New value ("none" clears default_budget)
        value: String,
    },
}

/// Handle config commands; no subcommand means `show`
pub fn handle_config_command(
    paths: &BudgetPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> BudgetResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("household-budget configuration");
            println!("==============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  base_currency:  {}", settings.base_currency);
            match settings.default_budget {
                Some(id) => println!("  default_budget: {}", id),
                None => println!("  default_budget: (current month)"),
            }
            println!("  log_level:      {}", settings.log_level);
            println!("  date_format:    {}", settings.date_format);
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            tracing::info!(%key, %value, "Setting updated");
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
