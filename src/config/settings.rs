//! User settings for household-budget
//!
//! Base currency, the budget opened by default, log verbosity and date
//! display format, persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::{BudgetId, CurrencyCode};
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency every base-currency figure is expressed in
    #[serde(default = "default_base_currency")]
    pub base_currency: CurrencyCode,

    /// Budget opened when neither `--budget` nor `--period` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<BudgetId>,

    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode::rub()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_currency: default_base_currency(),
            default_budget: None,
            log_level: default_log_level(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Update a setting by its key name
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BudgetError> {
        match key {
            "base_currency" => {
                self.base_currency = CurrencyCode::new(value)
                    .map_err(|e| BudgetError::Validation(e.to_string()))?;
            }
            "default_budget" => {
                self.default_budget = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(BudgetId::parse(value).map_err(|e| {
                        BudgetError::Validation(format!("Invalid budget ID '{}': {}", value, e))
                    })?)
                };
            }
            "log_level" => {
                if value.trim().is_empty() {
                    return Err(BudgetError::Validation("Log level cannot be empty".into()));
                }
                self.log_level = value.trim().to_string();
            }
            "date_format" => {
                if value.trim().is_empty() {
                    return Err(BudgetError::Validation("Date format cannot be empty".into()));
                }
                self.date_format = value.to_string();
            }
            other => {
                return Err(BudgetError::Config(format!("Unknown setting: {}", other)));
            }
        }
        Ok(())
    }
}
