//! Export module for household-budget
//!
//! - CSV: category rows, spreadsheet-compatible
//! - JSON: the full report, machine-readable
//! - YAML: the full report, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_categories_csv;
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

use std::str::FromStr;

use crate::error::BudgetError;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(BudgetError::Validation(format!(
                "Unknown export format '{}'. Use json, yaml or csv",
                other
            ))),
        }
    }
}
