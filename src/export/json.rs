//! JSON Export functionality
//!
//! Exports the budget overview report with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::reports::BudgetOverviewReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper around an exported report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: &'static str,
    pub report: &'a BudgetOverviewReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a BudgetOverviewReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export the report to pretty-printed JSON
pub fn export_report_json<W: Write>(report: &BudgetOverviewReport, writer: &mut W) -> BudgetResult<()> {
    let export = ReportExport::new(report);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
