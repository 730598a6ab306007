//! YAML Export functionality
//!
//! Same document as the JSON export, for reading by people.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::ReportExport;
use crate::reports::BudgetOverviewReport;

/// Export the report to YAML with a short header comment
pub fn export_report_yaml<W: Write>(report: &BudgetOverviewReport, writer: &mut W) -> BudgetResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# Household budget report: {}", report.period)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
