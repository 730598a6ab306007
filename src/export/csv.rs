//! CSV Export functionality
//!
//! One line per visible category in the base currency, followed by one line
//! per active currency limit of that category.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;
use crate::reports::BudgetOverviewReport;

const HEADER: [&str; 9] = [
    "Period",
    "Category ID",
    "Category",
    "Currency",
    "Limit",
    "Spent",
    "Remaining",
    "Progress",
    "Over Budget",
];

/// Plain decimal without grouping, exact to the cent
fn major(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.units().abs(), amount.cents_part())
}

/// Export the report's category rows to CSV
pub fn export_categories_csv<W: Write>(report: &BudgetOverviewReport, writer: W) -> BudgetResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

    out.write_record(HEADER).map_err(export_err)?;

    let period = report.period.to_string();
    for row in &report.categories {
        let category_id = row.category_id.to_string();
        let progress = row
            .status
            .progress_percent
            .map(|p| p.to_string())
            .unwrap_or_default();

        out.write_record(vec![
            period.clone(),
            category_id.clone(),
            row.category_name.clone(),
            report.base_currency.to_string(),
            major(row.total_limit),
            major(row.actual_amount),
            major(row.status.remaining),
            progress,
            row.status.is_over_budget.to_string(),
        ])
        .map_err(export_err)?;

        for limit in row.status.currency_rows() {
            out.write_record(vec![
                period.clone(),
                category_id.clone(),
                row.category_name.clone(),
                limit.currency.to_string(),
                major(limit.total_limit),
                major(limit.actual_amount),
                major(limit.remaining),
                format!("{:.0}", limit.progress_width),
                limit.is_overspent.to_string(),
            ])
            .map_err(export_err)?;
        }
    }

    out.flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
