//! CLI commands for reports
//!
//! `stats`, `limits` and `report` print the budget overview to the terminal;
//! `export` writes it as JSON, YAML or CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::selection::BudgetSelection;
use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_categories_csv, export_report_json, export_report_yaml, ExportFormat};
use crate::models::HiddenCategories;
use crate::reports::BudgetOverviewReport;

/// Build the overview report for the selected budget
pub fn build_report(
    paths: &BudgetPaths,
    settings: &Settings,
    selection: &BudgetSelection,
) -> BudgetResult<BudgetOverviewReport> {
    let mut dashboard = selection.open(paths, settings)?;
    let hidden = HiddenCategories::load(paths.hidden_categories_file())?;
    Ok(BudgetOverviewReport::generate(
        &mut dashboard,
        &settings.base_currency,
        &hidden,
    ))
}

/// Handle `stats`: headline availability figures
pub fn handle_stats_command(
    paths: &BudgetPaths,
    settings: &Settings,
    selection: &BudgetSelection,
    json: bool,
) -> BudgetResult<()> {
    let report = build_report(paths, settings, selection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
    } else {
        print!("{}", report.format_summary());
    }
    Ok(())
}

/// Handle `limits`: category rows with their per-currency breakdown
pub fn handle_limits_command(
    paths: &BudgetPaths,
    settings: &Settings,
    selection: &BudgetSelection,
) -> BudgetResult<()> {
    let report = build_report(paths, settings, selection)?;
    print!("{}", report.format_limits());
    Ok(())
}

/// Handle `report`: the full overview
pub fn handle_report_command(
    paths: &BudgetPaths,
    settings: &Settings,
    selection: &BudgetSelection,
) -> BudgetResult<()> {
    let report = build_report(paths, settings, selection)?;
    print!("{}", report.format_terminal());
    Ok(())
}

/// Handle `export`: write the report to a file, or stdout without `--output`
pub fn handle_export_command(
    paths: &BudgetPaths,
    settings: &Settings,
    selection: &BudgetSelection,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let report = build_report(paths, settings, selection)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(&path).map_err(|e| {
                BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, format, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, format, &mut writer)?;
        }
    }

    tracing::info!(period = %report.period, format = format.extension(), "Report exported");
    Ok(())
}

fn write_report<W: Write>(
    report: &BudgetOverviewReport,
    format: ExportFormat,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Json => export_report_json(report, writer),
        ExportFormat::Yaml => export_report_yaml(report, writer),
        ExportFormat::Csv => export_categories_csv(report, writer),
    }
}
