//! End-to-end tests for the hbudget binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BUDGET: &str = "6f1c2d3e-0000-4000-8000-000000000001";
const FOOD: &str = "6f1c2d3e-0000-4000-8000-000000000002";
const LOAN: &str = "6f1c2d3e-0000-4000-8000-000000000003";
const SALARY: &str = "6f1c2d3e-0000-4000-8000-000000000004";

fn hbudget(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hbudget").unwrap();
    cmd.env("HBUDGET_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

/// January 2025: Food planned at 50,000 with 62,000 spent, salary received
/// at 95,000 of 100,000 expected, one pending loan installment of 10,000
fn write_fixture(dir: &Path) {
    let data = dir.join("data");
    fs::create_dir_all(&data).unwrap();

    fs::write(
        data.join("budgets.json"),
        format!(r#"[{{"id": "{BUDGET}", "name": "January", "period": "2025-01"}}]"#),
    )
    .unwrap();
    fs::write(
        data.join("budget_items.json"),
        format!(
            r#"[{{
                "budgetId": "{BUDGET}",
                "categoryId": "{FOOD}",
                "categoryName": "Food",
                "plannedAmount": 50000,
                "totalLimit": 50000,
                "plannedExpensesSum": 50000,
                "currencyLimits": null
            }}]"#
        ),
    )
    .unwrap();
    fs::write(
        data.join("planned_expenses.json"),
        format!(
            r#"[{{
                "id": "{LOAN}",
                "budgetId": "{BUDGET}",
                "categoryId": "{FOOD}",
                "description": "Loan installment",
                "plannedAmount": 10000,
                "currency": "RUB",
                "status": "pending",
                "actualAmount": {{"Float64": 0, "Valid": false}},
                "plannedDate": {{"Time": "2025-01-10T00:00:00Z", "Valid": true}}
            }}]"#
        ),
    )
    .unwrap();
    fs::write(
        data.join("planned_incomes.json"),
        format!(
            r#"[{{
                "id": "{SALARY}",
                "budgetId": "{BUDGET}",
                "description": "Salary",
                "expectedAmount": 100000,
                "currency": "RUB",
                "status": "received",
                "actualAmount": {{"value": 95000, "isPresent": true}}
            }}]"#
        ),
    )
    .unwrap();
    fs::write(
        data.join("expenses.json"),
        format!(
            r#"[
                {{"id": "6f1c2d3e-0000-4000-8000-000000000010", "categoryId": "{FOOD}", "amount": 62000, "date": "2025-01-15"}},
                {{"id": "6f1c2d3e-0000-4000-8000-000000000011", "categoryId": "{FOOD}", "amount": 999, "date": "2025-02-01"}}
            ]"#
        ),
    )
    .unwrap();
}

#[test]
fn test_init_creates_settings() {
    let temp = TempDir::new().unwrap();

    hbudget(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(temp.path().join("config.json").exists());
    assert!(temp.path().join("data").join("budgets.json").exists());

    hbudget(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn test_init_after_config_set_creates_snapshot_files() {
    let temp = TempDir::new().unwrap();

    hbudget(temp.path())
        .args(["config", "set", "log_level", "info"])
        .assert()
        .success();

    hbudget(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(temp.path().join("data").join("expenses.json").exists());
}

#[test]
fn test_stats_json() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    hbudget(temp.path())
        .args(["stats", "--period", "2025-01", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""totalPlanned": 50000"#))
        .stdout(predicate::str::contains(r#""totalActual": 62000"#))
        .stdout(predicate::str::contains(r#""variance": -12000"#))
        .stdout(predicate::str::contains(r#""isOverBudget": true"#))
        .stdout(predicate::str::contains(r#""availableForPlanning": 40000"#))
        .stdout(predicate::str::contains(r#""actuallyAvailable": 33000"#));
}

#[test]
fn test_budget_selected_by_id() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    hbudget(temp.path())
        .args(["report", "--budget", BUDGET])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Overview - January (2025-01)"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn test_confirm_planned_expense_updates_availability() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    hbudget(temp.path())
        .args(["planned", "confirm", LOAN, "--actual", "9500", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed 'Loan installment'"))
        .stdout(predicate::str::contains("Available for planning: ₽50,000.00"));

    // Terminal statuses do not revert
    hbudget(temp.path())
        .args(["planned", "skip", LOAN, "--period", "2025-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot become skipped"));
}

#[test]
fn test_hidden_category_leaves_totals() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    hbudget(temp.path())
        .args(["category", "hide", "food", "--period", "2025-01"])
        .assert()
        .success();

    hbudget(temp.path())
        .args(["report", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No budget categories"))
        .stdout(predicate::str::contains("(1 hidden categories)"))
        .stdout(predicate::str::contains("₽33,000.00"));

    hbudget(temp.path())
        .args(["category", "hidden", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FOOD));
}

#[test]
fn test_export_csv_file() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());
    let target = temp.path().join("out").join("january.csv");

    hbudget(temp.path())
        .args(["export", "--period", "2025-01", "--format", "csv", "--output"])
        .arg(&target)
        .assert()
        .success();

    let text = fs::read_to_string(target).unwrap();
    assert!(text.starts_with("Period,Category ID,Category,Currency"));
    assert!(text.contains("Food,RUB,50000.00,62000.00,-12000.00,124,true"));
}

#[test]
fn test_export_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();

    hbudget(temp.path())
        .args(["export", "--format", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_unknown_budget_fails() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    hbudget(temp.path())
        .args(["stats", "--budget", "6f1c2d3e-0000-4000-8000-0000000000ff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget not found"));
}

#[test]
fn test_config_set_and_show() {
    let temp = TempDir::new().unwrap();

    hbudget(temp.path())
        .args(["config", "set", "base_currency", "eur"])
        .assert()
        .success();

    hbudget(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_currency:  EUR"));
}
