//! End-to-end tests for the `ledger` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_LENS_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_with_sample() -> TempDir {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 10 sample transactions"));
    dir
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["report", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ledger init"));
}

#[test]
fn init_twice_keeps_ledger() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"))
        .stdout(predicate::str::contains("Skipped sample data"));
}

#[test]
fn summary_json_over_last_ten_days() {
    let dir = init_with_sample();
    let output = ledger(&dir)
        .args(["report", "summary", "--range", "last-10-days", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_income"], 350000);
    assert_eq!(json["total_expense"], 161425);
    assert_eq!(json["net_balance"], 188575);
    assert_eq!(json["transaction_count"], 10);
}

#[test]
fn export_transactions_csv_header_and_rows() {
    let dir = init_with_sample();
    let output = ledger(&dir)
        .args(["export", "transactions", "--type", "income", "--sort", "amount_desc"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("date,type,category,description,amount"));
    let first = lines.next().unwrap();
    assert!(first.contains(",income,Salary,"));
    assert!(first.ends_with(",3000.00"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn export_to_file_reports_count() {
    let dir = init_with_sample();
    let path = dir.path().join("out.csv");
    ledger(&dir)
        .args(["export", "transactions", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 10 transactions"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 11);
}

#[test]
fn add_rejects_invalid_input() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["txn", "add", "expense", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    ledger(&dir)
        .args(["txn", "add", "expense", "12.50", "--category", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("income transactions"));

    ledger(&dir)
        .args(["txn", "list", "--from", "2025-02-01", "--to", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn add_then_list_by_search() {
    let dir = init_with_sample();
    ledger(&dir)
        .args([
            "txn",
            "add",
            "expense",
            "4.75",
            "--category",
            "food & dining",
            "-m",
            "Espresso, double",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$4.75"));

    ledger(&dir)
        .args(["txn", "list", "--search", "espresso"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Espresso, double"))
        .stdout(predicate::str::contains("Showing 1-1 of 1"));
}

#[test]
fn budget_set_list_and_evaluate() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["budget", "set", "Housing", "1250", "--period", "monthly", "--start", "2000-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing"));

    ledger(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1250.00"))
        .stdout(predicate::str::contains("monthly"));

    let output = ledger(&dir)
        .args(["report", "budgets", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["category"], "Housing");
    assert_eq!(rows[0]["budget_amount"], 125000);
}

#[test]
fn budget_on_income_category_is_rejected() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["budget", "set", "Salary", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expense categories"));
}

#[test]
fn trend_json_has_parallel_series() {
    let dir = init_with_sample();
    let output = ledger(&dir)
        .args(["report", "trend", "--months", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["months"].as_array().unwrap().len(), 3);
    assert_eq!(json["income"].as_array().unwrap().len(), 3);
    assert_eq!(json["expenses"].as_array().unwrap().len(), 3);
}

#[test]
fn trend_rejects_zero_months() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["report", "trend", "--months", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn insights_table_lists_top_category() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["report", "insights"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top spending categories"))
        .stdout(predicate::str::contains("Housing"));
}

#[test]
fn category_list_filters_by_type() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["category", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("8 categories"));
}

fn added_id(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.strip_prefix("Transaction: "))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn edit_updates_and_rechecks_category_type() {
    let dir = init_with_sample();
    let output = ledger(&dir)
        .args(["txn", "add", "expense", "9.99", "--category", "Shopping", "-m", "Socks"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = added_id(&output.stdout);

    ledger(&dir)
        .args(["txn", "edit", &id, "--amount", "12.00", "--category", "Fitness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction"))
        .stdout(predicate::str::contains("$12.00"))
        .stdout(predicate::str::contains("Fitness"));

    ledger(&dir)
        .args(["txn", "edit", &id, "--type", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expense transactions"));

    ledger(&dir)
        .args(["txn", "list", "--search", "socks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$12.00"))
        .stdout(predicate::str::contains("expense"));
}

#[test]
fn edit_unknown_transaction_fails() {
    let dir = init_with_sample();
    ledger(&dir)
        .args(["txn", "edit", "txn-00000000", "--amount", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn insights_json_includes_largest_transaction() {
    let dir = init_with_sample();
    let output = ledger(&dir)
        .args(["report", "insights", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let largest = &json["largest_transaction"];
    assert_eq!(largest["amount"], 300000);
    assert_eq!(largest["category"], "Salary");
    assert_eq!(largest["type"], "income");
}
