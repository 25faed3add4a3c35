use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finsight(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("finsight").unwrap();
    cmd.env("FINSIGHT_DATA_DIR", dir).env_remove("FINSIGHT_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    finsight(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starter categories"));
    dir
}

fn add_march_activity(dir: &Path) {
    finsight(dir)
        .args(["txn", "add", "3000", "-c", "Salary", "-d", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income of $3000.00 on 2025-03-01"));
    finsight(dir)
        .args(["txn", "add", "42.50", "-c", "Groceries", "-d", "2025-03-05"])
        .args(["-m", "Weekly shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense of $42.50"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    finsight(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("finsight init"));
}

#[test]
fn test_init_twice_keeps_data() {
    let dir = initialized();
    finsight(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("left untouched"));
}

#[test]
fn test_category_lifecycle() {
    let dir = initialized();

    finsight(dir.path())
        .args(["category", "create", "Pets", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category"));

    finsight(dir.path())
        .args(["category", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pets").and(predicate::str::contains("Salary").not()));

    finsight(dir.path())
        .args(["category", "create", "pets", "--type", "expense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    finsight(dir.path())
        .args(["category", "delete", "Pets"])
        .assert()
        .success();
}

#[test]
fn test_category_in_use_cannot_be_deleted() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["category", "delete", "Groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete"));
}

#[test]
fn test_transaction_needs_type_or_category() {
    let dir = initialized();
    finsight(dir.path())
        .args(["txn", "add", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type"));
}

#[test]
fn test_transaction_list_filters() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["transaction", "list", "--period", "2025-03", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly shop").and(predicate::str::contains("1 transaction")));

    finsight(dir.path())
        .args(["transaction", "list", "--period", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_budget_status() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["budget", "create", "Groceries", "400", "--start", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created monthly budget of $400.00 for Groceries"));

    finsight(dir.path())
        .args(["budget", "create", "Groceries", "300", "--start", "2025-03-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget error"));

    finsight(dir.path())
        .args(["budget", "create", "Salary", "300"])
        .assert()
        .failure();

    finsight(dir.path())
        .args(["budget", "status", "--date", "2025-03-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_goal_contributions() {
    let dir = initialized();

    finsight(dir.path())
        .args(["goal", "create", "Emergency Fund", "1000"])
        .assert()
        .success();

    finsight(dir.path())
        .args(["goal", "contribute", "Emergency Fund", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.0%"));

    finsight(dir.path())
        .args(["goal", "withdraw", "Emergency Fund", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal error"));
}

#[test]
fn test_reports() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["report", "summary", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Summary").and(predicate::str::contains("$3000.00")));

    finsight(dir.path())
        .args(["report", "categories", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));

    finsight(dir.path())
        .args(["report", "health", "--period", "2025-03", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\"").and(predicate::str::contains("\"grade\"")));

    finsight(dir.path())
        .args(["report", "trends", "--period", "2025", "--granularity", "monthly"])
        .assert()
        .success();

    finsight(dir.path())
        .args(["report", "summary", "--period", "next-week"])
        .assert()
        .failure();
}

#[test]
fn test_export() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("id,date,type,category,description,amount,notes")
                .and(predicate::str::contains("Weekly shop")),
        );

    let output = dir.path().join("backup.json");
    finsight(dir.path())
        .args(["export", "json", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let contents = std::fs::read_to_string(output).unwrap();
    assert!(contents.contains("\"schema_version\""));
    assert!(contents.contains("Weekly shop"));
}

#[test]
fn test_history_and_config() {
    let dir = initialized();
    add_march_activity(dir.path());

    finsight(dir.path())
        .args(["history", "-n", "1", "--entity", "transaction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"));

    finsight(dir.path())
        .args(["config", "set", "currency_symbol", "€"])
        .assert()
        .success();

    finsight(dir.path())
        .args(["report", "summary", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€3000.00"));

    finsight(dir.path())
        .args(["config", "set", "budget_alert_threshold", "0"])
        .assert()
        .failure();
}
