use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget_ledger_cli").unwrap();
    cmd.env("BUDGET_LEDGER_CLI_SCRIPT", "1")
        .env("BUDGET_LEDGER_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn first_run_shows_the_demo_summary() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Total spent").and(contains("$930.00")))
        .stdout(contains("78%"));
}

#[test]
fn script_flow_persists_between_runs() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin(
            "# fresh trip\nreset\nadd \"Night train\" 89.90 transport 2025-10-20 --recurring\ngoal 500\nexit\n",
        )
        .assert()
        .success()
        .stdout(contains("[ok] Added `Night train`"))
        .stdout(contains("Goal set to $500.00."));

    let blob = fs::read_to_string(home.path().join("data").join("bg_budget_v1.json")).unwrap();
    assert!(blob.contains("Night train"));

    script_cmd(&home)
        .write_stdin("list\nsummary\n")
        .assert()
        .success()
        .stdout(contains("Night train"))
        .stdout(contains("$89.90"));
}

#[test]
fn invalid_input_is_reported_without_aborting() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("add Snack -4 food\nsumary\nbuffer 20\nexit\n")
        .assert()
        .success()
        .stderr(contains("positive amount"))
        .stdout(contains("Did you mean"))
        .stdout(contains("Buffer set to 20%."));
}

#[test]
fn over_limit_categories_are_flagged() {
    let home = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin("limit food 100\nsummary\nlimits\n")
        .assert()
        .success()
        .stdout(contains("Food is over its limit"))
        .stdout(contains("OVER"));
}

#[test]
fn export_writes_into_the_requested_directory() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    script_cmd(&home)
        .write_stdin(format!("export csv {}\nexit\n", out.path().display()))
        .assert()
        .success()
        .stdout(contains("Exported csv"));
    let written: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
}
