#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use budget_ledger::{
    core::{BudgetSession, SessionOptions},
    ledger::{Category, ExpenseDraft},
    storage::JsonFileStore,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that stays alive until the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn file_store(home: &PathBuf) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(Some(home.join("data"))).expect("create json store"))
}

/// Opens a session on `home`, seeding nothing unless `seed_demo` is set.
pub fn open_session(home: &PathBuf, seed_demo: bool) -> BudgetSession {
    BudgetSession::open(
        file_store(home),
        SessionOptions {
            seed_demo,
            ..SessionOptions::default()
        },
    )
}

pub fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).expect("valid october date")
}

pub fn draft(name: &str, amount: f64, category: Category, on: u32) -> ExpenseDraft {
    ExpenseDraft::new(name, amount, category, day(on), false)
}
