mod common;

use std::fs;

use budget_ledger::{
    core::LedgerDerivations,
    ledger::{Category, LedgerState, PlanningMode},
    storage::{BlobStore, LEDGER_KEY, TEMPLATES_KEY},
};
use common::{draft, file_store, open_session, temp_home};

#[test]
fn records_survive_a_restart() {
    let home = temp_home();
    let mut session = open_session(&home, false);
    session
        .ledger_mut()
        .add(draft("Flight", 420.0, Category::Transport, 11))
        .unwrap();
    session
        .ledger_mut()
        .add(draft("Hotel", 360.0, Category::Accommodation, 12))
        .unwrap();
    session.ledger_mut().set_goal(1200.0).unwrap();

    let reopened = open_session(&home, true);
    let state = reopened.ledger().state();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.total(), 780.0);
    assert_eq!(state.category_totals()[&Category::Transport], 420.0);
    assert_eq!(state.progress(state.goal), 65);
}

#[test]
fn stored_blob_uses_camel_case_snapshot() {
    let home = temp_home();
    let mut session = open_session(&home, true);
    session.ledger_mut().set_mode(PlanningMode::Monthly);

    let raw = fs::read_to_string(home.join("data").join("bg_budget_v1.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["mode"], "Monthly");
    assert_eq!(value["currency"], "USD");
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert!(value["updatedAt"].is_string());
}

#[test]
fn legacy_expenses_field_is_accepted() {
    let home = temp_home();
    let store = file_store(&home);
    store
        .write(
            LEDGER_KEY,
            r#"{"expenses":[{"id":7,"name":"Bus","amount":12.5,"category":"Transport","date":"2025-10-02"}],
                "goal":100,"currency":"EUR","mode":"Trip","updatedAt":"2025-10-02T10:00:00Z"}"#,
        )
        .unwrap();

    let session = open_session(&home, true);
    let state = session.ledger().state();
    assert_eq!(state.records.len(), 1);
    assert!(!state.records[0].recurring);
    assert_eq!(state.currency.as_str(), "EUR");
}

#[test]
fn malformed_blob_falls_back_to_seed() {
    let home = temp_home();
    file_store(&home).write(LEDGER_KEY, "{ definitely not json").unwrap();
    let session = open_session(&home, true);
    assert_eq!(session.ledger().state(), &LedgerState::demo());
}

#[test]
fn blob_with_invalid_records_falls_back_to_seed() {
    let home = temp_home();
    file_store(&home)
        .write(
            LEDGER_KEY,
            r#"{"records":[
                {"id":7,"name":"","amount":-5,"category":"Food","date":"2025-10-02"},
                {"id":7,"name":"Dup","amount":10,"category":"Food","date":"2025-10-02"}],
                "goal":100,"currency":"USD","mode":"Trip"}"#,
        )
        .unwrap();

    let mut session = open_session(&home, true);
    assert_eq!(session.ledger().state(), &LedgerState::demo());
    assert!(!session.ledger_mut().remove(7));
    assert_eq!(session.ledger().state().total(), 930.0);
}

#[test]
fn template_with_repeated_ids_is_not_applied() {
    let home = temp_home();
    file_store(&home)
        .write(
            TEMPLATES_KEY,
            r#"[{"id":11,"name":"Broken","createdAt":"2025-10-02T10:00:00Z","records":[
                {"id":7,"name":"Tea","amount":3,"category":"Food","date":"2025-10-02"},
                {"id":7,"name":"Dup","amount":10,"category":"Food","date":"2025-10-02"}],
                "goal":100,"currency":"USD","mode":"Trip"}]"#,
        )
        .unwrap();

    let mut session = open_session(&home, true);
    assert!(session.templates().list().is_empty());
    assert!(!session.load_template(11));
    assert_eq!(session.ledger().state(), &LedgerState::demo());
}

#[test]
fn rejected_input_changes_nothing() {
    let home = temp_home();
    let mut session = open_session(&home, true);
    let before = session.ledger().state().clone();
    assert!(session
        .ledger_mut()
        .add(draft("Souvenir", -3.0, Category::Shopping, 13))
        .is_err());
    assert!(session.ledger_mut().set_goal(f64::INFINITY).is_err());
    assert!(session.ledger_mut().set_currency("").is_err());
    assert_eq!(session.ledger().state(), &before);
}

#[test]
fn reset_is_persisted() {
    let home = temp_home();
    let mut session = open_session(&home, true);
    session.ledger_mut().reset();
    let reopened = open_session(&home, true);
    assert_eq!(reopened.ledger().state(), &LedgerState::default());
}
