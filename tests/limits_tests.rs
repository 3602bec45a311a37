mod common;

use budget_ledger::ledger::Category;
use common::{draft, open_session, temp_home};

#[test]
fn food_over_its_limit_is_flagged() {
    let home = temp_home();
    let mut session = open_session(&home, false);
    session
        .limits_mut()
        .set_limit(Category::Food, Some(100.0))
        .unwrap();
    session
        .ledger_mut()
        .add(draft("Tapas", 150.0, Category::Food, 12))
        .unwrap();

    assert_eq!(session.summary().over_budget, vec![Category::Food]);
}

#[test]
fn spending_equal_to_limit_is_not_over() {
    let home = temp_home();
    let mut session = open_session(&home, false);
    session
        .limits_mut()
        .set_limit(Category::Shopping, Some(80.0))
        .unwrap();
    session
        .ledger_mut()
        .add(draft("Scarf", 80.0, Category::Shopping, 12))
        .unwrap();
    assert!(session.summary().over_budget.is_empty());
}

#[test]
fn limits_persist_separately_from_the_ledger() {
    let home = temp_home();
    let mut session = open_session(&home, true);
    session
        .limits_mut()
        .set_limit(Category::Transport, Some(300.0))
        .unwrap();
    session.ledger_mut().reset();

    let reopened = open_session(&home, true);
    assert_eq!(reopened.limits().limit(Category::Transport), Some(300.0));
    assert!(reopened.ledger().records().is_empty());
    assert!(home.join("data").join("bg_budget_limits_v1.json").exists());
}
