use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::LedgerError;

pub type ExpenseId = u64;

/// A single planned or incurred expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    /// Descriptive tag only; no occurrences are projected from it.
    #[serde(default)]
    pub recurring: bool,
}

impl Expense {
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            recurring: draft.recurring,
        }
    }

    /// Overwrites every field except the identifier.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.name = draft.name;
        self.amount = draft.amount;
        self.category = draft.category;
        self.date = draft.date;
        self.recurring = draft.recurring;
    }
}

/// User-supplied fields for a new or edited expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub recurring: bool,
}

impl ExpenseDraft {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category: Category,
        date: NaiveDate,
        recurring: bool,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            category,
            date,
            recurring,
        }
    }

    /// Trims the name and rejects empty names or non-positive amounts.
    pub fn validated(mut self) -> Result<Self, LedgerError> {
        self.name = self.name.trim().to_string();
        check_fields(&self.name, self.amount)?;
        Ok(self)
    }
}

fn check_fields(name: &str, amount: f64) -> Result<(), LedgerError> {
    if name.trim().is_empty() || !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::validation(
            "Please provide a name and a positive amount.",
        ));
    }
    Ok(())
}

/// Applies the draft rules to already stored records and rejects repeated ids.
pub fn check_records(records: &[Expense]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        check_fields(&record.name, record.amount)
            .map_err(|_| {
                LedgerError::validation(format!(
                    "record {} needs a name and a positive amount",
                    record.id
                ))
            })?;
        if !seen.insert(record.id) {
            return Err(LedgerError::validation(format!(
                "record id {} appears more than once",
                record.id
            )));
        }
    }
    Ok(())
}

/// Returns a fresh identifier: the current time in milliseconds, bumped past
/// every identifier already in use so ids stay unique and increasing.
pub fn next_id(existing: impl IntoIterator<Item = u64>) -> u64 {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let floor = existing
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1));
    now.max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 11).unwrap()
    }

    #[test]
    fn validation_trims_and_accepts_positive_amounts() {
        let draft = ExpenseDraft::new("  Museum pass ", 35.0, Category::Activities, date(), false)
            .validated()
            .expect("valid draft");
        assert_eq!(draft.name, "Museum pass");
    }

    #[test]
    fn validation_rejects_blank_names_and_bad_amounts() {
        for (name, amount) in [("   ", 10.0), ("Taxi", 0.0), ("Taxi", -4.0), ("Taxi", f64::NAN)] {
            let err = ExpenseDraft::new(name, amount, Category::Transport, date(), false)
                .validated()
                .expect_err("draft must be rejected");
            assert!(matches!(err, LedgerError::Validation(_)));
        }
    }

    #[test]
    fn stored_records_follow_draft_rules() {
        let record = |id, name: &str, amount| Expense {
            id,
            name: name.to_string(),
            amount,
            category: Category::Food,
            date: date(),
            recurring: false,
        };
        assert!(check_records(&[record(1, "Lunch", 12.0), record(2, "Tea", 3.5)]).is_ok());
        assert!(check_records(&[record(1, " ", 12.0)]).is_err());
        assert!(check_records(&[record(1, "Lunch", -5.0)]).is_err());
        assert!(check_records(&[record(7, "Lunch", 5.0), record(7, "Dup", 10.0)]).is_err());
    }

    #[test]
    fn next_id_moves_past_existing_ids() {
        let far_future = u64::MAX - 10;
        assert_eq!(next_id([3, far_future, 7]), far_future + 1);
        let fresh = next_id([1, 2, 3]);
        assert!(fresh > 3);
    }
}
