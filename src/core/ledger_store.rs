//! In-memory ledger mirrored to durable storage on every change.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    core::derivation::LedgerDerivations,
    currency::CurrencyCode,
    errors::{LedgerError, Result},
    ledger::{next_id, Expense, ExpenseDraft, ExpenseId, LedgerSnapshot, LedgerState, PlanningMode},
    storage::{self, BlobStore, LEDGER_KEY},
};

/// Owns the expense records and ledger settings of one session.
pub struct LedgerStore {
    state: LedgerState,
    storage: Arc<dyn BlobStore>,
}

impl LedgerStore {
    /// Restores the persisted ledger, using `fallback` when nothing usable is
    /// stored.
    pub fn open(storage: Arc<dyn BlobStore>, fallback: impl FnOnce() -> LedgerState) -> Self {
        let state = storage::read_json::<LedgerSnapshot>(storage.as_ref(), LEDGER_KEY)
            .and_then(|snapshot| {
                snapshot
                    .map(|snapshot| {
                        LedgerState::from(snapshot)
                            .validated()
                            .map_err(|err| storage::rejected(LEDGER_KEY, err))
                    })
                    .transpose()
            })
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "ignoring unreadable ledger blob");
                None
            })
            .map(LedgerState::from)
            .unwrap_or_else(fallback);
        tracing::debug!(records = state.records.len(), "ledger opened");
        Self { state, storage }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn records(&self) -> &[Expense] {
        &self.state.records
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.snapshot(Utc::now())
    }

    /// Validates `draft` and prepends it as a new record.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<&[Expense]> {
        let draft = draft.validated()?;
        let id = next_id(self.state.ids());
        let mut next = self.state.clone();
        next.records.insert(0, Expense::from_draft(id, draft));
        tracing::debug!(id, "expense added");
        self.commit(next);
        Ok(self.records())
    }

    /// Replaces every field but the id of record `id`. Returns `Ok(false)`
    /// without touching storage when no such record exists.
    pub fn edit(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let draft = draft.validated()?;
        let mut next = self.state.clone();
        next.records[index].apply(draft);
        tracing::debug!(id, "expense edited");
        self.commit(next);
        Ok(true)
    }

    /// Deletes record `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: ExpenseId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let mut next = self.state.clone();
        next.records.remove(index);
        tracing::debug!(id, "expense removed");
        self.commit(next);
        true
    }

    /// Clears all records and restores the default goal, currency and mode.
    /// Callers are expected to have confirmed the action.
    pub fn reset(&mut self) {
        tracing::info!(records = self.state.records.len(), "ledger reset");
        self.commit(LedgerState::default());
    }

    pub fn set_goal(&mut self, goal: f64) -> Result<()> {
        if !goal.is_finite() || goal < 0.0 {
            return Err(LedgerError::validation("goal must be a non-negative number"));
        }
        let mut next = self.state.clone();
        next.goal = goal;
        self.commit(next);
        Ok(())
    }

    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        let currency = CurrencyCode::parse(code)?;
        let mut next = self.state.clone();
        next.currency = currency;
        self.commit(next);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: PlanningMode) {
        let mut next = self.state.clone();
        next.mode = mode;
        self.commit(next);
    }

    pub fn toggle_mode(&mut self) -> PlanningMode {
        let mode = self.state.mode.toggled();
        self.set_mode(mode);
        mode
    }

    /// Sets the goal to the mode-specific suggestion and returns it.
    pub fn apply_suggested_goal(&mut self) -> f64 {
        let goal = self.state.suggested_goal();
        let mut next = self.state.clone();
        next.goal = goal;
        self.commit(next);
        goal
    }

    /// Swaps in `state` wholesale, discarding the current ledger.
    pub fn replace(&mut self, state: LedgerState) {
        self.commit(state);
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.state.records.iter().position(|record| record.id == id)
    }

    fn commit(&mut self, next: LedgerState) {
        self.state = next;
        storage::persist(self.storage.as_ref(), LEDGER_KEY, &self.snapshot());
    }
}
