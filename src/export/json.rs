use chrono::{DateTime, Utc};

use crate::{errors::Result, ledger::LedgerState};

/// Pretty-printed ledger snapshot, the same shape as the persisted blob.
pub fn render(state: &LedgerState, updated_at: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&state.snapshot(updated_at))?)
}
