pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{LedgerError, Result};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub const LEDGER_KEY: &str = "bg_budget_v1";
pub const TEMPLATES_KEY: &str = "bg_budget_templates_v1";
pub const LIMITS_KEY: &str = "bg_budget_limits_v1";

/// Abstraction over durable keyed storage holding serialized blobs.
pub trait BlobStore: Send + Sync {
    /// Returns the stored blob, or `None` when the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
}

/// Reads and decodes `key`, mapping decode failures to `PersistenceRead`.
pub fn read_json<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| LedgerError::PersistenceRead {
            key: key.to_string(),
            reason: err.to_string(),
        })
}

/// Reports a decoded blob that breaks the ledger rules as unreadable, so
/// callers fall back exactly as they do for malformed JSON.
pub fn rejected(key: &str, err: LedgerError) -> LedgerError {
    LedgerError::PersistenceRead {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

pub fn write_json<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) -> Result<()> {
    let data = serde_json::to_string(value)?;
    store.write(key, &data)
}

/// Loads `key`, falling back to `fallback()` when the blob is missing or
/// unreadable. Failures are logged, never returned.
pub fn load_or_else<T, F>(store: &dyn BlobStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::debug!(key, "no stored blob, using defaults");
            fallback()
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "stored blob unreadable, using defaults");
            fallback()
        }
    }
}

/// Best-effort write: a failure is logged and dropped so the in-memory state
/// stays authoritative until the next successful write.
pub fn persist<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) {
    if let Err(err) = write_json(store, key, value) {
        tracing::warn!(key, error = %err, "persistence write failed; keeping in-memory state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CategoryLimits;

    #[test]
    fn malformed_blob_surfaces_as_read_error() {
        let store = MemoryStore::new();
        store.write(LIMITS_KEY, "{not json").unwrap();
        let err = read_json::<CategoryLimits>(&store, LIMITS_KEY).expect_err("must fail");
        assert!(matches!(err, LedgerError::PersistenceRead { ref key, .. } if key == LIMITS_KEY));
        let limits: CategoryLimits = load_or_else(&store, LIMITS_KEY, CategoryLimits::new);
        assert!(limits.is_empty());
    }

    #[test]
    fn persist_swallows_write_failures() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        persist(&store, LIMITS_KEY, &CategoryLimits::new());
        assert!(store.read(LIMITS_KEY).unwrap().is_none());
    }
}
