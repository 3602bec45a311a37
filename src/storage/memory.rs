use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};

use super::BlobStore;
use crate::errors::{LedgerError, Result};

/// In-process blob store, handy for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail as if storage quota were exhausted.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.blobs().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // Writes are single map operations, so a poisoned map is still consistent.
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs().get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::PersistenceWrite {
                key: key.to_string(),
                reason: "storage quota exceeded".into(),
            });
        }
        self.blobs().insert(key.to_string(), data.to_string());
        Ok(())
    }
}
