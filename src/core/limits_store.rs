use std::sync::Arc;

use crate::{
    errors::{LedgerError, Result},
    ledger::{Category, CategoryLimits},
    storage::{self, BlobStore, LIMITS_KEY},
};

/// Per-category spending caps, persisted independently of the ledger.
pub struct LimitsStore {
    limits: CategoryLimits,
    storage: Arc<dyn BlobStore>,
}

impl LimitsStore {
    pub fn open(storage: Arc<dyn BlobStore>) -> Self {
        let limits = storage::load_or_else(storage.as_ref(), LIMITS_KEY, CategoryLimits::new);
        Self { limits, storage }
    }

    pub fn limits(&self) -> &CategoryLimits {
        &self.limits
    }

    pub fn limit(&self, category: Category) -> Option<f64> {
        self.limits.get(category)
    }

    /// Sets or clears the cap for `category`. Zero or `None` clears it.
    pub fn set_limit(&mut self, category: Category, limit: Option<f64>) -> Result<()> {
        if let Some(value) = limit {
            if !value.is_finite() || value < 0.0 {
                return Err(LedgerError::validation(
                    "limit must be a non-negative number",
                ));
            }
        }
        self.limits.set(category, limit);
        tracing::debug!(%category, ?limit, "category limit updated");
        storage::persist(self.storage.as_ref(), LIMITS_KEY, &self.limits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn limits_round_trip_through_storage() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = LimitsStore::open(backend.clone());
        store.set_limit(Category::Food, Some(100.0)).unwrap();
        store.set_limit(Category::Shopping, Some(50.0)).unwrap();
        store.set_limit(Category::Shopping, None).unwrap();

        let reopened = LimitsStore::open(backend);
        assert_eq!(reopened.limit(Category::Food), Some(100.0));
        assert_eq!(reopened.limit(Category::Shopping), None);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let mut store = LimitsStore::open(Arc::new(MemoryStore::new()));
        assert!(store.set_limit(Category::Food, Some(-5.0)).is_err());
        assert!(store.set_limit(Category::Food, Some(f64::NAN)).is_err());
        assert!(store.limits().is_empty());
    }

    #[test]
    fn zero_clears_existing_limit() {
        let mut store = LimitsStore::open(Arc::new(MemoryStore::new()));
        store.set_limit(Category::Transport, Some(80.0)).unwrap();
        store.set_limit(Category::Transport, Some(0.0)).unwrap();
        assert_eq!(store.limit(Category::Transport), None);
    }
}
