//! In-memory implementation of DocumentStore for testing and development

use crate::core::error::StorageError;
use crate::core::model::{Customer, Invoice, Meta};
use crate::core::store::{DocumentStore, Snapshot};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// In-memory document store
///
/// Keeps the last saved snapshot behind an `Arc<RwLock<_>>` so clones share
/// it; tests hold one clone and hand the other to the ledger.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    saved: Arc<RwLock<Snapshot>>,
    saves: Arc<RwLock<usize>>,
    data_dir: PathBuf,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose first `load` returns `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Arc::new(RwLock::new(snapshot)),
            ..Self::default()
        }
    }

    /// Last saved state
    pub fn snapshot(&self) -> Result<Snapshot, StorageError> {
        self.saved
            .read()
            .map(|s| s.clone())
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or_default()
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self) -> Snapshot {
        self.snapshot().unwrap_or_default()
    }

    fn save(
        &self,
        invoices: &[Invoice],
        customers: &[Customer],
        meta: &Meta,
    ) -> Result<(), StorageError> {
        let mut saved = self
            .saved
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;

        *saved = Snapshot {
            invoices: invoices.to_vec(),
            customers: customers.to_vec(),
            meta: meta.clone(),
        };

        let mut saves = self
            .saves
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        *saves += 1;

        Ok(())
    }

    fn set_data_directory(&mut self, dir: &str) {
        if !dir.is_empty() {
            self.data_dir = PathBuf::from(dir);
        }
    }

    fn data_directory(&self) -> PathBuf {
        self.data_dir.clone()
    }
}
