//! Shared handler state

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::{InvoicerError, InvoicerResult};
use crate::core::ledger::Ledger;

/// State cloned into every handler
///
/// The ledger sits behind one mutex so each request's
/// read, mutate and persist steps run without interleaving.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Lock the ledger for the duration of one operation
    pub fn ledger(&self) -> InvoicerResult<MutexGuard<'_, Ledger>> {
        self.ledger
            .lock()
            .map_err(|e| InvoicerError::Internal(format!("ledger lock poisoned: {}", e)))
    }
}
