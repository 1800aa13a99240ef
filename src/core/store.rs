//! Persistence trait for the three JSON documents

use super::error::StorageError;
use super::model::{Customer, Invoice, Meta};
use std::path::PathBuf;

/// Everything read back from storage at start-up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub invoices: Vec<Invoice>,
    pub customers: Vec<Customer>,
    pub meta: Meta,
}

/// Backend that loads and saves the complete application state
///
/// Implementations hold no business logic. `save` always receives the full
/// state and rewrites every document.
pub trait DocumentStore: Send + Sync {
    /// Load all documents
    ///
    /// Never fails: missing documents are empty and unreadable ones are
    /// logged and replaced by their default.
    fn load(&self) -> Snapshot;

    /// Rewrite all documents, stopping at the first failure
    fn save(
        &self,
        invoices: &[Invoice],
        customers: &[Customer],
        meta: &Meta,
    ) -> Result<(), StorageError>;

    /// Redirect future loads and saves; an empty path is ignored
    ///
    /// Files already written to the previous directory stay where they are.
    fn set_data_directory(&mut self, dir: &str);

    /// Directory currently used for the documents
    fn data_directory(&self) -> PathBuf;
}
