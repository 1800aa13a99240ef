//! Flat-file storage: one indented JSON document per collection
//!
//! # Files
//!
//! - `invoices.json`: array of invoices in insertion order
//! - `customers.json`: array of customers in insertion order
//! - `meta.json`: id counters plus the settings record
//!
//! Documents are rewritten in place on every save. There is no
//! write-then-rename step, so a crash mid-write can leave a truncated file;
//! the next load then logs it and starts that collection empty.

use crate::core::error::StorageError;
use crate::core::model::{Customer, Invoice, Meta};
use crate::core::store::{DocumentStore, Snapshot};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const INVOICES_FILE: &str = "invoices.json";
pub const CUSTOMERS_FILE: &str = "customers.json";
pub const META_FILE: &str = "meta.json";

/// Directory used when none is configured
pub const DEFAULT_DATA_DIR: &str = "data";

/// JSON document storage rooted at a directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `data_dir` (empty falls back to `data`)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let data_dir = if data_dir.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_DATA_DIR)
        } else {
            data_dir
        };
        Self { data_dir }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Io {
            path: self.data_dir.clone(),
            source,
        })
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Read a document, falling back to its default when absent or malformed
///
/// A literal `null` document is treated like an absent one.
fn read_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read document");
            return T::default();
        }
    };

    match serde_json::from_slice::<Option<T>>(&bytes) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed document, starting empty");
            T::default()
        }
    }
}

fn write_document<T: Serialize + ?Sized>(
    path: &Path,
    document: &'static str,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|source| StorageError::Encode { document, source })?;
    std::fs::write(path, bytes).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DocumentStore for JsonFileStorage {
    fn load(&self) -> Snapshot {
        if let Err(e) = self.ensure_dir() {
            tracing::warn!(error = %e, "could not create data directory");
            return Snapshot::default();
        }

        let invoices: Vec<Invoice> = read_document(&self.path(INVOICES_FILE));
        let customers: Vec<Customer> = read_document(&self.path(CUSTOMERS_FILE));
        let meta: Meta = read_document(&self.path(META_FILE));

        tracing::info!(
            dir = %self.data_dir.display(),
            invoices = invoices.len(),
            customers = customers.len(),
            next_id = meta.next_id,
            next_customer_id = meta.next_customer_id,
            "loaded documents"
        );

        Snapshot {
            invoices,
            customers,
            meta,
        }
    }

    fn save(
        &self,
        invoices: &[Invoice],
        customers: &[Customer],
        meta: &Meta,
    ) -> Result<(), StorageError> {
        self.ensure_dir()?;
        write_document(&self.path(INVOICES_FILE), "invoices", invoices)?;
        write_document(&self.path(CUSTOMERS_FILE), "customers", customers)?;
        write_document(&self.path(META_FILE), "meta", meta)?;
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
