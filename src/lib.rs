//! # Invoicer
//!
//! A small invoicing backend: customers, invoices with computed totals,
//! PDF export and a settings record, all kept in memory and rewritten to
//! three JSON documents after every change.
//!
//! ## Features
//!
//! - **JSON REST API**: invoices, customers and settings under `/api`
//! - **Computed Totals**: line amounts, subtotal and total recomputed on create
//! - **Customer Snapshots**: invoices copy the customer's contact details at creation
//! - **Templates**: any invoice can be flagged as a named template
//! - **PDF Export**: fixed single-page A4 layout rendered with printpdf
//! - **File Storage**: `invoices.json`, `customers.json`, `meta.json` in a configurable directory
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoicer::prelude::*;
//!
//! let ledger = Ledger::open(JsonFileStorage::new("data"), Settings::default());
//!
//! ServerBuilder::new()
//!     .with_ledger(ledger)
//!     .with_static_dir("static")
//!     .serve("0.0.0.0:8080")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod pdf;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        Client, CompanyInfo, Customer, Invoice, InvoiceItem, Ledger, Meta, RecordId, Settings,
    };

    // === Errors ===
    pub use crate::core::{
        EntityError, InvoicerError, InvoicerResult, RenderError, RequestError, StorageError,
    };

    // === Storage ===
    pub use crate::core::{DocumentStore, Snapshot};
    pub use crate::storage::{InMemoryStore, JsonFileStorage};

    // === Config ===
    pub use crate::config::AppConfig;

    // === PDF ===
    pub use crate::pdf::{DrawingSurface, PdfSurface, render_invoice};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === Re-exports from external crates ===
    pub use axum::{Json, Router};
}
