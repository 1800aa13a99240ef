//! Core module containing the domain records and the operations on them

pub mod calculator;
pub mod error;
pub mod ledger;
pub mod model;
pub mod sequence;
pub mod store;

pub use error::{
    EntityError, ErrorResponse, InvoicerError, InvoicerResult, RenderError, RequestError,
    StorageError,
};
pub use ledger::Ledger;
pub use model::{
    Client, CompanyInfo, Customer, Invoice, InvoiceItem, Meta, RecordId, Settings,
};
pub use sequence::IdSequence;
pub use store::{DocumentStore, Snapshot};
