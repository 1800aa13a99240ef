//! HTTP handlers, one module per resource

pub mod customers;
pub mod invoices;
pub mod settings;
