//! API exposure
//!
//! Only REST is exposed; the browser frontend talks JSON over HTTP.

pub mod rest;

pub use rest::RestExposure;
