//! HTTP server
//!
//! `ServerBuilder` wires the shared ledger into:
//! - invoice and customer routes, through their entity descriptors
//! - settings and health routes
//! - the static frontend fallback

pub mod builder;
pub mod descriptors;
pub mod entity_registry;
pub mod exposure;
pub mod extractors;
pub mod handlers;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry, EntityRoute};
pub use state::AppState;
