//! Storage implementations for the JSON documents

pub mod in_memory;
pub mod json_files;

pub use in_memory::InMemoryStore;
pub use json_files::{DEFAULT_DATA_DIR, JsonFileStorage};
