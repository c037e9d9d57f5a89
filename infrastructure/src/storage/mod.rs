//! Durable storage adapters for the [`KeyValueStore`] port
//!
//! [`KeyValueStore`]: llmdesk_application::KeyValueStore

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
