//! Infrastructure layer for llmdesk
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP request gateway, durable storage,
//! and configuration file loading.

pub mod config;
pub mod http;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use http::{HttpAuthApi, RequestGateway, SESSION_EXPIRED_MESSAGE};
pub use storage::{JsonFileStore, MemoryStore};
