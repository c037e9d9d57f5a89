//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod auth_api;
pub mod credentials;
pub mod key_value_store;
pub mod notifier;
