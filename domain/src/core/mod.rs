//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors (validation happens here)
//! - [`keys`]: names of the durable client-side storage slots
//! - [`provider::ProviderId`]: the LLM vendors the platform talks to
//! - [`string`]: small text helpers for display

pub mod error;
pub mod keys;
pub mod provider;
pub mod string;
