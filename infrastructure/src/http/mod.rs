//! HTTP adapters for the llmdesk backend
//!
//! [`RequestGateway`] is the single egress point for backend calls;
//! [`HttpAuthApi`] maps the auth endpoints onto it.

mod auth_api;
mod gateway;

pub use auth_api::{HttpAuthApi, paths};
pub use gateway::{REQUEST_ID_HEADER, RequestGateway, SESSION_EXPIRED_MESSAGE};
