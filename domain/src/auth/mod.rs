//! Authentication domain.
//!
//! - [`entities::User`]: the identity record returned by the backend
//! - [`credentials`]: validated login / registration / password-change forms
//! - [`session::SessionState`]: the session reducer and its events/effects

pub mod credentials;
pub mod entities;
pub mod session;
