//! Durable storage keys.
//!
//! The client persists exactly two plain-string values across restarts.

/// Bearer credential of the last authenticated session.
pub const TOKEN: &str = "token";

/// UI color scheme preference (`light` / `dark`).
pub const THEME: &str = "theme";
