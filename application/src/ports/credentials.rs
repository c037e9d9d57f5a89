//! Credential ports used by the request gateway.
//!
//! The gateway reads the current token and reports rejected tokens through
//! these two traits, so it never depends on the session store directly.

/// Source of the bearer credential for outgoing requests
pub trait CredentialProvider: Send + Sync {
    /// Token to attach, or `None` to send the request unauthenticated
    fn current_token(&self) -> Option<String>;
}

/// Receiver of "this credential was rejected" signals
pub trait SessionInvalidator: Send + Sync {
    /// End the session backed by `rejected_token`.
    ///
    /// Returns `true` only if this call actually ended a session. A token
    /// that is no longer current (already logged out, or replaced by a newer
    /// login) is ignored and yields `false`.
    fn invalidate(&self, rejected_token: &str) -> bool;
}
