//! Generic reducer-backed store

use llmdesk_domain::Reducer;
use tokio::sync::watch;

/// Owns one [`Reducer`] state and broadcasts every change.
pub struct Store<S> {
    state: watch::Sender<S>,
}

impl<S: Reducer> Store<S> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Apply an action. Subscribers are always notified.
    pub fn dispatch(&self, action: S::Action) {
        self.state.send_modify(move |s| s.reduce(action));
    }

    /// Read the current state without cloning it
    pub fn select<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}

impl<S: Reducer + Clone> Store<S> {
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }
}

impl<S: Reducer + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmdesk_domain::{ChatAction, ChatState};

    #[test]
    fn test_dispatch_updates_state() {
        let store = Store::<ChatState>::default();
        store.dispatch(ChatAction::SetLoading(true));
        assert!(store.select(|s| s.is_loading));
        assert!(store.snapshot().is_loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = Store::<ChatState>::default();
        let mut rx = store.subscribe();
        store.dispatch(ChatAction::SetError(Some("boom".to_string())));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().error.as_deref(), Some("boom"));
    }
}
