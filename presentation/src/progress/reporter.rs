//! Progress reporting while a session transition is in flight

use indicatif::{ProgressBar, ProgressStyle};
use llmdesk_domain::{SessionPhase, SessionState};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spinner driven by session state: visible while any transition is pending.
pub struct SessionSpinner {
    bar: ProgressBar,
    watcher: JoinHandle<()>,
}

impl SessionSpinner {
    /// Start following `state`. Must be called inside a tokio runtime.
    pub fn follow(mut state: watch::Receiver<SessionState>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());

        let watched = bar.clone();
        let watcher = tokio::spawn(async move {
            loop {
                let label = {
                    let current = state.borrow_and_update();
                    current.is_loading().then(|| phase_label(current.phase()))
                };
                match label {
                    Some(label) => {
                        watched.set_message(label);
                        watched.enable_steady_tick(Duration::from_millis(100));
                    }
                    None => {
                        watched.disable_steady_tick();
                        watched.set_message("");
                    }
                }
                if state.changed().await.is_err() {
                    break;
                }
            }
        });

        Self { bar, watcher }
    }

    /// Stop following and clear the spinner line
    pub fn finish(self) {
        self.watcher.abort();
        self.bar.finish_and_clear();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

/// Spinner message for a phase
pub fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Authenticating => "Signing in...",
        SessionPhase::Hydrating => "Restoring session...",
        SessionPhase::Authenticated | SessionPhase::Anonymous | SessionPhase::Error => {
            "Working..."
        }
    }
}
