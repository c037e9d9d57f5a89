//! State stores
//!
//! Each store is the single writer of one state slice. Readers take
//! snapshots or subscribe to a `tokio::sync::watch` receiver and are woken
//! on every change.

pub mod app;
pub mod session;
pub mod slice;
pub mod ui;

pub use app::AppState;
pub use session::SessionStore;
pub use slice::Store;
pub use ui::UiStore;
