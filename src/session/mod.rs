//! Session and authentication management.
//!
//! [`SessionManager`] owns the in-memory [`Session`], the token store and the API
//! client. Components read the session through snapshots or a watch receiver and
//! never write it directly.

pub mod manager;
pub mod notify;
pub mod state;

pub use manager::SessionManager;
pub use notify::{ConsoleNotifier, Notifier, ToastQueue, TracingNotifier};
pub use state::{AuthState, Session};
