use std::collections::VecDeque;
use std::sync::Mutex;

use inline_colorization::*;
use tracing::warn;

/// Where user-facing warnings go (a toast in a browser, stderr on a terminal).
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);
}

/// Only logs the warning.
#[derive(Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warning(&self, message: &str) {
        warn!(event_name = "session.notify.warning", "{}", message);
    }
}

/// Prints the warning in colour on stderr.
#[derive(Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn warning(&self, message: &str) {
        eprintln!("{style_bold}{color_yellow}warning:{color_reset}{style_reset} {message}");
    }
}

/// Buffers warnings until the UI drains them, like a toast container.
#[derive(Default)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<String>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        ToastQueue::default()
    }

    /// Takes every pending message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.pending
            .lock()
            .expect("toast queue mutex poisoned")
            .drain(..)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .expect("toast queue mutex poisoned")
            .is_empty()
    }
}

impl Notifier for ToastQueue {
    fn warning(&self, message: &str) {
        self.pending
            .lock()
            .expect("toast queue mutex poisoned")
            .push_back(message.to_string());
    }
}
