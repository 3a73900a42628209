//! User-facing notifications
//!
//! The store reports the outcome of every write through a `Notifier`. The UI
//! layer provides the real toast implementation; `LogNotifier` is the
//! headless default.

use tracing::{info, warn};

pub trait Notifier: Send + Sync {
  fn success(&self, message: &str);
  fn error(&self, message: &str);
}

/// Writes notifications to the log under the `notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn success(&self, message: &str) {
    info!(target: "notify", "{}", message);
  }

  fn error(&self, message: &str) {
    warn!(target: "notify", "{}", message);
  }
}
