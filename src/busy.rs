//! Reference-counted busy indication shared by every outbound call
//!
//! One `BusyCounter` exists per application. Every `ApiClient` and every
//! prefetch hook brackets its work with `enter`/`exit` (usually through a
//! `BusyGuard`), and the UI watches the single boolean it publishes.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;

/// ---------------------------------------------------------------------------
/// Busy Counter
/// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BusyCounter {
  pending: Mutex<usize>,
  busy: watch::Sender<bool>,
}

impl Default for BusyCounter {
  fn default() -> Self {
    Self::new()
  }
}

impl BusyCounter {
  pub fn new() -> Self {
    let (busy, _) = watch::channel(false);
    Self {
      pending: Mutex::new(0),
      busy,
    }
  }

  /// Convenience for the composition root, which hands the same instance to
  /// every collaborator.
  pub fn shared() -> Arc<Self> {
    Arc::new(Self::new())
  }

  /// Register one more in-flight operation.
  pub fn enter(&self) {
    let mut pending = self.lock();
    *pending += 1;
    if *pending == 1 {
      debug!("busy: first operation in flight");
      self.publish(true);
    }
  }

  /// Mark one operation as finished. Never drops below zero.
  pub fn exit(&self) {
    let mut pending = self.lock();
    *pending = pending.saturating_sub(1);
    if *pending == 0 {
      self.publish(false);
    }
  }

  /// Force the counter back to idle, e.g. after an abandoned navigation.
  pub fn reset(&self) {
    let mut pending = self.lock();
    *pending = 0;
    self.publish(false);
  }

  pub fn pending_count(&self) -> usize {
    *self.lock()
  }

  pub fn is_busy(&self) -> bool {
    *self.busy.borrow()
  }

  /// Receiver that observes every change of the busy flag.
  pub fn subscribe(&self) -> watch::Receiver<bool> {
    self.busy.subscribe()
  }

  /// Enter now and exit exactly once when the guard is dropped.
  pub fn guard(&self) -> BusyGuard<'_> {
    self.enter();
    BusyGuard { counter: self }
  }

  fn publish(&self, value: bool) {
    self.busy.send_if_modified(|busy| {
      let changed = *busy != value;
      *busy = value;
      changed
    });
  }

  // The count and the flag are published under the same lock, so a reader
  // never observes one without the other. A poisoned lock still holds a
  // valid count.
  fn lock(&self) -> MutexGuard<'_, usize> {
    self
      .pending
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

/// Drop guard pairing one `enter` with one `exit`.
#[must_use = "dropping the guard immediately ends the busy period"]
#[derive(Debug)]
pub struct BusyGuard<'a> {
  counter: &'a BusyCounter,
}

impl Drop for BusyGuard<'_> {
  fn drop(&mut self) {
    self.counter.exit();
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
