//! Pre-navigation data prefetch
//!
//! A screen that needs data before it is shown fetches it through
//! `prefetch_or_default`. Failures never block navigation: the user gets a
//! notification and the screen receives an empty value.

use std::future::Future;
use tracing::warn;

use crate::api::ApiError;
use crate::busy::BusyCounter;
use crate::notify::Notifier;

/// Run `call` with the busy indicator held. On error, notify the user with
/// `failure_message` and resolve to `T::default()`.
pub async fn prefetch_or_default<T, F>(
  busy: &BusyCounter,
  notifier: &dyn Notifier,
  failure_message: &str,
  call: F,
) -> T
where
  T: Default,
  F: Future<Output = Result<T, ApiError>>,
{
  let _busy = busy.guard();

  match call.await {
    Ok(value) => value,
    Err(err) => {
      warn!(error = %err, "prefetch failed, continuing with empty data");
      notifier.error(failure_message);
      T::default()
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
