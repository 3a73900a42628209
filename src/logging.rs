//! Tracing subscriber setup
//!
//! `RUST_LOG` picks the filter (default `info`); `LOG_FORMAT` picks the
//! output shape: `json`, `compact`, or the default pretty layer. HTTP client
//! internals are capped at `warn` whatever the filter says.

use std::env;
use std::io;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Json,
  Compact,
  Pretty,
}

impl LogFormat {
  pub fn from_env() -> Self {
    Self::parse(env::var("LOG_FORMAT").ok().as_deref())
  }

  fn parse(value: Option<&str>) -> Self {
    match value {
      Some("json") => Self::Json,
      Some("compact") => Self::Compact,
      _ => Self::Pretty,
    }
  }
}

fn env_filter() -> EnvFilter {
  let base = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
  let mut filter = EnvFilter::new(base);
  for directive in ["hyper=warn", "reqwest=warn"] {
    if let Ok(directive) = directive.parse::<Directive>() {
      filter = filter.add_directive(directive);
    }
  }
  filter
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging() {
  let registry = tracing_subscriber::registry().with(env_filter());

  let result = match LogFormat::from_env() {
    LogFormat::Json => registry
      .with(fmt::layer().json().with_target(true).with_writer(io::stdout))
      .try_init(),
    LogFormat::Compact => registry
      .with(fmt::layer().compact().with_target(false).with_writer(io::stdout))
      .try_init(),
    LogFormat::Pretty => registry
      .with(fmt::layer().with_target(true).with_writer(io::stdout))
      .try_init(),
  };

  if result.is_ok() {
    tracing::debug!("logging initialized");
  }
}
