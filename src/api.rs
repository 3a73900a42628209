//! Resilient call façade
//!
//! Every outbound call goes through `ApiClient`: the URL is resolved against
//! the configured root, the shared busy counter is held for the whole call
//! (retries included), transport failures are retried twice without delay,
//! and whatever still fails is normalized into a single `NormalizedError`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::busy::BusyCounter;
use crate::config::ApiConfig;
use crate::transport::{HttpMethod, Transport, TransportFailure, TransportRequest, TransportResponse};

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

/// Retries after the first attempt (3 attempts total).
pub const RETRY_COUNT: u32 = 2;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

/// The only failure shape callers of the façade ever see for network and
/// server errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
  pub message: String,
}

impl NormalizedError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

impl From<&TransportFailure> for NormalizedError {
  fn from(failure: &TransportFailure) -> Self {
    let message = match failure {
      TransportFailure::Network { message } | TransportFailure::Decode { message } => {
        format!("Error: {}", message)
      }
      TransportFailure::Http { status, message, .. } => {
        format!("Error Code: {}\nMessage: {}", status, message)
      }
    };
    Self { message }
  }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "type", content = "detail")]
pub enum ApiError {
  /// Network or server failure after all retries
  #[error("{0}")]
  Request(NormalizedError),

  /// Caller asked for a verb the façade does not support
  #[error("Unsupported HTTP method")]
  UnsupportedMethod(String),

  /// Request body could not be turned into JSON
  #[error("Invalid request body: {0}")]
  InvalidBody(String),
}

impl ApiError {
  pub fn normalized(&self) -> Option<&NormalizedError> {
    match self {
      Self::Request(e) => Some(e),
      _ => None,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Request Options
/// ---------------------------------------------------------------------------

/// Query parameters and headers attached to a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
  pub params: Vec<(String, String)>,
  pub headers: Vec<(String, String)>,
}

impl RequestOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn param(mut self, key: &str, value: impl ToString) -> Self {
    self.params.push((key.to_string(), value.to_string()));
    self
  }

  /// Adds the parameter only when a value is present.
  pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
    match value {
      Some(v) => self.param(key, v),
      None => self,
    }
  }

  pub fn header(mut self, name: &str, value: impl ToString) -> Self {
    self.headers.push((name.to_string(), value.to_string()));
    self
  }
}

/// ---------------------------------------------------------------------------
/// URL Building
/// ---------------------------------------------------------------------------

/// Absolute endpoints (anything starting with `http`) pass through untouched.
/// Relative ones are joined to the base with exactly one `/`, whatever
/// slashes either side carries.
pub fn build_url(base_url: &str, endpoint: &str) -> String {
  if endpoint.starts_with("http") {
    return endpoint.to_string();
  }

  let path = endpoint.trim_start_matches('/');
  let base = base_url.trim_end_matches('/');
  format!("{}/{}", base, path)
}

/// ---------------------------------------------------------------------------
/// API Client
/// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ApiClient {
  base_url: String,
  busy: Arc<BusyCounter>,
  transport: Arc<dyn Transport>,
}

impl ApiClient {
  pub fn new(config: &ApiConfig, busy: Arc<BusyCounter>, transport: Arc<dyn Transport>) -> Self {
    Self {
      base_url: config.api_url.clone(),
      busy,
      transport,
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn busy(&self) -> &Arc<BusyCounter> {
    &self.busy
  }

  pub async fn get<T>(&self, endpoint: &str) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    self.execute(HttpMethod::Get, endpoint, None, RequestOptions::default()).await
  }

  pub async fn get_with<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    self.execute(HttpMethod::Get, endpoint, None, options).await
  }

  pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
    B: Serialize + ?Sized + Sync,
  {
    self.post_with(endpoint, body, RequestOptions::default()).await
  }

  pub async fn post_with<T, B>(&self, endpoint: &str, body: &B, options: RequestOptions) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
    B: Serialize + ?Sized + Sync,
  {
    let body = to_json(body)?;
    self.execute(HttpMethod::Post, endpoint, Some(body), options).await
  }

  pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
    B: Serialize + ?Sized + Sync,
  {
    self.put_with(endpoint, body, RequestOptions::default()).await
  }

  pub async fn put_with<T, B>(&self, endpoint: &str, body: &B, options: RequestOptions) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
    B: Serialize + ?Sized + Sync,
  {
    let body = to_json(body)?;
    self.execute(HttpMethod::Put, endpoint, Some(body), options).await
  }

  pub async fn delete<T>(&self, endpoint: &str) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    self.execute(HttpMethod::Delete, endpoint, None, RequestOptions::default()).await
  }

  pub async fn delete_with<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    self.execute(HttpMethod::Delete, endpoint, None, options).await
  }

  /// Dynamic-verb entry point. An unknown verb fails before the busy counter
  /// is touched and before any network activity.
  pub async fn request<T>(
    &self,
    method: &str,
    endpoint: &str,
    body: Option<serde_json::Value>,
    options: RequestOptions,
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    let method: HttpMethod = method.parse().map_err(ApiError::UnsupportedMethod)?;
    self.execute(method, endpoint, body, options).await
  }

  async fn execute<T>(
    &self,
    method: HttpMethod,
    endpoint: &str,
    body: Option<serde_json::Value>,
    options: RequestOptions,
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    let request = TransportRequest {
      method,
      url: build_url(&self.base_url, endpoint),
      params: options.params,
      headers: options.headers,
      body,
    };

    let _busy = self.busy.guard();
    let response = self.send_with_retry(&request).await?;

    // A 2xx already reached the server; an undecodable body is not retried
    decode_body(&response.body).map_err(|failure| {
      let normalized = NormalizedError::from(&failure);
      error!(method = %request.method, url = %request.url, "{}", normalized.message);
      ApiError::Request(normalized)
    })
  }

  async fn send_with_retry(&self, request: &TransportRequest) -> Result<TransportResponse, ApiError> {
    let max_attempts = RETRY_COUNT + 1;
    let mut attempt = 0;

    loop {
      attempt += 1;
      debug!(method = %request.method, url = %request.url, attempt, "sending request");

      let failure = match self.transport.send(request.clone()).await {
        Ok(response) => return Ok(response),
        Err(failure) => failure,
      };

      if attempt < max_attempts {
        warn!(
          method = %request.method,
          url = %request.url,
          attempt,
          max_attempts,
          error = %failure,
          "request failed, retrying"
        );
        continue;
      }

      let normalized = NormalizedError::from(&failure);
      error!(method = %request.method, url = %request.url, "{}", normalized.message);
      return Err(ApiError::Request(normalized));
    }
  }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
  serde_json::to_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Empty bodies (204s, bare deletes) decode as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, TransportFailure> {
  let text = if body.trim().is_empty() { "null" } else { body };
  serde_json::from_str(text).map_err(|e| TransportFailure::Decode {
    message: e.to_string(),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
