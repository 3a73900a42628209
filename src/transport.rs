//! HTTP transport seam
//!
//! `ApiClient` only ever talks to a `Transport`. Failures come back as a
//! closed `TransportFailure` so normalization never has to inspect an opaque
//! error value to tell a dead connection from a server response.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::str::FromStr;

/// ---------------------------------------------------------------------------
/// Request / Response Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
}

impl HttpMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-insensitive; anything other than the four supported verbs is rejected
/// with the verb echoed back.
impl FromStr for HttpMethod {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "get" => Ok(Self::Get),
      "post" => Ok(Self::Post),
      "put" => Ok(Self::Put),
      "delete" => Ok(Self::Delete),
      _ => Err(s.to_string()),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
  pub method: HttpMethod,
  pub url: String,
  pub params: Vec<(String, String)>,
  pub headers: Vec<(String, String)>,
  pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
  pub status: u16,
  pub body: String,
}

/// ---------------------------------------------------------------------------
/// Failure Variants
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportFailure {
  /// No response from the server (DNS, refused connection, reset...)
  #[error("network failure: {message}")]
  Network { message: String },

  /// The server answered with a non-2xx status
  #[error("HTTP {status}: {message}")]
  Http {
    status: u16,
    message: String,
    body: String,
  },

  /// A 2xx body that could not be decoded into the expected type
  #[error("decode failure: {message}")]
  Decode { message: String },
}

impl TransportFailure {
  /// Build the `Http` variant with the message shape used across the app:
  /// `Http failure response for <url>: <status> <reason>`.
  pub fn http(url: &str, status: u16, body: String) -> Self {
    let reason = StatusCode::from_u16(status)
      .ok()
      .and_then(|s| s.canonical_reason())
      .unwrap_or("Unknown Error");

    Self::Http {
      status,
      message: format!("Http failure response for {}: {} {}", url, status, reason),
      body,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Transport Trait
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait Transport: Send + Sync {
  async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure>;
}

/// ---------------------------------------------------------------------------
/// reqwest Implementation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  pub fn new() -> Self {
    Self {
      client: Client::new(),
    }
  }

  pub fn with_client(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
    let mut builder = match request.method {
      HttpMethod::Get => self.client.get(&request.url),
      HttpMethod::Post => self.client.post(&request.url),
      HttpMethod::Put => self.client.put(&request.url),
      HttpMethod::Delete => self.client.delete(&request.url),
    };

    if !request.params.is_empty() {
      builder = builder.query(&request.params);
    }
    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await.map_err(|e| TransportFailure::Network {
      message: e.to_string(),
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| TransportFailure::Network {
      message: e.to_string(),
    })?;

    if !status.is_success() {
      return Err(TransportFailure::http(&request.url, status.as_u16(), body));
    }

    Ok(TransportResponse {
      status: status.as_u16(),
      body,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
