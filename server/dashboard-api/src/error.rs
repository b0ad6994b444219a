//! Error types for the dashboard API and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use impact_engine::EngineError;
use serde_json::json;
use thiserror::Error;

use crate::github::GithubError;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid {var}: {reason}")]
  Invalid { var: String, reason: String },
}

impl ConfigError {
  pub fn invalid(var: &str, reason: &str) -> Self {
    Self::Invalid {
      var: var.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Failure of one request. Each handler is its own boundary: nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error("github: {0}")]
  Github(#[from] GithubError),

  #[error("database: {0}")]
  Store(#[from] sqlx_core::Error),

  #[error("engine: {0}")]
  Engine(#[from] EngineError),

  #[error("internal: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn bad_request(msg: impl Into<String>) -> Self {
    Self::BadRequest(msg.into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Github(GithubError::NotFound(_)) => StatusCode::NOT_FOUND,
      Self::Engine(EngineError::Validation { .. }) => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Message shown to clients; server-side failures stay generic.
  pub fn public_message(&self) -> String {
    match self {
      Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
      Self::Github(GithubError::NotFound(what)) => format!("not found: {}", what),
      Self::Engine(e @ EngineError::Validation { .. }) => e.to_string(),
      _ => "internal server error".to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, %status, "request rejected");
    }
    (status, Json(json!({ "error": self.public_message() }))).into_response()
  }
}
