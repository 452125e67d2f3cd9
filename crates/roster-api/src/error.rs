//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::validate::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler or extractor.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Input failed validation; nothing was sent to the store.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(e) => {
        tracing::debug!(issues = e.issues.len(), "rejected invalid request");
        let body = json!({ "success": false, "error": { "issues": e.issues } });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        let body = json!({ "err": e.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
      }
    }
  }
}
