//! Validating extractors.
//!
//! [`Valid`] runs the structural validators from `roster_core` before a
//! handler body executes, so a rejected request never reaches the store.
//! Failures surface as [`ApiError::Validation`] (HTTP 400).

use std::collections::HashMap;

use axum::{
  body::Bytes,
  extract::{FromRequest, FromRequestParts, Query, Request},
  http::request::Parts,
};
use roster_core::{
  constituent::ConstituentParams,
  query::ListParams,
  validate::{Issue, IssueCode, ValidationError},
};
use serde_json::Value;

use crate::error::ApiError;

/// A request component that passed validation.
#[derive(Debug)]
pub struct Valid<T>(pub T);

fn malformed(code: IssueCode, message: String) -> ApiError {
  ApiError::Validation(ValidationError::single(Issue::new(code, "", message)))
}

impl<S> FromRequestParts<S> for Valid<ListParams>
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Query(raw) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
      .await
      .map_err(|e| malformed(IssueCode::InvalidType, e.body_text()))?;
    Ok(Self(ListParams::from_query(&raw)?))
  }
}

impl<S> FromRequest<S> for Valid<ConstituentParams>
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state)
      .await
      .map_err(|e| malformed(IssueCode::InvalidJson, e.body_text()))?;
    let body: Value = serde_json::from_slice(&bytes)
      .map_err(|e| malformed(IssueCode::InvalidJson, format!("Malformed JSON: {e}")))?;
    Ok(Self(ConstituentParams::from_json(&body)?))
  }
}
