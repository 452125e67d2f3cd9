//! Handlers for `/constituents`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/constituents` | `limit`, `offset`, `sort`, `order`, `format`, `created_at` |
//! | `POST` | `/constituents` | Body: `{"email", "name"?, "phone"?, "address"?}`; upsert by email, 201 |

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::{
  constituent::{Constituent, ConstituentParams},
  csv::to_csv,
  query::{Format, ListParams},
  store::{ConstituentStore, ListQuery, Page},
  timestamp,
};

use crate::{AppState, error::ApiError, extract::Valid};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /constituents[?limit=..][&offset=..][&sort=id|created_at][&order=asc|desc][&format=json|csv][&created_at=<T|>T]`
///
/// - `json`: one page (`limit`/`offset`). The `created_at` filter is validated
///   but not applied.
/// - `csv`: every row matching the `created_at` filter; `limit`/`offset` are
///   ignored.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Valid(params): Valid<ListParams>,
) -> Result<Response, ApiError>
where
  S: ConstituentStore,
{
  let ListParams { limit, offset, sort, order, format, created_at } = params;

  match format {
    Format::Json => {
      let query = ListQuery {
        sort,
        order,
        page: Some(Page { limit, offset }),
        created_at: None,
      };
      let rows = state
        .store
        .list(&query)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      Ok(Json(rows).into_response())
    }
    Format::Csv => {
      let query = ListQuery { sort, order, page: None, created_at };
      let rows = state
        .store
        .list(&query)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      tracing::debug!(rows = rows.len(), "exporting csv");
      Ok(([(header::CONTENT_TYPE, "text/csv")], to_csv(&rows)).into_response())
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /constituents` — returns 201 + the stored [`Constituent`], whether
/// the email was new or already present.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Valid(params): Valid<ConstituentParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConstituentStore,
{
  let record = Constituent::new(params, state.ids.generate_id(), timestamp::now());
  tracing::debug!(email = %record.email, "upserting constituent");

  let stored = state
    .store
    .upsert(record)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(stored)))
}
