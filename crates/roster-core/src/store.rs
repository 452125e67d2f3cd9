//! The `ConstituentStore` trait and its query type.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  constituent::Constituent,
  filter::CreatedAtFilter,
  query::{SortColumn, SortOrder},
};

/// A window into an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  u64,
  pub offset: u64,
}

/// Parameters for [`ConstituentStore::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
  pub sort:       SortColumn,
  pub order:      SortOrder,
  /// `None` returns every matching row.
  pub page:       Option<Page>,
  /// `None` applies no `created_at` restriction.
  pub created_at: Option<CreatedAtFilter>,
}

/// Abstraction over a constituent store backend.
///
/// Every method is a single atomic statement against the backend; there are
/// no multi-statement transactions.
pub trait ConstituentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Records matching `query`, ordered by `query.sort` / `query.order`.
  fn list<'a>(
    &'a self,
    query: &'a ListQuery,
  ) -> impl Future<Output = Result<Vec<Constituent>, Self::Error>> + Send + 'a;

  /// Insert `record`, or, if a record with the same email exists, overwrite
  /// its `name`, `phone`, `address` and `updated_at`. The existing `id` and
  /// `created_at` are kept. Returns the row as stored.
  fn upsert(
    &self,
    record: Constituent,
  ) -> impl Future<Output = Result<Constituent, Self::Error>> + Send + '_;
}
