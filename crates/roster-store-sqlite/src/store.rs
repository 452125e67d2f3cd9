//! [`SqliteStore`] — the SQLite implementation of [`ConstituentStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};

use roster_core::{
  constituent::Constituent,
  query::{SortColumn, SortOrder},
  store::{ConstituentStore, ListQuery},
};

use crate::{
  Error, Result,
  encode::{COLUMNS, RawConstituent},
  filter::parse_filter,
  schema::SCHEMA,
};

const UPSERT: &str = "
INSERT INTO constituents (id, email, name, phone, address, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT (email) DO UPDATE SET
  name       = excluded.name,
  phone      = excluded.phone,
  address    = excluded.address,
  updated_at = excluded.updated_at
RETURNING id, email, name, phone, address, created_at, updated_at, unsubscribed_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A constituent store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("constituents schema ready");
    Ok(())
  }

  /// Insert a fully-specified row as-is, historical timestamps and
  /// `unsubscribed_at` included. Fails on a duplicate id or email.
  ///
  /// Intended for seeding and fixtures; the service itself only writes
  /// through [`ConstituentStore::upsert`].
  pub async fn insert(&self, record: &Constituent) -> Result<()> {
    let raw = RawConstituent::from_constituent(record);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO constituents (
             id, email, name, phone, address,
             created_at, updated_at, unsubscribed_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            raw.id,
            raw.email,
            raw.name,
            raw.phone,
            raw.address,
            raw.created_at,
            raw.updated_at,
            raw.unsubscribed_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of stored rows.
  pub async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM constituents", [], |r| r.get(0))?)
      })
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }
}

/// `ORDER BY` body for an allow-listed column and direction. Only these
/// static strings are ever spliced into query text. Ties on `created_at`
/// fall back to `id` so pages are stable.
fn order_by(sort: SortColumn, order: SortOrder) -> &'static str {
  match (sort, order) {
    (SortColumn::Id, SortOrder::Asc) => "id ASC",
    (SortColumn::Id, SortOrder::Desc) => "id DESC",
    (SortColumn::CreatedAt, SortOrder::Asc) => "created_at ASC, id ASC",
    (SortColumn::CreatedAt, SortOrder::Desc) => "created_at DESC, id DESC",
  }
}

/// SQLite integers are signed; anything past `i64::MAX` means "no bound".
fn sql_int(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── ConstituentStore impl ───────────────────────────────────────────────────

impl ConstituentStore for SqliteStore {
  type Error = Error;

  async fn list(&self, query: &ListQuery) -> Result<Vec<Constituent>> {
    let clause = parse_filter(query.created_at.as_ref());

    let mut params: Vec<Value> = Vec::new();
    if let Some(value) = clause.value.clone() {
      params.push(Value::Text(value));
    }
    let page = match query.page {
      Some(page) => {
        params.push(Value::Integer(sql_int(page.limit)));
        params.push(Value::Integer(sql_int(page.offset)));
        "LIMIT ? OFFSET ?"
      }
      None => "",
    };

    let sql = format!(
      "SELECT {COLUMNS} FROM constituents {} ORDER BY {} {page}",
      clause.where_clause(),
      order_by(query.sort, query.order),
    );

    let raws: Vec<RawConstituent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawConstituent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawConstituent::into_constituent).collect()
  }

  async fn upsert(&self, record: Constituent) -> Result<Constituent> {
    let raw = RawConstituent::from_constituent(&record);
    let email = raw.email.clone();

    let stored: Option<RawConstituent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              UPSERT,
              rusqlite::params![
                raw.id,
                raw.email,
                raw.name,
                raw.phone,
                raw.address,
                raw.created_at,
                raw.updated_at,
              ],
              RawConstituent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    stored
      .ok_or(Error::NoRowReturned(email))?
      .into_constituent()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_by_only_emits_known_columns() {
    assert_eq!(order_by(SortColumn::Id, SortOrder::Desc), "id DESC");
    assert_eq!(
      order_by(SortColumn::CreatedAt, SortOrder::Asc),
      "created_at ASC, id ASC"
    );
  }

  #[test]
  fn oversized_bounds_saturate() {
    assert_eq!(sql_int(u64::MAX), i64::MAX);
    assert_eq!(sql_int(25), 25);
  }
}
