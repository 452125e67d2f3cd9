//! Conversions between [`Constituent`] and the plain-text columns stored in
//! SQLite.

use roster_core::{constituent::Constituent, timestamp};

use crate::Result;

/// Column list shared by every `SELECT` and `RETURNING` clause, in the order
/// [`RawConstituent::from_row`] reads them.
pub const COLUMNS: &str =
  "id, email, name, phone, address, created_at, updated_at, unsubscribed_at";

/// A constituent row exactly as SQLite hands it back.
#[derive(Debug)]
pub struct RawConstituent {
  pub id:              String,
  pub email:           String,
  pub name:            Option<String>,
  pub phone:           Option<String>,
  pub address:         Option<String>,
  pub created_at:      String,
  pub updated_at:      String,
  pub unsubscribed_at: Option<String>,
}

impl RawConstituent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      email:           row.get(1)?,
      name:            row.get(2)?,
      phone:           row.get(3)?,
      address:         row.get(4)?,
      created_at:      row.get(5)?,
      updated_at:      row.get(6)?,
      unsubscribed_at: row.get(7)?,
    })
  }

  pub fn from_constituent(c: &Constituent) -> Self {
    Self {
      id:              c.id.clone(),
      email:           c.email.clone(),
      name:            c.name.clone(),
      phone:           c.phone.clone(),
      address:         c.address.clone(),
      created_at:      timestamp::format(c.created_at),
      updated_at:      timestamp::format(c.updated_at),
      unsubscribed_at: c.unsubscribed_at.map(timestamp::format),
    }
  }

  pub fn into_constituent(self) -> Result<Constituent> {
    Ok(Constituent {
      id:              self.id,
      email:           self.email,
      name:            self.name,
      phone:           self.phone,
      address:         self.address,
      created_at:      timestamp::parse(&self.created_at)?,
      updated_at:      timestamp::parse(&self.updated_at)?,
      unsubscribed_at: self
        .unsubscribed_at
        .as_deref()
        .map(timestamp::parse)
        .transpose()?,
    })
  }
}
