//! Canonical timestamp text.
//!
//! Every timestamp leaves the service as `YYYY-MM-DDTHH:MM:SS.sssZ`. Storing
//! the same form in SQLite keeps lexicographic and chronological order in
//! step, which the `created_at` range filter relies on.

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize as _, Deserializer, Serializer};

use crate::{Error, Result};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// The current instant, truncated to millisecond precision.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

pub fn format(dt: DateTime<Utc>) -> String { dt.format(FORMAT).to_string() }

/// Parse any RFC 3339 timestamp and normalise it to UTC.
pub fn parse(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::InvalidTimestamp(s.to_owned(), e))
}

// ─── serde adapters ───────────────────────────────────────────────────────────

pub fn serialize<S: Serializer>(
  dt: &DateTime<Utc>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&format(*dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
  let s = String::deserialize(deserializer)?;
  parse(&s).map_err(serde::de::Error::custom)
}

/// Same as the parent module, for `Option<DateTime<Utc>>` fields.
pub mod option {
  use chrono::{DateTime, Utc};
  use serde::{Deserialize as _, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match dt {
      Some(dt) => serializer.serialize_some(&super::format(*dt)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
      .transpose()
  }
}
