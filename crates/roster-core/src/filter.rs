//! Typed comparison filter on `created_at`.
//!
//! The query-string form is a `<` or `>` prefix followed by a strict ISO 8601
//! UTC datetime, e.g. `>2024-11-13T00:00:00Z` or `<2024-11-13T00:00:00.250Z`.

use std::{fmt, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::timestamp;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[<>][0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,3})?Z$")
    .expect("filter pattern compiles")
});

/// Strict inequality selected by the filter prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
  /// `<` — strictly earlier than the instant.
  Before,
  /// `>` — strictly later than the instant.
  After,
}

impl Comparison {
  pub fn symbol(self) -> &'static str {
    match self {
      Comparison::Before => "<",
      Comparison::After => ">",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedAtFilter {
  pub comparison: Comparison,
  pub at:         DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
  #[error("filter does not match <|>YYYY-MM-DDTHH:MM:SS(.sss)?Z")]
  Pattern,
  #[error("filter names a datetime that does not exist")]
  Date,
}

impl CreatedAtFilter {
  pub fn parse(raw: &str) -> Result<Self, FilterError> {
    if !PATTERN.is_match(raw) {
      return Err(FilterError::Pattern);
    }
    // The pattern guarantees a one-byte ASCII prefix.
    let (prefix, rest) = raw.split_at(1);
    let comparison = if prefix == "<" {
      Comparison::Before
    } else {
      Comparison::After
    };
    let at = timestamp::parse(rest).map_err(|_| FilterError::Date)?;
    Ok(Self { comparison, at })
  }
}

impl fmt::Display for CreatedAtFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.comparison.symbol(), timestamp::format(self.at))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_both_prefixes() {
    let after = CreatedAtFilter::parse(">2024-11-13T00:00:00Z").unwrap();
    assert_eq!(after.comparison, Comparison::After);
    assert_eq!(timestamp::format(after.at), "2024-11-13T00:00:00.000Z");

    let before = CreatedAtFilter::parse("<2022-01-01T00:00:00.5Z").unwrap();
    assert_eq!(before.comparison, Comparison::Before);
    assert_eq!(timestamp::format(before.at), "2022-01-01T00:00:00.500Z");
  }

  #[test]
  fn rejects_missing_prefix_offsets_and_loose_forms() {
    for bad in [
      "2024-11-13T00:00:00Z",
      "=2024-11-13T00:00:00Z",
      ">2024-11-13T00:00:00+01:00",
      ">2024-11-13",
      ">2024-11-13T00:00:00.1234Z",
      ">2024-11-13 00:00:00Z",
      ">\u{662}\u{660}\u{662}\u{664}-01-01T00:00:00Z",
    ] {
      assert_eq!(CreatedAtFilter::parse(bad), Err(FilterError::Pattern), "{bad}");
    }
  }

  #[test]
  fn rejects_impossible_dates() {
    assert_eq!(
      CreatedAtFilter::parse(">2024-13-01T00:00:00Z"),
      Err(FilterError::Date)
    );
  }

  #[test]
  fn displays_canonically() {
    let f = CreatedAtFilter::parse("<2024-11-13T00:00:00Z").unwrap();
    assert_eq!(f.to_string(), "<2024-11-13T00:00:00.000Z");
  }
}
