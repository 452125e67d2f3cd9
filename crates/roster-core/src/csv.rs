//! Record → CSV text.
//!
//! Output is a header line of field names, a newline, then one line per record
//! joined by `\n`. Empty input is the header and a lone newline. Missing values
//! are empty cells.
//!
//! Cells containing a comma, double quote, CR or LF are quoted per RFC 4180;
//! every other cell is written verbatim.

use std::borrow::Cow;

/// A record with a fixed, ordered set of columns.
pub trait CsvRecord {
  const HEADER: &'static [&'static str];

  /// One entry per [`HEADER`](Self::HEADER) column, in the same order.
  fn cells(&self) -> Vec<Option<String>>;
}

pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
  let header = R::HEADER.join(",");
  let rows = records
    .iter()
    .map(|record| {
      record
        .cells()
        .iter()
        .map(|cell| escape(cell.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(",")
    })
    .collect::<Vec<_>>()
    .join("\n");
  format!("{header}\n{rows}")
}

fn escape(cell: &str) -> Cow<'_, str> {
  if cell.contains([',', '"', '\n', '\r']) {
    Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
  } else {
    Cow::Borrowed(cell)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};

  use super::*;
  use crate::constituent::{Constituent, ConstituentParams};

  const HEADER: &str = "id,email,name,phone,address,created_at,updated_at,unsubscribed_at";

  fn record(id: &str, email: &str, address: Option<&str>) -> Constituent {
    Constituent::new(
      ConstituentParams {
        email:   email.into(),
        name:    Some("Test User".into()),
        phone:   None,
        address: address.map(Into::into),
      },
      id.into(),
      Utc.with_ymd_and_hms(2024, 11, 13, 0, 0, 0).unwrap(),
    )
  }

  #[test]
  fn empty_input_is_header_only() {
    let csv = to_csv::<Constituent>(&[]);
    assert_eq!(csv, format!("{HEADER}\n"));
    assert_eq!(csv.split('\n').count(), 2);
  }

  #[test]
  fn rows_follow_header_in_order() {
    let csv = to_csv(&[record("A", "a@b.com", None), record("B", "b@b.com", Some("1 Main St"))]);
    let lines: Vec<_> = csv.split('\n').collect();
    assert_eq!(lines, [
      HEADER,
      "A,a@b.com,Test User,,,2024-11-13T00:00:00.000Z,2024-11-13T00:00:00.000Z,",
      "B,b@b.com,Test User,,1 Main St,2024-11-13T00:00:00.000Z,2024-11-13T00:00:00.000Z,",
    ]);
  }

  // Values with delimiters are quoted rather than written raw, so a row
  // always splits back into exactly eight cells.
  #[test]
  fn delimiters_inside_values_are_quoted() {
    let csv = to_csv(&[record("A", "a@b.com", Some("1 Main St, Apt \"2\"\nSpringfield"))]);
    assert!(csv.contains(r#","1 Main St, Apt ""2""
Springfield","#));
  }

  #[test]
  fn escape_leaves_plain_cells_borrowed() {
    assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
  }
}
