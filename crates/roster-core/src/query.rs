//! Query parameters accepted by `GET /constituents`.

use std::collections::HashMap;

use crate::{
  filter::{CreatedAtFilter, FilterError},
  validate::{self, Choice, Issue, IssueCode, StringCheck, ValidationError},
};

pub const DEFAULT_LIMIT: u64 = 25;

/// Column a listing is ordered by. Only these columns may appear in an
/// `ORDER BY`; there is no free-text sort input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
  Id,
  #[default]
  CreatedAt,
}

impl Choice for SortColumn {
  const OPTIONS: &'static [(&'static str, Self)] =
    &[("id", Self::Id), ("created_at", Self::CreatedAt)];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl Choice for SortOrder {
  const OPTIONS: &'static [(&'static str, Self)] =
    &[("asc", Self::Asc), ("desc", Self::Desc)];
}

/// Response body format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
  #[default]
  Json,
  Csv,
}

impl Choice for Format {
  const OPTIONS: &'static [(&'static str, Self)] =
    &[("json", Self::Json), ("csv", Self::Csv)];
}

/// Validated listing parameters with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
  pub limit:      u64,
  pub offset:     u64,
  pub sort:       SortColumn,
  pub order:      SortOrder,
  pub format:     Format,
  pub created_at: Option<CreatedAtFilter>,
}

impl Default for ListParams {
  fn default() -> Self {
    Self {
      limit:      DEFAULT_LIMIT,
      offset:     0,
      sort:       SortColumn::default(),
      order:      SortOrder::default(),
      format:     Format::default(),
      created_at: None,
    }
  }
}

impl ListParams {
  /// Validate raw query-string pairs. Unknown keys are ignored; every known
  /// key is checked independently and all failures are reported together.
  pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ValidationError> {
    let get = |key: &str| query.get(key).map(String::as_str);
    let mut errors = ValidationError::default();

    let params = Self {
      limit:      errors.check(validate::non_negative_integer(get("limit"), "limit", DEFAULT_LIMIT)),
      offset:     errors.check(validate::non_negative_integer(get("offset"), "offset", 0)),
      sort:       errors.check(validate::choice(get("sort"), "sort")),
      order:      errors.check(validate::choice(get("order"), "order")),
      format:     errors.check(validate::choice(get("format"), "format")),
      created_at: errors.check(created_at_filter(get("created_at"))),
    };

    errors.finish(params)
  }
}

fn created_at_filter(raw: Option<&str>) -> Result<Option<CreatedAtFilter>, Issue> {
  let Some(raw) = raw else { return Ok(None) };
  CreatedAtFilter::parse(raw).map(Some).map_err(|e| match e {
    FilterError::Pattern => {
      Issue::invalid_string(StringCheck::Regex, "created_at", "Invalid input")
    }
    FilterError::Date => Issue::new(IssueCode::InvalidDate, "created_at", "Invalid date"),
  })
}

#[cfg(test)]
mod tests {
  use crate::filter::Comparison;

  use super::*;

  fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn empty_query_yields_defaults() {
    let params = ListParams::from_query(&HashMap::new()).unwrap();
    assert_eq!(params, ListParams::default());
    assert_eq!(params.limit, 25);
    assert_eq!(params.sort, SortColumn::CreatedAt);
    assert_eq!(params.order, SortOrder::Asc);
    assert_eq!(params.format, Format::Json);
  }

  #[test]
  fn every_field_is_parsed() {
    let params = ListParams::from_query(&query(&[
      ("limit", "10"),
      ("offset", "5"),
      ("sort", "id"),
      ("order", "desc"),
      ("format", "csv"),
      ("created_at", ">2030-01-01T00:00:00Z"),
      ("unrelated", "whatever"),
    ]))
    .unwrap();

    assert_eq!(params.limit, 10);
    assert_eq!(params.offset, 5);
    assert_eq!(params.sort, SortColumn::Id);
    assert_eq!(params.order, SortOrder::Desc);
    assert_eq!(params.format, Format::Csv);
    assert_eq!(params.created_at.unwrap().comparison, Comparison::After);
  }

  #[test]
  fn free_text_sort_columns_are_rejected() {
    let err = ListParams::from_query(&query(&[("sort", "email; DROP TABLE constituents")]))
      .unwrap_err();
    assert_eq!(err.issues.len(), 1);
    assert_eq!(err.issues[0].code, IssueCode::InvalidEnumValue);
    assert_eq!(err.issues[0].path, vec!["sort"]);
  }

  #[test]
  fn all_failures_are_reported_together() {
    let err = ListParams::from_query(&query(&[
      ("limit", "lots"),
      ("order", "sideways"),
      ("format", "xml"),
      ("created_at", "2024-01-01"),
    ]))
    .unwrap_err();

    let paths: Vec<_> = err.issues.iter().map(|i| i.path[0].as_str()).collect();
    assert_eq!(paths, ["limit", "order", "format", "created_at"]);
    assert_eq!(err.issues[3].validation, Some(StringCheck::Regex));
  }

  #[test]
  fn impossible_filter_date_is_its_own_issue() {
    let err = ListParams::from_query(&query(&[("created_at", "<2024-02-30T00:00:00Z")]))
      .unwrap_err();
    assert_eq!(err.issues[0].code, IssueCode::InvalidDate);
  }
}
