//! `created_at` filter → SQL comparison fragment plus bound value.
//!
//! The fragment uses an anonymous `?` placeholder. Bind [`FilterClause::value`]
//! exactly when the fragment is non-empty: binding a value the statement has
//! no placeholder for is an error in SQLite, so an absent filter contributes
//! neither text nor parameter.

use roster_core::{filter::CreatedAtFilter, timestamp};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClause {
  /// e.g. `created_at > ?`; empty when there is no filter.
  pub fragment: String,
  /// Canonical timestamp text for the placeholder.
  pub value:    Option<String>,
}

impl FilterClause {
  /// The fragment prefixed with `WHERE`, or an empty string.
  pub fn where_clause(&self) -> String {
    if self.fragment.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.fragment)
    }
  }
}

/// Translate an already-validated filter. Performs no validation itself.
pub fn parse_filter(filter: Option<&CreatedAtFilter>) -> FilterClause {
  let Some(filter) = filter else { return FilterClause::default() };
  FilterClause {
    fragment: format!("created_at {} ?", filter.comparison.symbol()),
    // Re-encode so `...00Z` and `...00.000Z` select the same rows.
    value:    Some(timestamp::format(filter.at)),
  }
}
