//! Structural validation for data crossing the service boundary.
//!
//! Validators never stop at the first problem: every field is checked and each
//! failure becomes an [`Issue`] carrying the field path and a reason. The
//! collected [`ValidationError`] is what a 400 response serialises.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ─── Issues ───────────────────────────────────────────────────────────────────

/// Machine-readable category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
  InvalidType,
  InvalidString,
  InvalidEnumValue,
  TooSmall,
  InvalidDate,
  InvalidJson,
}

/// Which format check an `invalid_string` issue failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringCheck {
  Email,
  Regex,
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
  pub code:       IssueCode,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub validation: Option<StringCheck>,
  pub message:    String,
  pub path:       Vec<String>,
}

impl Issue {
  pub fn new(code: IssueCode, path: &str, message: impl Into<String>) -> Self {
    Self {
      code,
      validation: None,
      message: message.into(),
      path: if path.is_empty() { Vec::new() } else { vec![path.to_owned()] },
    }
  }

  pub fn invalid_string(check: StringCheck, path: &str, message: &str) -> Self {
    Self {
      validation: Some(check),
      ..Self::new(IssueCode::InvalidString, path, message)
    }
  }

  pub fn required(path: &str) -> Self {
    Self::new(IssueCode::InvalidType, path, "Required")
  }
}

/// Every issue found while validating one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
  pub issues: Vec<Issue>,
}

impl ValidationError {
  pub fn single(issue: Issue) -> Self { Self { issues: vec![issue] } }

  pub fn is_empty(&self) -> bool { self.issues.is_empty() }

  /// Record the issue from a failed check and hand back a placeholder so the
  /// caller can keep validating the remaining fields.
  pub fn check<T: Default>(&mut self, result: Result<T, Issue>) -> T {
    match result {
      Ok(value) => value,
      Err(issue) => {
        self.issues.push(issue);
        T::default()
      }
    }
  }

  /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
  pub fn finish<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }
}

// ─── Field checks ─────────────────────────────────────────────────────────────

// ASCII only. Local part may not start with a dot or contain consecutive
// dots; those two rules are checked outside the regex.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
  )
    .expect("email pattern compiles")
});

pub fn is_email(candidate: &str) -> bool {
  !candidate.starts_with('.')
    && !candidate.contains("..")
    && EMAIL.is_match(candidate)
}

/// Human name of a JSON value's type, used in `invalid_type` messages.
pub fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// A required string field of a JSON object.
pub fn required_string(value: Option<&Value>, path: &str) -> Result<String, Issue> {
  match value {
    None => Err(Issue::required(path)),
    Some(Value::String(s)) => Ok(s.clone()),
    Some(other) => Err(Issue::new(
      IssueCode::InvalidType,
      path,
      format!("Expected string, received {}", type_name(other)),
    )),
  }
}

/// An optional string field. Absent is fine; an explicit `null` is not.
pub fn optional_string(
  value: Option<&Value>,
  path: &str,
) -> Result<Option<String>, Issue> {
  value.map(|v| required_string(Some(v), path)).transpose()
}

/// A non-negative integer coerced from a query-string value.
///
/// Coercion is numeric rather than textual: blank text is zero, exponent and
/// trailing-zero forms such as `1e2` or `10.0` are integers, and anything past
/// `u64::MAX` clamps to it.
pub fn non_negative_integer(
  raw: Option<&str>,
  path: &str,
  default: u64,
) -> Result<u64, Issue> {
  let Some(raw) = raw else { return Ok(default) };
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(0);
  }
  if let Ok(n) = raw.parse::<u64>() {
    return Ok(n);
  }

  let n = match raw.parse::<f64>() {
    Ok(n) if !n.is_nan() => n,
    _ => {
      return Err(Issue::new(
        IssueCode::InvalidType,
        path,
        "Expected number, received nan",
      ));
    }
  };
  if !n.is_finite() || n.fract() != 0.0 {
    return Err(Issue::new(
      IssueCode::InvalidType,
      path,
      "Expected integer, received float",
    ));
  }
  if n < 0.0 {
    return Err(Issue::new(
      IssueCode::TooSmall,
      path,
      "Number must be greater than or equal to 0",
    ));
  }

  // `as` saturates at the target bounds.
  Ok(n as u64)
}

/// A closed set of accepted query-string values.
pub trait Choice: Copy + Default + 'static {
  /// Wire spelling of each variant, in the order they are reported.
  const OPTIONS: &'static [(&'static str, Self)];
}

pub fn choice<T: Choice>(raw: Option<&str>, path: &str) -> Result<T, Issue> {
  let Some(raw) = raw else { return Ok(T::default()) };
  T::OPTIONS
    .iter()
    .find(|(name, _)| *name == raw)
    .map(|(_, value)| *value)
    .ok_or_else(|| {
      let expected = T::OPTIONS
        .iter()
        .map(|(name, _)| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(" | ");
      Issue::new(
        IssueCode::InvalidEnumValue,
        path,
        format!("Invalid enum value. Expected {expected}, received '{raw}'"),
      )
    })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
  enum Colour {
    #[default]
    Red,
    Blue,
  }

  impl Choice for Colour {
    const OPTIONS: &'static [(&'static str, Self)] =
      &[("red", Self::Red), ("blue", Self::Blue)];
  }

  #[test]
  fn email_accepts_ordinary_addresses() {
    for ok in ["a@b.com", "first.last+tag@sub.example.org", "O'Neil@example.ie"] {
      assert!(is_email(ok), "{ok}");
    }
  }

  #[test]
  fn email_rejects_malformed_addresses() {
    for bad in [
      "bad email",
      "a@b",
      "@b.com",
      ".a@b.com",
      "a..b@c.com",
      "a@b.c",
      "a@-b.com",
      "\u{e9}l\u{e8}ve@example.com",
      "a@\u{212A}elvin.com",
    ] {
      assert!(!is_email(bad), "{bad}");
    }
  }

  #[test]
  fn required_string_reports_missing_and_wrong_type() {
    let missing = required_string(None, "email").unwrap_err();
    assert_eq!(missing.message, "Required");
    assert_eq!(missing.path, vec!["email"]);

    let wrong = required_string(Some(&json!(5)), "email").unwrap_err();
    assert_eq!(wrong.code, IssueCode::InvalidType);
    assert_eq!(wrong.message, "Expected string, received number");
  }

  #[test]
  fn optional_string_rejects_null() {
    assert_eq!(optional_string(None, "name").unwrap(), None);
    assert!(optional_string(Some(&Value::Null), "name").is_err());
  }

  #[test]
  fn integers_are_coerced_from_strings() {
    assert_eq!(non_negative_integer(None, "limit", 25).unwrap(), 25);
    assert_eq!(non_negative_integer(Some("10"), "limit", 25).unwrap(), 10);
    assert_eq!(non_negative_integer(Some(" 3 "), "limit", 25).unwrap(), 3);
  }

  #[test]
  fn integers_reject_floats_text_and_negatives() {
    let float = non_negative_integer(Some("1.5"), "limit", 25).unwrap_err();
    assert_eq!(float.message, "Expected integer, received float");

    let text = non_negative_integer(Some("ten"), "limit", 25).unwrap_err();
    assert_eq!(text.message, "Expected number, received nan");

    let negative = non_negative_integer(Some("-1"), "offset", 0).unwrap_err();
    assert_eq!(negative.code, IssueCode::TooSmall);
    assert_eq!(negative.path, vec!["offset"]);

    let negative = non_negative_integer(Some("-1e2"), "offset", 0).unwrap_err();
    assert_eq!(negative.code, IssueCode::TooSmall);

    let infinite = non_negative_integer(Some("Infinity"), "limit", 25).unwrap_err();
    assert_eq!(infinite.message, "Expected integer, received float");
  }

  #[test]
  fn integers_accept_whole_numbers_in_any_notation() {
    assert_eq!(non_negative_integer(Some("1e2"), "limit", 25).unwrap(), 100);
    assert_eq!(non_negative_integer(Some("10.0"), "limit", 25).unwrap(), 10);
    assert_eq!(non_negative_integer(Some("-0"), "offset", 0).unwrap(), 0);
  }

  #[test]
  fn blank_integer_is_zero() {
    assert_eq!(non_negative_integer(Some(""), "limit", 25).unwrap(), 0);
    assert_eq!(non_negative_integer(Some("  "), "offset", 7).unwrap(), 0);
  }

  #[test]
  fn oversized_integers_clamp() {
    for huge in ["99999999999999999999", "18446744073709551616", "1e300"] {
      assert_eq!(
        non_negative_integer(Some(huge), "limit", 25).unwrap(),
        u64::MAX,
        "{huge}"
      );
    }
    assert_eq!(
      non_negative_integer(Some("18446744073709551615"), "limit", 25).unwrap(),
      u64::MAX
    );
  }

  #[test]
  fn choice_defaults_and_lists_options_on_failure() {
    assert_eq!(choice::<Colour>(None, "colour").unwrap(), Colour::Red);
    assert_eq!(choice::<Colour>(Some("blue"), "colour").unwrap(), Colour::Blue);

    let issue = choice::<Colour>(Some("green"), "colour").unwrap_err();
    assert_eq!(issue.code, IssueCode::InvalidEnumValue);
    assert_eq!(
      issue.message,
      "Invalid enum value. Expected 'red' | 'blue', received 'green'"
    );
  }

  #[test]
  fn check_collects_every_issue() {
    let mut errors = ValidationError::default();
    let a: u64 = errors.check(non_negative_integer(Some("x"), "limit", 25));
    let b: u64 = errors.check(non_negative_integer(Some("-2"), "offset", 0));
    assert_eq!((a, b), (0, 0));
    assert_eq!(errors.issues.len(), 2);
    assert!(errors.finish(()).is_err());
  }

  #[test]
  fn issue_serialises_without_empty_validation() {
    let issue = Issue::required("email");
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(
      json,
      json!({ "code": "invalid_type", "message": "Required", "path": ["email"] })
    );

    let email = Issue::invalid_string(StringCheck::Email, "email", "Invalid email");
    assert_eq!(serde_json::to_value(&email).unwrap()["validation"], "email");
  }
}
