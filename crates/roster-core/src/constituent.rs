//! The constituent record and its creation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  csv::CsvRecord,
  timestamp,
  validate::{self, Issue, IssueCode, StringCheck, ValidationError},
};

/// A stored contact record.
///
/// Field order is the schema-declaration order and therefore the CSV column
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
  pub id:              String,
  pub email:           String,
  pub name:            Option<String>,
  pub phone:           Option<String>,
  pub address:         Option<String>,
  #[serde(with = "timestamp")]
  pub created_at:      DateTime<Utc>,
  #[serde(with = "timestamp")]
  pub updated_at:      DateTime<Utc>,
  #[serde(default, with = "timestamp::option")]
  pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl Constituent {
  pub const FIELDS: [&'static str; 8] = [
    "id",
    "email",
    "name",
    "phone",
    "address",
    "created_at",
    "updated_at",
    "unsubscribed_at",
  ];

  /// A brand-new record: both timestamps are `now`, not unsubscribed.
  pub fn new(params: ConstituentParams, id: String, now: DateTime<Utc>) -> Self {
    Self {
      id,
      email: params.email,
      name: params.name,
      phone: params.phone,
      address: params.address,
      created_at: now,
      updated_at: now,
      unsubscribed_at: None,
    }
  }
}

impl CsvRecord for Constituent {
  const HEADER: &'static [&'static str] = &Self::FIELDS;

  fn cells(&self) -> Vec<Option<String>> {
    vec![
      Some(self.id.clone()),
      Some(self.email.clone()),
      self.name.clone(),
      self.phone.clone(),
      self.address.clone(),
      Some(timestamp::format(self.created_at)),
      Some(timestamp::format(self.updated_at)),
      self.unsubscribed_at.map(timestamp::format),
    ]
  }
}

// ─── Creation input ───────────────────────────────────────────────────────────

/// Validated body of `POST /constituents`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstituentParams {
  /// Lowercased.
  pub email:   String,
  pub name:    Option<String>,
  pub phone:   Option<String>,
  pub address: Option<String>,
}

impl ConstituentParams {
  /// Validate an already-parsed JSON body. Keys other than `email`, `name`,
  /// `phone` and `address` are ignored.
  pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
    let Value::Object(fields) = body else {
      return Err(ValidationError::single(Issue::new(
        IssueCode::InvalidType,
        "",
        format!("Expected object, received {}", validate::type_name(body)),
      )));
    };

    let mut errors = ValidationError::default();
    let params = Self {
      email:   errors.check(email(fields.get("email"))),
      name:    errors.check(validate::optional_string(fields.get("name"), "name")),
      phone:   errors.check(validate::optional_string(fields.get("phone"), "phone")),
      address: errors.check(validate::optional_string(fields.get("address"), "address")),
    };
    errors.finish(params)
  }
}

fn email(value: Option<&Value>) -> Result<String, Issue> {
  let raw = validate::required_string(value, "email")?;
  if !validate::is_email(&raw) {
    return Err(Issue::invalid_string(StringCheck::Email, "email", "Invalid email"));
  }
  Ok(raw.to_lowercase())
}
