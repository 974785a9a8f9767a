// flora_catalog/src/schema/field_errors.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structured validation failure report.
///
/// `field_errors` maps a field name to its messages in the order the checks
/// produced them. `form_errors` holds problems that are not tied to one field
/// (for example a payload that is not an object at all).
///
/// Serializes as `{"formErrors": [...], "fieldErrors": {"name": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
  form_errors: Vec<String>,
  field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
    self.field_errors.entry(field.to_string()).or_default().push(message.into());
  }

  pub fn add_form(&mut self, message: impl Into<String>) {
    self.form_errors.push(message.into());
  }

  pub fn is_empty(&self) -> bool {
    self.form_errors.is_empty() && self.field_errors.is_empty()
  }

  pub fn has_field(&self, field: &str) -> bool {
    self.field_errors.contains_key(field)
  }

  /// Messages reported for `field`, if any.
  pub fn field(&self, field: &str) -> Option<&[String]> {
    self.field_errors.get(field).map(Vec::as_slice)
  }

  pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.field_errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }

  pub fn form_errors(&self) -> &[String] {
    &self.form_errors
  }

  /// Turns an accumulated report into a `Result`: `Ok(value)` when nothing was recorded.
  pub(crate) fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
    if self.is_empty() {
      Ok(value())
    } else {
      Err(self)
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts: Vec<String> = self.form_errors.clone();
    for (field, messages) in &self.field_errors {
      parts.push(format!("{}: {}", field, messages.join(", ")));
    }
    f.write_str(&parts.join("; "))
  }
}

impl std::error::Error for FieldErrors {}
