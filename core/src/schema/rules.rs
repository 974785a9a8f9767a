// flora_catalog/src/schema/rules.rs

//! Per-field checks. Each rule takes the raw JSON value of one field and
//! either yields the typed value or every message that applies to it.

use crate::model::Category;
use serde_json::Value;

pub(crate) const NAME_MIN_CHARS: usize = 3;
pub(crate) const DESCRIPTION_MIN_CHARS: usize = 10;
pub(crate) const DESCRIPTION_MAX_CHARS: usize = 200;
pub(crate) const PRICE_MIN: f64 = 0.01;

pub(crate) type RuleResult<T> = Result<T, Vec<String>>;

/// Name of a JSON value's kind as it appears in messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn expect_str(value: &Value) -> RuleResult<&str> {
  value
    .as_str()
    .ok_or_else(|| vec![format!("Expected string, received {}", kind_of(value))])
}

/// Numeric coercion applied to `price` and `stock_quantity`.
///
/// Strings are trimmed and parsed (an empty string is zero), booleans map to
/// 0/1 and `null` to zero. Anything else is not a number.
pub(crate) fn coerce_number(value: &Value) -> RuleResult<f64> {
  let n = match value {
    Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
    Value::String(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        0.0
      } else {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
      }
    }
    Value::Bool(b) => {
      if *b {
        1.0
      } else {
        0.0
      }
    }
    Value::Null => 0.0,
    Value::Array(_) | Value::Object(_) => f64::NAN,
  };

  if n.is_nan() {
    return Err(vec!["Expected number, received nan".to_string()]);
  }
  if n.is_infinite() {
    return Err(vec!["Number must be finite".to_string()]);
  }
  Ok(n)
}

pub(crate) fn name(value: &Value) -> RuleResult<String> {
  let s = expect_str(value)?;
  if s.chars().count() < NAME_MIN_CHARS {
    return Err(vec!["Name must be at least 3 characters".to_string()]);
  }
  Ok(s.to_string())
}

pub(crate) fn price(value: &Value) -> RuleResult<f64> {
  let n = coerce_number(value)?;
  if n < PRICE_MIN {
    return Err(vec!["Price must be at least 0.01".to_string()]);
  }
  Ok(n)
}

pub(crate) fn stock_quantity(value: &Value) -> RuleResult<u32> {
  let n = coerce_number(value)?;
  let mut messages = Vec::new();
  if n.fract() != 0.0 {
    messages.push("Expected integer, received float".to_string());
  }
  if n < 0.0 {
    messages.push("Stock must be 0 or more".to_string());
  }
  if n > f64::from(u32::MAX) {
    messages.push(format!("Number must be less than or equal to {}", u32::MAX));
  }
  if messages.is_empty() {
    Ok(n as u32)
  } else {
    Err(messages)
  }
}

pub(crate) fn description(value: &Value) -> RuleResult<String> {
  let s = expect_str(value)?;
  let len = s.chars().count();
  if len < DESCRIPTION_MIN_CHARS {
    return Err(vec![format!(
      "String must contain at least {} character(s)",
      DESCRIPTION_MIN_CHARS
    )]);
  }
  if len > DESCRIPTION_MAX_CHARS {
    return Err(vec![format!(
      "String must contain at most {} character(s)",
      DESCRIPTION_MAX_CHARS
    )]);
  }
  Ok(s.to_string())
}

fn expected_categories() -> String {
  Category::ALL
    .iter()
    .map(|c| format!("'{}'", c.as_str()))
    .collect::<Vec<_>>()
    .join(" | ")
}

pub(crate) fn category(value: &Value) -> RuleResult<Category> {
  match value {
    Value::String(s) => Category::parse(s).ok_or_else(|| {
      vec![format!(
        "Invalid enum value. Expected {}, received '{}'",
        expected_categories(),
        s
      )]
    }),
    other => Err(vec![format!(
      "Expected {}, received {}",
      expected_categories(),
      kind_of(other)
    )]),
  }
}

pub(crate) fn images(value: &Value) -> RuleResult<Vec<String>> {
  let items = value
    .as_array()
    .ok_or_else(|| vec![format!("Expected array, received {}", kind_of(value))])?;

  let mut urls = Vec::with_capacity(items.len());
  let mut messages = Vec::new();
  for item in items {
    match item.as_str() {
      Some(url) => urls.push(url.to_string()),
      None => messages.push(format!("Expected string, received {}", kind_of(item))),
    }
  }
  if messages.is_empty() {
    Ok(urls)
  } else {
    Err(messages)
  }
}
