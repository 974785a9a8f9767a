// flora_catalog/src/schema/mod.rs

//! Product schema: validates untrusted input (decoded JSON or form fields
//! gathered into a JSON object) into typed records.
//!
//! Validation is pure. Every failing field is reported in one pass, so a
//! caller can show the complete list of problems at once.

pub mod field_errors;
pub(crate) mod rules;
pub mod validated;

pub use field_errors::FieldErrors;
pub use validated::{ValidatedPatch, ValidatedProduct};

use crate::model::Product;
use rules::RuleResult;
use serde_json::{Map, Value};

/// Runs `rule` on `key` if present. A missing key is reported as `Required`
/// only when `required` is set.
fn check<T>(
  object: &Map<String, Value>,
  key: &str,
  required: bool,
  errors: &mut FieldErrors,
  rule: impl FnOnce(&Value) -> RuleResult<T>,
) -> Option<T> {
  let Some(raw) = object.get(key) else {
    if required {
      errors.add_field(key, "Required");
    }
    return None;
  };
  match rule(raw) {
    Ok(value) => Some(value),
    Err(messages) => {
      for message in messages {
        errors.add_field(key, message);
      }
      None
    }
  }
}

fn as_object<'a>(input: &'a Value, errors: &mut FieldErrors) -> Option<&'a Map<String, Value>> {
  match input.as_object() {
    Some(object) => Some(object),
    None => {
      errors.add_form(format!("Expected object, received {}", rules::kind_of(input)));
      None
    }
  }
}

/// Validates a complete product candidate.
///
/// `price` and `stock_quantity` accept numeric strings. `images` defaults to
/// an empty list. Unknown keys, a client-supplied `id` included, are ignored.
pub fn validate_create(input: &Value) -> Result<ValidatedProduct, FieldErrors> {
  let mut errors = FieldErrors::new();
  let Some(object) = as_object(input, &mut errors) else {
    return Err(errors);
  };

  let name = check(object, "name", true, &mut errors, rules::name);
  let price = check(object, "price", true, &mut errors, rules::price);
  let stock_quantity = check(object, "stock_quantity", true, &mut errors, rules::stock_quantity);
  let description = check(object, "description", true, &mut errors, rules::description);
  let category = check(object, "category", true, &mut errors, rules::category);
  let images = check(object, "images", false, &mut errors, rules::images);

  match (name, price, stock_quantity, description, category) {
    (Some(name), Some(price), Some(stock_quantity), Some(description), Some(category)) if errors.is_empty() => {
      Ok(ValidatedProduct {
        name,
        price,
        stock_quantity,
        description,
        category,
        images: images.unwrap_or_default(),
      })
    }
    _ => Err(errors),
  }
}

/// Validates a partial update: every field is optional and only present
/// fields are checked.
pub fn validate_partial(input: &Value) -> Result<ValidatedPatch, FieldErrors> {
  let mut errors = FieldErrors::new();
  let Some(object) = as_object(input, &mut errors) else {
    return Err(errors);
  };

  let patch = ValidatedPatch {
    name: check(object, "name", false, &mut errors, rules::name),
    price: check(object, "price", false, &mut errors, rules::price),
    stock_quantity: check(object, "stock_quantity", false, &mut errors, rules::stock_quantity),
    description: check(object, "description", false, &mut errors, rules::description),
    category: check(object, "category", false, &mut errors, rules::category),
    images: check(object, "images", false, &mut errors, rules::images),
  };
  errors.into_result(|| patch)
}

/// Validates a record read back from storage: a non-empty string `id` plus
/// every create rule.
pub fn validate_record(input: &Value) -> Result<Product, FieldErrors> {
  let mut errors = FieldErrors::new();
  let id = input
    .as_object()
    .and_then(|object| check(object, "id", true, &mut errors, |raw| match raw.as_str() {
      Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
      Some(_) => Err(vec!["Identifier must not be empty".to_string()]),
      None => Err(vec![format!("Expected string, received {}", rules::kind_of(raw))]),
    }));

  match validate_create(input) {
    Ok(validated) => match id {
      Some(id) => Ok(validated.into_product(id)),
      None => Err(errors),
    },
    Err(create_errors) => {
      let mut merged = create_errors;
      for (field, messages) in errors.fields() {
        for message in messages {
          merged.add_field(field, message.clone());
        }
      }
      Err(merged)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Category;
  use serde_json::json;

  fn tulips() -> Value {
    json!({
      "name": "Tulip Set",
      "price": 12.5,
      "stock_quantity": 3,
      "description": "Fresh tulips, ten stems.",
      "category": "tulips",
      "images": []
    })
  }

  #[test]
  fn accepts_a_complete_candidate() {
    let v = validate_create(&tulips()).unwrap();
    assert_eq!(v.name(), "Tulip Set");
    assert_eq!(v.price(), 12.5);
    assert_eq!(v.stock_quantity(), 3);
    assert_eq!(v.category(), Category::Tulips);
    assert!(v.images().is_empty());
  }

  #[test]
  fn coerces_numeric_strings_from_forms() {
    let mut input = tulips();
    input["price"] = json!("12.50");
    input["stock_quantity"] = json!("3");
    let v = validate_create(&input).unwrap();
    assert_eq!(v.price(), 12.5);
    assert_eq!(v.stock_quantity(), 3);
  }

  #[test]
  fn images_default_to_empty_and_keep_order() {
    let mut input = tulips();
    input.as_object_mut().unwrap().remove("images");
    assert!(validate_create(&input).unwrap().images().is_empty());

    input["images"] = json!(["/uploads/b.jpg", "/uploads/a.jpg"]);
    assert_eq!(
      validate_create(&input).unwrap().images(),
      ["/uploads/b.jpg", "/uploads/a.jpg"]
    );
  }

  #[test]
  fn reports_every_invalid_field_at_once() {
    let errors = validate_create(&json!({
      "name": "Hi",
      "price": 0,
      "stock_quantity": -1,
      "description": "short",
      "category": "cactus"
    }))
    .unwrap_err();

    for field in ["name", "price", "stock_quantity", "description", "category"] {
      assert!(errors.has_field(field), "missing error for {}", field);
    }
    assert!(!errors.has_field("images"));
    assert!(errors.form_errors().is_empty());
  }

  #[test]
  fn missing_fields_are_required() {
    let errors = validate_create(&json!({})).unwrap_err();
    assert_eq!(errors.field("name").unwrap(), ["Required"]);
    assert_eq!(errors.field("category").unwrap(), ["Required"]);
    assert!(!errors.has_field("images"));
  }

  #[test]
  fn non_object_input_is_a_form_error() {
    let errors = validate_create(&json!([1, 2])).unwrap_err();
    assert_eq!(errors.form_errors(), ["Expected object, received array"]);
    assert!(validate_partial(&json!("x")).is_err());
  }

  #[test]
  fn client_supplied_id_is_ignored() {
    let mut input = tulips();
    input["id"] = json!("forged");
    assert!(validate_create(&input).is_ok());
  }

  #[test]
  fn partial_checks_only_present_fields() {
    let patch = validate_partial(&json!({ "stock_quantity": "5" })).unwrap();
    assert_eq!(patch.stock_quantity(), Some(5));
    assert!(patch.name().is_none());
    assert!(!patch.is_empty());

    assert!(validate_partial(&json!({})).unwrap().is_empty());

    let errors = validate_partial(&json!({ "name": "ab", "price": "1.00" })).unwrap_err();
    assert!(errors.has_field("name"));
    assert!(!errors.has_field("price"));
  }

  #[test]
  fn stored_records_need_an_id() {
    let mut input = tulips();
    assert!(validate_record(&input).unwrap_err().has_field("id"));

    input["id"] = json!("abc");
    assert_eq!(validate_record(&input).unwrap().id, "abc");

    input["name"] = json!("x");
    input["id"] = json!(7);
    let errors = validate_record(&input).unwrap_err();
    assert!(errors.has_field("id"));
    assert!(errors.has_field("name"));
  }
}
