// tests/validation_tests.rs
mod common;

use common::*;
use flora_catalog::{validate_create, validate_partial, Category};
use serde_json::json;

#[test]
fn test_valid_input_is_coerced_to_typed_record() {
  setup_tracing();
  let input = json!({
    "name": "Mixed Spring Box",
    "price": "19.99",
    "stock_quantity": "12",
    "description": "Seasonal stems in a gift box.",
    "category": "mixed",
    "images": ["/uploads/1-box-opt.jpg"]
  });

  let validated = validate_create(&input).unwrap();
  assert_eq!(validated.price(), 19.99);
  assert_eq!(validated.stock_quantity(), 12);
  assert_eq!(validated.category(), Category::Mixed);
  assert_eq!(validated.images(), ["/uploads/1-box-opt.jpg"]);
}

#[test]
fn test_short_names_are_rejected_under_name() {
  setup_tracing();
  for name in ["", "a", "ab"] {
    let mut input = tulip_set_input();
    input["name"] = json!(name);
    let errors = validate_create(&input).unwrap_err();
    assert_eq!(
      errors.field("name").unwrap(),
      ["Name must be at least 3 characters"],
      "name {:?}",
      name
    );
  }
}

#[test]
fn test_all_five_field_errors_reported_together() {
  setup_tracing();
  let errors = validate_create(&json!({
    "name": "Hi",
    "price": 0,
    "stock_quantity": -1,
    "description": "short",
    "category": "cactus"
  }))
  .unwrap_err();

  assert_eq!(errors.field("name").unwrap(), ["Name must be at least 3 characters"]);
  assert_eq!(errors.field("price").unwrap(), ["Price must be at least 0.01"]);
  assert_eq!(errors.field("stock_quantity").unwrap(), ["Stock must be 0 or more"]);
  assert_eq!(
    errors.field("description").unwrap(),
    ["String must contain at least 10 character(s)"]
  );
  assert!(errors.field("category").unwrap()[0].contains("received 'cactus'"));
  assert_eq!(errors.fields().count(), 5);
}

#[test]
fn test_description_upper_bound() {
  setup_tracing();
  let mut input = tulip_set_input();
  input["description"] = json!("d".repeat(201));
  let errors = validate_create(&input).unwrap_err();
  assert_eq!(
    errors.field("description").unwrap(),
    ["String must contain at most 200 character(s)"]
  );
}

#[test]
fn test_fractional_stock_is_rejected() {
  setup_tracing();
  let mut input = tulip_set_input();
  input["stock_quantity"] = json!("2.5");
  let errors = validate_create(&input).unwrap_err();
  assert_eq!(errors.field("stock_quantity").unwrap(), ["Expected integer, received float"]);
}

#[test]
fn test_flattened_error_shape() {
  setup_tracing();
  let errors = validate_create(&json!({ "name": "ok name" })).unwrap_err();
  let body = serde_json::to_value(&errors).unwrap();
  assert_eq!(body["formErrors"], json!([]));
  assert_eq!(body["fieldErrors"]["price"], json!(["Required"]));
  assert!(body["fieldErrors"].get("name").is_none());
}

#[test]
fn test_partial_update_only_checks_present_fields() {
  setup_tracing();
  let patch = validate_partial(&json!({ "price": "3.25", "category": "roses" })).unwrap();
  assert_eq!(patch.price(), Some(3.25));
  assert_eq!(patch.category(), Some(Category::Roses));
  assert!(patch.description().is_none());
  assert!(patch.images().is_none());

  let errors = validate_partial(&json!({ "description": "tiny" })).unwrap_err();
  assert_eq!(errors.fields().count(), 1);
  assert!(errors.has_field("description"));
}
