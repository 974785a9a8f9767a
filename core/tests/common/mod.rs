// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use flora_catalog::{validate_create, ValidatedProduct};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::Level;

// --- Common Fixtures ---

pub fn tulip_set_input() -> Value {
  json!({
    "name": "Tulip Set",
    "price": 12.5,
    "stock_quantity": 3,
    "description": "Fresh tulips, ten stems.",
    "category": "tulips",
    "images": []
  })
}

pub fn tulip_set() -> ValidatedProduct {
  validate_create(&tulip_set_input()).expect("fixture must validate")
}

pub fn named_product(name: &str) -> ValidatedProduct {
  let mut input = tulip_set_input();
  input["name"] = json!(name);
  validate_create(&input).expect("fixture must validate")
}

// --- Scratch directories for file-backed tests ---

/// A fresh, not-yet-created `products.json` path under the system temp dir.
pub fn scratch_data_file(tag: &str) -> PathBuf {
  std::env::temp_dir()
    .join(format!("flora-catalog-{}-{}", tag, uuid::Uuid::new_v4()))
    .join("products.json")
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
