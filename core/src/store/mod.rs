// flora_catalog/src/store/mod.rs

//! Storage backends for the product collection.
//!
//! A backend only moves whole collections in and out. It knows nothing about
//! validation or identifiers; the repository decides what a loaded record is
//! worth and what gets written.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::model::Product;
use serde_json::Value;
use std::path::Path;

/// A durable home for the product collection.
pub trait ProductStore: Send + Sync + 'static {
  /// Reads the persisted collection as raw JSON records.
  ///
  /// Returns `Ok(None)` when nothing has been persisted yet.
  fn load(&self) -> anyhow::Result<Option<Vec<Value>>>;

  /// Replaces the persisted collection with `products`, in order, followed
  /// by `retained`: stored records the repository could not load but must
  /// not lose.
  fn save(&self, products: &[Product], retained: &[Value]) -> anyhow::Result<()>;

  /// Where the collection lives, for logs and error reports.
  fn location(&self) -> &Path;
}

/// Parses a persisted document, which must be a JSON array.
pub(crate) fn parse_collection(raw: &str) -> anyhow::Result<Vec<Value>> {
  match serde_json::from_str::<Value>(raw)? {
    Value::Array(records) => Ok(records),
    other => anyhow::bail!(
      "expected a JSON array of products, found {}",
      crate::schema::rules::kind_of(&other)
    ),
  }
}

/// Renders the persisted document: products first, retained records after.
pub(crate) fn render_collection(products: &[Product], retained: &[Value]) -> anyhow::Result<String> {
  let mut records = Vec::with_capacity(products.len() + retained.len());
  for product in products {
    records.push(serde_json::to_value(product)?);
  }
  records.extend(retained.iter().cloned());
  Ok(serde_json::to_string_pretty(&records)?)
}
