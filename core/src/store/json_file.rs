// flora_catalog/src/store/json_file.rs

use super::{parse_collection, render_collection, ProductStore};
use crate::model::Product;
use anyhow::Context as AnyhowContext;
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Keeps the collection in a single pretty-printed UTF-8 JSON file.
///
/// Every save rewrites the whole file: the document is written to a sibling
/// `.tmp` file, flushed to disk and then renamed over the target, so readers
/// see either the previous or the new collection, never a torn write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(|n| n.to_os_string())
      .unwrap_or_else(|| "products.json".into());
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
  let mut file = File::create(path).with_context(|| format!("creating '{}'", path.display()))?;
  file
    .write_all(bytes)
    .with_context(|| format!("writing '{}'", path.display()))?;
  file.sync_all().with_context(|| format!("syncing '{}'", path.display()))
}

impl ProductStore for JsonFileStore {
  fn load(&self) -> anyhow::Result<Option<Vec<Value>>> {
    if !self.path.exists() {
      event!(Level::DEBUG, path = %self.path.display(), "Data file does not exist yet.");
      return Ok(None);
    }
    let raw = fs::read_to_string(&self.path).with_context(|| format!("reading '{}'", self.path.display()))?;
    let records = parse_collection(&raw).with_context(|| format!("parsing '{}'", self.path.display()))?;
    event!(Level::DEBUG, path = %self.path.display(), records = records.len(), "Data file read.");
    Ok(Some(records))
  }

  fn save(&self, products: &[Product], retained: &[Value]) -> anyhow::Result<()> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir).with_context(|| format!("creating data directory '{}'", dir.display()))?;
    }

    let document = render_collection(products, retained).context("serializing products")?;
    let tmp = self.temp_path();
    write_and_sync(&tmp, document.as_bytes())?;
    fs::rename(&tmp, &self.path)
      .with_context(|| format!("replacing '{}' with '{}'", self.path.display(), tmp.display()))?;

    event!(Level::DEBUG, path = %self.path.display(), records = products.len() + retained.len(), "Data file rewritten.");
    Ok(())
  }

  fn location(&self) -> &Path {
    &self.path
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::seed_products;

  fn scratch_file(tag: &str) -> PathBuf {
    std::env::temp_dir()
      .join(format!("flora-json-store-{}-{}", tag, uuid::Uuid::new_v4()))
      .join("data")
      .join("products.json")
  }

  #[test]
  fn missing_file_loads_as_none() {
    let store = JsonFileStore::new(scratch_file("missing"));
    assert!(store.load().unwrap().is_none());
  }

  #[test]
  fn save_creates_directories_and_leaves_no_temp_file() {
    let path = scratch_file("save");
    let store = JsonFileStore::new(&path);
    store.save(&seed_products(), &[]).unwrap();

    assert!(path.exists());
    assert!(!store.temp_path().exists());
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n"), "document should be pretty-printed");
    assert_eq!(store.load().unwrap().unwrap().len(), 1);
  }

  #[test]
  fn retained_records_follow_the_products() {
    let store = JsonFileStore::new(scratch_file("retained"));
    let kept = serde_json::json!({ "id": "legacy", "category": "orchids" });
    store.save(&seed_products(), std::slice::from_ref(&kept)).unwrap();

    let records = store.load().unwrap().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "1");
    assert_eq!(records[1], kept);
  }

  #[test]
  fn non_array_document_is_an_error() {
    let path = scratch_file("object");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{\"id\": \"1\"}").unwrap();
    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(format!("{:#}", err).contains("expected a JSON array"));
  }

  #[test]
  fn temp_file_sits_next_to_target() {
    let store = JsonFileStore::new("data/products.json");
    assert_eq!(store.temp_path(), PathBuf::from("data/products.json.tmp"));
  }
}
