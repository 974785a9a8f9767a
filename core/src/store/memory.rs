// flora_catalog/src/store/memory.rs

use super::{parse_collection, render_collection, ProductStore};
use crate::model::Product;
use anyhow::Context as AnyhowContext;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryInner {
  document: Mutex<Option<String>>,
  fail_writes: AtomicBool,
  saves: AtomicUsize,
}

/// In-process backend holding the last saved document as a JSON string.
///
/// Clones share the same document, so a test can keep a handle, hand a clone
/// to a repository, and later open a second repository over the same data to
/// simulate a restart. Writes can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<MemoryInner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts from an already persisted document.
  pub fn with_document(document: impl Into<String>) -> Self {
    let store = Self::default();
    *store.inner.document.lock() = Some(document.into());
    store
  }

  /// Makes every subsequent `save` fail (or succeed again).
  pub fn fail_writes(&self, fail: bool) {
    self.inner.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Number of successful saves so far.
  pub fn save_count(&self) -> usize {
    self.inner.saves.load(Ordering::SeqCst)
  }

  pub fn document(&self) -> Option<String> {
    self.inner.document.lock().clone()
  }
}

impl ProductStore for MemoryStore {
  fn load(&self) -> anyhow::Result<Option<Vec<Value>>> {
    match self.inner.document.lock().as_deref() {
      Some(raw) => parse_collection(raw).context("parsing in-memory document").map(Some),
      None => Ok(None),
    }
  }

  fn save(&self, products: &[Product], retained: &[Value]) -> anyhow::Result<()> {
    if self.inner.fail_writes.load(Ordering::SeqCst) {
      anyhow::bail!("simulated write failure");
    }
    let document = render_collection(products, retained).context("serializing products")?;
    *self.inner.document.lock() = Some(document);
    self.inner.saves.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  fn location(&self) -> &Path {
    Path::new(":memory:")
  }
}
