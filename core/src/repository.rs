// flora_catalog/src/repository.rs

//! Defines `ProductRepository`, the single owner of the product collection and
//! of its persisted copy.
//!
//! The collection lives behind a `parking_lot::RwLock`. Reads take a shared
//! lock and return owned snapshots. Every mutation holds the write lock for
//! the whole read-modify-persist sequence, so concurrent requests are
//! serialized and cannot lose each other's updates. When the backend fails
//! to persist, the in-memory collection is restored to its previous state
//! before the error is returned.
//!
//! Lock guards are blocking; callers in async code should run these methods
//! on a blocking thread (e.g. `actix_web::web::block`).

use crate::error::{CatalogError, CatalogResult};
use crate::model::{seed_products, Product};
use crate::schema::{self, FieldErrors, ValidatedPatch, ValidatedProduct};
use crate::store::ProductStore;

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{event, instrument, Level};
use uuid::Uuid;

pub struct ProductRepository {
  store: Box<dyn ProductStore>,
  collection: RwLock<Collection>,
}

#[derive(Debug, Clone, Default)]
struct Collection {
  products: Vec<Product>,
  // Stored records skipped at load time. Written back untouched on every save.
  retained: Vec<Value>,
}

impl std::fmt::Debug for ProductRepository {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let collection = self.collection.read();
    f.debug_struct("ProductRepository")
      .field("location", &self.store.location())
      .field("products", &collection.products.len())
      .field("retained", &collection.retained.len())
      .finish()
  }
}

fn record_id(record: &Value) -> Option<&str> {
  record.get("id").and_then(Value::as_str)
}

/// Builds the starting collection from whatever the backend returned.
///
/// Records that fail validation or reuse an earlier id are kept aside with a
/// warning and written back on the next save. A missing or unreadable
/// collection falls back to the seed data.
fn initial_collection(loaded: anyhow::Result<Option<Vec<Value>>>, location: &str) -> Collection {
  let records = match loaded {
    Ok(Some(records)) => records,
    Ok(None) => {
      event!(Level::INFO, %location, "No persisted products found, starting from seed data.");
      return Collection { products: seed_products(), retained: Vec::new() };
    }
    Err(e) => {
      event!(Level::WARN, %location, error = ?e, "Failed to load products, starting from seed data.");
      return Collection { products: seed_products(), retained: Vec::new() };
    }
  };

  let mut seen = HashSet::new();
  let mut collection = Collection {
    products: Vec::with_capacity(records.len()),
    retained: Vec::new(),
  };
  for (index, record) in records.into_iter().enumerate() {
    match schema::validate_record(&record) {
      Ok(product) => {
        if seen.insert(product.id.clone()) {
          collection.products.push(product);
        } else {
          event!(Level::WARN, %location, index, id = %product.id, "Stored product reuses an earlier id; keeping it aside.");
          collection.retained.push(record);
        }
      }
      Err(errors) => {
        event!(Level::WARN, %location, index, %errors, "Stored product fails validation; keeping it aside.");
        collection.retained.push(record);
      }
    }
  }
  event!(
    Level::INFO,
    %location,
    count = collection.products.len(),
    retained = collection.retained.len(),
    "Products loaded."
  );
  collection
}

impl ProductRepository {
  /// Opens the repository over `store`, loading the persisted collection once.
  ///
  /// Never fails: an absent or unreadable collection yields the seed data.
  pub fn open(store: impl ProductStore) -> Self {
    let location = store.location().display().to_string();
    let collection = initial_collection(store.load(), &location);
    Self {
      store: Box::new(store),
      collection: RwLock::new(collection),
    }
  }

  /// Snapshot of every product in insertion order.
  pub fn get_all(&self) -> Vec<Product> {
    let products = self.collection.read().products.clone();
    event!(Level::DEBUG, count = products.len(), "Returning all products.");
    products
  }

  pub fn len(&self) -> usize {
    self.collection.read().products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.collection.read().products.is_empty()
  }

  /// Number of stored records that could not be loaded and are carried along unchanged.
  pub fn retained_len(&self) -> usize {
    self.collection.read().retained.len()
  }

  pub fn get_by_id(&self, id: &str) -> Option<Product> {
    self.collection.read().products.iter().find(|p| p.id == id).cloned()
  }

  /// Stores a new product under a freshly generated id and persists the collection.
  #[instrument(name = "ProductRepository::create", skip(self, data), fields(name = %data.name()), err(Display))]
  pub fn create(&self, data: ValidatedProduct) -> CatalogResult<Product> {
    self.mutate("create", move |collection| {
      let id = loop {
        let candidate = Uuid::new_v4().to_string();
        let taken = collection.products.iter().any(|p| p.id == candidate)
          || collection.retained.iter().any(|r| record_id(r) == Some(candidate.as_str()));
        if !taken {
          break candidate;
        }
      };
      let product = data.into_product(id);
      collection.products.push(product.clone());
      event!(Level::INFO, id = %product.id, name = %product.name, "Product created.");
      Ok(product)
    })
  }

  /// Merges `patch` over the stored product and persists the collection.
  #[instrument(name = "ProductRepository::update", skip(self, patch), err(Display))]
  pub fn update(&self, id: &str, patch: ValidatedPatch) -> CatalogResult<Product> {
    self.mutate("update", |collection| {
      let product = find_mut(&mut collection.products, id)?;
      patch.apply_to(product);
      event!(Level::INFO, id = %product.id, "Product updated.");
      Ok(product.clone())
    })
  }

  /// Removes the product with `id`, if any, and persists the collection.
  /// Retained records carrying the same id go with it.
  ///
  /// Deleting an unknown id is not an error; it returns `Ok(false)` and
  /// leaves the persisted file untouched.
  #[instrument(name = "ProductRepository::delete", skip(self), err(Display))]
  pub fn delete(&self, id: &str) -> CatalogResult<bool> {
    if self.get_by_id(id).is_none() {
      event!(Level::DEBUG, "Nothing to delete.");
      return Ok(false);
    }
    self.mutate("delete", |collection| {
      let before = collection.products.len();
      collection.products.retain(|p| p.id != id);
      collection.retained.retain(|r| record_id(r) != Some(id));
      let removed = collection.products.len() != before;
      if removed {
        event!(Level::INFO, "Product deleted.");
      }
      Ok(removed)
    })
  }

  /// Moves the image at `from` to position `to` in the product's gallery,
  /// shifting the images in between.
  #[instrument(name = "ProductRepository::move_image", skip(self), err(Display))]
  pub fn move_image(&self, id: &str, from: usize, to: usize) -> CatalogResult<Product> {
    self.mutate("move_image", |collection| {
      let product = find_mut(&mut collection.products, id)?;
      let len = product.images.len();
      let mut errors = FieldErrors::new();
      for index in [from, to] {
        if index >= len {
          errors.add_field("images", format!("Image index {} is out of range (gallery has {} images)", index, len));
        }
      }
      if !errors.is_empty() {
        return Err(CatalogError::Validation(errors));
      }
      let image = product.images.remove(from);
      product.images.insert(to, image);
      Ok(product.clone())
    })
  }

  /// Writes the current collection to the backend, e.g. on shutdown.
  pub fn flush(&self) -> CatalogResult<()> {
    let collection = self.collection.read();
    self
      .store
      .save(&collection.products, &collection.retained)
      .map_err(|source| CatalogError::Persistence {
        path: self.store.location().to_path_buf(),
        source,
      })
  }

  /// Applies `op` under the write lock and persists the result.
  ///
  /// If `op` fails nothing is written. If the write fails the collection is
  /// restored to its state before `op` ran.
  fn mutate<T>(&self, op_name: &str, op: impl FnOnce(&mut Collection) -> CatalogResult<T>) -> CatalogResult<T> {
    let mut collection = self.collection.write();
    let previous = collection.clone();

    let value = op(&mut *collection)?;

    if let Err(source) = self.store.save(&collection.products, &collection.retained) {
      *collection = previous;
      event!(
        Level::ERROR,
        op = op_name,
        location = %self.store.location().display(),
        error = ?source,
        "Persisting products failed; in-memory change rolled back."
      );
      return Err(CatalogError::Persistence {
        path: self.store.location().to_path_buf(),
        source,
      });
    }
    Ok(value)
  }
}

fn find_mut<'a>(products: &'a mut [Product], id: &str) -> CatalogResult<&'a mut Product> {
  products
    .iter_mut()
    .find(|p| p.id == id)
    .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
}
