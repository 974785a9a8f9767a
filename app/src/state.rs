// flora_admin/src/state.rs
use crate::config::AppConfig;
use flora_catalog::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub repository: Arc<ProductRepository>,
  pub config: Arc<AppConfig>, // Share loaded config
}

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;
  use flora_catalog::MemoryStore;

  /// State over a fresh in-memory catalog (seed data) and a private upload directory.
  pub fn test_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::new();
    let upload_dir = std::env::temp_dir()
      .join(format!("flora-admin-uploads-{}", uuid::Uuid::new_v4()))
      .display()
      .to_string();
    let config = AppConfig::from_lookup(|name| match name {
      "UPLOAD_DIR" => Some(upload_dir.clone()),
      _ => None,
    })
    .expect("test config");
    let state = AppState {
      repository: Arc::new(ProductRepository::open(store.clone())),
      config: Arc::new(config),
    };
    (state, store)
  }
}
