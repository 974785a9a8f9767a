// flora_catalog/src/error.rs
use crate::schema::FieldErrors;
use anyhow::Error as AnyhowError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Product not found: {id}")]
  NotFound { id: String },

  #[error("Validation failed: {0}")]
  Validation(FieldErrors),

  #[error("Failed to persist products to '{}'. Source: {source}", path.display())]
  Persistence {
    path: PathBuf,
    #[source]
    source: AnyhowError,
  },

  #[error("Internal catalog error: {0}")]
  Internal(String),
}

impl From<FieldErrors> for CatalogError {
  fn from(errors: FieldErrors) -> Self {
    CatalogError::Validation(errors)
  }
}

impl CatalogError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, CatalogError::NotFound { .. })
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
