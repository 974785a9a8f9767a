// flora_admin/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use flora_catalog::{CatalogError, FieldErrors};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Submitted product data failed the schema. `values` echoes the input so
  /// a form can be re-rendered with what the user typed.
  #[error("Validation Error: {errors}")]
  Validation { errors: FieldErrors, values: Value },

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {source}")]
  Catalog {
    #[from] // Allows conversion from flora_catalog::CatalogError
    source: CatalogError,
  },

  #[error("Payload Too Large: {0}")]
  PayloadTooLarge(String),

  #[error("Upload Error: {0}")]
  Upload(String),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience in services
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(format!("{:#}", err))
  }
}

// web::block fails only when the blocking pool is gone or the task panicked.
impl From<actix_web::error::BlockingError> for AppError {
  fn from(err: actix_web::error::BlockingError) -> Self {
    AppError::Internal(format!("Blocking task failed: {}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
      AppError::Catalog { source } => match source {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::Persistence { .. } | CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Config(_) | AppError::Upload(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }

    let body = match self {
      AppError::Validation { errors, values } => json!({ "errors": errors, "values": values }),
      AppError::BadRequest(m) | AppError::NotFound(m) | AppError::PayloadTooLarge(m) => json!({ "error": m }),
      AppError::Config(m) => json!({ "error": "Configuration issue", "detail": m }),
      AppError::Catalog { source } => match source {
        CatalogError::NotFound { id } => json!({ "error": format!("Product with ID {} not found.", id) }),
        CatalogError::Validation(errors) => json!({ "errors": errors, "values": Value::Null }),
        // The cause is logged above; clients get a generic message.
        CatalogError::Persistence { .. } => json!({ "error": "Unable to save products" }),
        CatalogError::Internal(_) => json!({ "error": "An internal error occurred" }),
      },
      AppError::Upload(m) => json!({ "error": m }),
      AppError::Internal(m) => json!({ "error": "An internal error occurred", "detail": m }),
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;
  use std::path::PathBuf;

  async fn body_json(err: AppError) -> (StatusCode, Value) {
    let response = err.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_web::test]
  async fn persistence_failures_hide_the_cause() {
    let err = AppError::from(CatalogError::Persistence {
      path: PathBuf::from("data/products.json"),
      source: anyhow::anyhow!("disk full"),
    });
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Unable to save products" }));
  }

  #[actix_web::test]
  async fn catalog_not_found_maps_to_404() {
    let err = AppError::from(CatalogError::NotFound { id: "42".to_string() });
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product with ID 42 not found.");
  }

  #[actix_web::test]
  async fn validation_echoes_values() {
    let mut errors = FieldErrors::new();
    errors.add_field("name", "Name must be at least 3 characters");
    let err = AppError::Validation { errors, values: json!({ "name": "Hi" }) };
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["fieldErrors"]["name"][0], "Name must be at least 3 characters");
    assert_eq!(body["values"]["name"], "Hi");
  }
}
