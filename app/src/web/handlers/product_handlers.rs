// flora_admin/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::payload::ProductPayload;
use flora_catalog::{validate_create, validate_partial};

#[derive(Deserialize, Debug)]
pub struct MoveImageRequest {
  pub from: usize,
  pub to: usize,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let repository = app_state.repository.clone();
  let products = web::block(move || repository.get_all()).await?;
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let repository = app_state.repository.clone();
  let id = product_id.clone();
  match web::block(move || repository.get_by_id(&id)).await? {
    Some(product) => Ok(HttpResponse::Ok().json(json!({
        "message": "Product fetched successfully.",
        "product": product
    }))),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: ProductPayload,
) -> Result<HttpResponse, AppError> {
  let validated = validate_create(&payload.input).map_err(|errors| AppError::Validation {
    errors,
    values: payload.input.clone(),
  })?;

  let repository = app_state.repository.clone();
  let created = web::block(move || repository.create(validated)).await??;
  info!(product_id = %created.id, "Product {} created.", created.name);

  Ok(HttpResponse::Created().json(json!({
      "message": "Product created successfully.",
      "product": created
  })))
}

async fn apply_update(app_state: &AppState, product_id: String, payload: ProductPayload) -> Result<HttpResponse, AppError> {
  let patch = validate_partial(&payload.input).map_err(|errors| AppError::Validation {
    errors,
    values: payload.input.clone(),
  })?;

  let repository = app_state.repository.clone();
  let updated = web::block(move || repository.update(&product_id, patch)).await??;
  info!(product_id = %updated.id, "Product updated.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated successfully.",
      "product": updated
  })))
}

async fn apply_delete(app_state: &AppState, product_id: String) -> Result<HttpResponse, AppError> {
  let repository = app_state.repository.clone();
  let id = product_id.clone();
  let removed = web::block(move || repository.delete(&id)).await??;
  if removed {
    info!("Product {} deleted.", product_id);
  } else {
    info!("Product {} did not exist; nothing deleted.", product_id);
  }
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: ProductPayload,
) -> Result<HttpResponse, AppError> {
  apply_update(&app_state, path.into_inner(), payload).await
}

/// Form endpoint for the edit page: `intent=delete` deletes, anything else updates.
#[instrument(name = "handler::product_form_action", skip(app_state, path, payload), fields(product_id = %path.as_str(), intent = ?payload.intent))]
pub async fn product_form_action_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: ProductPayload,
) -> Result<HttpResponse, AppError> {
  if payload.is_delete_intent() {
    apply_delete(&app_state, path.into_inner()).await
  } else {
    apply_update(&app_state, path.into_inner(), payload).await
  }
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  apply_delete(&app_state, path.into_inner()).await
}

#[instrument(name = "handler::move_product_image", skip(app_state, path, body), fields(product_id = %path.as_str(), from = body.from, to = body.to))]
pub async fn move_image_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<MoveImageRequest>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let MoveImageRequest { from, to } = body.into_inner();

  let repository = app_state.repository.clone();
  let updated = web::block(move || repository.move_image(&product_id, from, to)).await??;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Image order updated.",
      "product": updated
  })))
}
