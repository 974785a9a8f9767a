// flora_admin/src/web/handlers/upload_handlers.rs

use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header::{self, ContentDisposition, ContentType};
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::errors::AppError;
use crate::services::uploads::{self, is_served_file_name};
use crate::state::AppState;

/// Form field carrying the file in a `multipart/form-data` upload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize, Debug, Default)]
pub struct UploadQuery {
  pub filename: Option<String>,
}

fn content_type_of(req: &HttpRequest) -> Option<&str> {
  req.headers().get(header::CONTENT_TYPE).and_then(|h| h.to_str().ok())
}

/// Route guard: true for `multipart/form-data` requests.
pub fn is_form_data_upload(headers: &header::HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|h| h.to_str().ok())
    .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
    .unwrap_or(false)
}

async fn store_and_respond(
  app_state: &AppState,
  file_name: Option<&str>,
  bytes: web::Bytes,
) -> Result<HttpResponse, AppError> {
  if bytes.is_empty() {
    warn!("Upload request carried no file.");
    return Err(AppError::BadRequest("No file provided".to_string()));
  }
  info!("Received upload. Payload size: {} bytes.", bytes.len());

  match uploads::store_upload(&app_state.config, file_name, bytes).await {
    Ok(stored) => Ok(HttpResponse::Ok().json(stored)),
    Err(e) => {
      error!(error = ?e, "Upload could not be stored.");
      Err(AppError::Upload("Upload failed".to_string()))
    }
  }
}

// --- Handler Implementation ---

/// Accepts one image as the raw request body; the original name travels in `?filename=`.
#[instrument(
    name = "handler::upload",
    skip(app_state, req, query, body),
    fields(file_name = ?query.filename, content_type = ?content_type_of(&req))
)]
pub async fn upload_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query: web::Query<UploadQuery>,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  // Form uploads are routed to `multipart_upload_handler`; any other multipart
  // body would otherwise be stored envelope and all.
  if content_type_of(&req).is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/")) {
    warn!("Rejecting multipart upload that is not multipart/form-data.");
    return Err(AppError::BadRequest(format!(
      "Multipart uploads must be multipart/form-data with a '{}' field",
      UPLOAD_FIELD
    )));
  }

  let UploadQuery { filename } = query.into_inner();
  store_and_respond(&app_state, filename.as_deref(), body).await
}

fn multipart_error(e: MultipartError) -> AppError {
  AppError::BadRequest(format!("Invalid multipart body: {}", e))
}

/// Accepts a `multipart/form-data` upload. The image is the `file` field and
/// its name comes from that field's `filename`; other fields are ignored.
#[instrument(name = "handler::upload_multipart", skip(app_state, payload))]
pub async fn multipart_upload_handler(
  app_state: web::Data<AppState>,
  mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let limit = app_state.config.max_upload_bytes;
  let mut received = 0usize;
  let mut upload: Option<(Option<String>, web::Bytes)> = None;

  while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
    let disposition = field
      .headers()
      .get(header::CONTENT_DISPOSITION)
      .and_then(|h| ContentDisposition::from_raw(h).ok());
    let is_file = upload.is_none() && disposition.as_ref().and_then(|cd| cd.get_name()) == Some(UPLOAD_FIELD);

    let mut data = web::BytesMut::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
      received += chunk.len();
      if received > limit {
        warn!(limit, "Multipart upload exceeds the size limit.");
        return Err(AppError::PayloadTooLarge(format!("Upload exceeds {} bytes", limit)));
      }
      if is_file {
        data.extend_from_slice(&chunk);
      }
    }

    if is_file {
      let file_name = disposition.as_ref().and_then(|cd| cd.get_filename()).map(str::to_string);
      upload = Some((file_name, data.freeze()));
    }
  }

  match upload {
    Some((file_name, bytes)) => store_and_respond(&app_state, file_name.as_deref(), bytes).await,
    None => {
      warn!("Multipart upload had no '{}' field.", UPLOAD_FIELD);
      Err(AppError::BadRequest("No file provided".to_string()))
    }
  }
}

pub async fn upload_method_not_allowed_handler() -> HttpResponse {
  HttpResponse::MethodNotAllowed()
    .insert_header(("Allow", "POST"))
    .json(serde_json::json!({ "error": "Method not allowed" }))
}

fn content_type_for(file_name: &str) -> ContentType {
  let lower = file_name.to_ascii_lowercase();
  if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
    ContentType::jpeg()
  } else if lower.ends_with(".png") {
    ContentType::png()
  } else {
    ContentType::octet_stream()
  }
}

#[instrument(name = "handler::serve_upload", skip(app_state, path), fields(file_name = %path.as_str()))]
pub async fn serve_upload_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let file_name = path.into_inner();
  if !is_served_file_name(&file_name) {
    return Err(AppError::NotFound(format!("Upload '{}' not found.", file_name)));
  }

  let full_path = app_state.config.upload_dir.join(&file_name);
  match tokio::fs::read(&full_path).await {
    Ok(bytes) => Ok(HttpResponse::Ok().content_type(content_type_for(&file_name)).body(bytes)),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      Err(AppError::NotFound(format!("Upload '{}' not found.", file_name)))
    }
    Err(e) => Err(AppError::Internal(format!("reading '{}': {}", full_path.display(), e))),
  }
}
