// flora_admin/src/services/uploads.rs

use crate::config::AppConfig;
use crate::services::images::{self, ImageSettings};
use actix_web::web;
use anyhow::Context as AnyhowContext;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Public URLs of a stored upload. Both point at the original file when it
/// could not be optimized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredUpload {
  pub url: String,
  pub thumb: String,
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `-`.
pub fn sanitize_file_name(raw: &str) -> String {
  raw
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
        c
      } else {
        '-'
      }
    })
    .collect()
}

/// `<millis>-<sanitized name>`, with `upload` standing in for a missing name.
pub fn base_name(original_name: Option<&str>, now_millis: i64) -> String {
  let safe = original_name
    .map(str::trim)
    .filter(|n| !n.is_empty())
    .map(sanitize_file_name)
    .unwrap_or_else(|| "upload".to_string());
  format!("{}-{}", now_millis, safe)
}

/// True for names this service could have produced: non-empty, sanitized,
/// and not a relative path component.
pub fn is_served_file_name(name: &str) -> bool {
  !name.is_empty() && name != "." && name != ".." && sanitize_file_name(name) == name
}

fn public_url(prefix: &str, file_name: &str) -> String {
  format!("{}/{}", prefix, file_name)
}

async fn write_file(dir: &Path, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
  let path = dir.join(file_name);
  tokio::fs::write(&path, bytes)
    .await
    .with_context(|| format!("writing '{}'", path.display()))
}

/// Optimizes on a blocking thread, then writes both renditions.
async fn store_optimized(config: &AppConfig, base: &str, bytes: web::Bytes) -> anyhow::Result<StoredUpload> {
  let settings = ImageSettings::from(config);
  let variants = web::block(move || images::optimize(&bytes, &settings))
    .await
    .map_err(|e| anyhow::anyhow!("image worker failed: {}", e))??;

  let main_name = format!("{}-opt.jpg", base);
  let thumb_name = format!("{}-thumb.jpg", base);
  write_file(&config.upload_dir, &main_name, &variants.main).await?;
  if let Err(e) = write_file(&config.upload_dir, &thumb_name, &variants.thumb).await {
    // The caller falls back to the original; drop the half-written pair.
    if let Err(cleanup) = tokio::fs::remove_file(config.upload_dir.join(&main_name)).await {
      warn!(error = %cleanup, file = %main_name, "Failed to remove optimized image after thumbnail failure.");
    }
    return Err(e);
  }

  Ok(StoredUpload {
    url: public_url(&config.upload_url_prefix, &main_name),
    thumb: public_url(&config.upload_url_prefix, &thumb_name),
  })
}

/// Stores one uploaded file under `config.upload_dir`.
///
/// Tries to produce an optimized main image and a thumbnail. If anything in
/// that path fails, the original bytes are stored unmodified and its URL is
/// returned as both `url` and `thumb`. Errors only when even the original
/// cannot be written.
#[instrument(name = "service::store_upload", skip(config, bytes), fields(size = bytes.len()), err(Display))]
pub async fn store_upload(
  config: &AppConfig,
  original_name: Option<&str>,
  bytes: web::Bytes,
) -> anyhow::Result<StoredUpload> {
  tokio::fs::create_dir_all(&config.upload_dir)
    .await
    .with_context(|| format!("creating upload directory '{}'", config.upload_dir.display()))?;

  let base = base_name(original_name, chrono::Utc::now().timestamp_millis());

  match store_optimized(config, &base, bytes.clone()).await {
    Ok(stored) => {
      info!(url = %stored.url, thumb = %stored.thumb, "Upload optimized and stored.");
      Ok(stored)
    }
    Err(e) => {
      warn!(error = ?e, "Image optimization failed, storing the original file.");
      write_file(&config.upload_dir, &base, &bytes).await?;
      let url = public_url(&config.upload_url_prefix, &base);
      info!(url = %url, "Original upload stored.");
      Ok(StoredUpload { thumb: url.clone(), url })
    }
  }
}
