// flora_admin/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Product storage
  pub data_file: PathBuf,
  // Write the seed catalog to `data_file` at startup when the file does not exist yet.
  pub seed_data_file: bool,

  // Uploads
  pub upload_dir: PathBuf,
  pub upload_url_prefix: String,
  pub max_upload_bytes: usize,
  pub main_image_max_width: u32,
  pub thumbnail_size: u32,
}

fn parse_var<T>(var_name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    Some(value) => value
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    None => Ok(default),
  }
}

/// `/uploads/` and `uploads` both become `/uploads`.
fn normalize_url_prefix(raw: &str) -> String {
  let trimmed = raw.trim().trim_matches('/');
  format!("/{}", trimmed)
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  /// Builds the configuration from an arbitrary variable source.
  pub fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = parse_var("SERVER_PORT", get_env("SERVER_PORT"), 8080u16)?;

    let data_file = PathBuf::from(get_env("DATA_FILE").unwrap_or_else(|| "data/products.json".to_string()));
    let seed_data_file = parse_var("SEED_DATA_FILE", get_env("SEED_DATA_FILE"), false)?;

    let upload_dir = PathBuf::from(get_env("UPLOAD_DIR").unwrap_or_else(|| "public/uploads".to_string()));
    let upload_url_prefix = normalize_url_prefix(&get_env("UPLOAD_URL_PREFIX").unwrap_or_else(|| "/uploads".to_string()));
    if upload_url_prefix == "/" {
      return Err(AppError::Config("UPLOAD_URL_PREFIX must not be the site root".to_string()));
    }
    let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", get_env("MAX_UPLOAD_BYTES"), 10 * 1024 * 1024usize)?;
    let main_image_max_width = parse_var("MAIN_IMAGE_MAX_WIDTH", get_env("MAIN_IMAGE_MAX_WIDTH"), 1200u32)?;
    let thumbnail_size = parse_var("THUMBNAIL_SIZE", get_env("THUMBNAIL_SIZE"), 400u32)?;
    if main_image_max_width == 0 || thumbnail_size == 0 {
      return Err(AppError::Config(
        "MAIN_IMAGE_MAX_WIDTH and THUMBNAIL_SIZE must be positive".to_string(),
      ));
    }

    Ok(Self {
      server_host,
      server_port,
      data_file,
      seed_data_file,
      upload_dir,
      upload_url_prefix,
      max_upload_bytes,
      main_image_max_width,
      thumbnail_size,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
