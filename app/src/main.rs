// flora_admin/src/main.rs

mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use flora_catalog::{JsonFileStore, ProductRepository};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting flora admin server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let data_file_existed = app_config.data_file.exists();
  let repository = Arc::new(ProductRepository::open(JsonFileStore::new(&app_config.data_file)));
  tracing::info!(
    "Product catalog opened from {} with {} products.",
    app_config.data_file.display(),
    repository.len()
  );

  if app_config.seed_data_file && !data_file_existed {
    if let Err(e) = repository.flush() {
      tracing::error!(error = %e, "Failed to write the initial catalog file.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
    tracing::info!("Initial catalog written to {}.", app_config.data_file.display());
  }

  let app_state = AppState {
    repository,
    config: app_config.clone(),
  };

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    let config = app_state.config.clone();
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(move |cfg| web::configure_app_routes(cfg, &config))
  })
  .bind(&server_address)?
  .run()
  .await
}
