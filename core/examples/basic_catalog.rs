// flora_catalog/examples/basic_catalog.rs

use flora_catalog::{validate_create, validate_partial, CatalogError, JsonFileStore, ProductRepository};
use serde_json::json;
use tracing::{info, warn};

fn main() -> Result<(), CatalogError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Catalog Example ---");

  // 1. Open the repository over a JSON file. A missing file means seed data.
  let data_file = std::env::temp_dir().join("flora-basic-catalog").join("products.json");
  let repo = ProductRepository::open(JsonFileStore::new(&data_file));
  info!("Opened {:?} with {} product(s).", repo, repo.len());

  // 2. Untrusted input goes through the validator first.
  let rejected = validate_create(&json!({
    "name": "Hi",
    "price": 0,
    "stock_quantity": -1,
    "description": "short",
    "category": "cactus"
  }));
  if let Err(errors) = rejected {
    warn!("Rejected candidate: {}", errors);
  }

  // 3. Only validated values reach the repository.
  let tulips = validate_create(&json!({
    "name": "Tulip Set",
    "price": "12.5",
    "stock_quantity": "3",
    "description": "Fresh tulips, ten stems.",
    "category": "tulips"
  }))?;
  let created = repo.create(tulips)?;
  info!("Created '{}' with id {}.", created.name, created.id);

  let restocked = repo.update(&created.id, validate_partial(&json!({ "stock_quantity": 5 }))?)?;
  info!("Restocked '{}' to {}.", restocked.name, restocked.stock_quantity);

  for product in repo.get_all() {
    info!("{:>36} | {:<20} | {:>8.2} | {:>3}", product.id, product.name, product.price, product.stock_quantity);
  }

  repo.delete(&created.id)?;
  info!("Final product count: {}. Data file: {}", repo.len(), data_file.display());
  Ok(())
}
