// src/lib.rs

//! Flora catalog core: the product schema and the file-backed product repository.
//!
//!  - [`schema`] turns untrusted input (decoded JSON, or form fields gathered
//!    into a JSON object) into [`ValidatedProduct`] / [`ValidatedPatch`], or a
//!    [`FieldErrors`] report listing every problem at once.
//!  - [`ProductRepository`] owns the authoritative product collection. Its
//!    mutating operations only accept validator output, persist the whole
//!    collection through a [`ProductStore`] and roll back on write failure.
//!  - [`store`] provides the backends: [`JsonFileStore`] (atomic whole-file
//!    rewrite) and [`MemoryStore`] for tests and benchmarks.

pub mod error;
pub mod model;
pub mod repository;
pub mod schema;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult};
pub use crate::model::{seed_products, Category, Product};
pub use crate::repository::ProductRepository;
pub use crate::schema::{validate_create, validate_partial, FieldErrors, ValidatedPatch, ValidatedProduct};
pub use crate::store::{JsonFileStore, MemoryStore, ProductStore};

/*
    Typical flow:
    1. Open a `ProductRepository` over a `JsonFileStore` once at startup.
    2. Per request, run `validate_create` / `validate_partial` on the decoded payload.
    3. Hand the validated value to `create` / `update`; report `FieldErrors` otherwise.
    4. Serve reads from `get_all` / `get_by_id` snapshots.
*/
