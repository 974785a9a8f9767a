// flora_catalog/src/model.rs

//! The `Product` record as it is stored and served, plus the seed catalog used
//! when no persisted file is available.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category. Serialized in lowercase (`"roses"`, `"tulips"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Roses,
  Tulips,
  Lilies,
  Mixed,
}

impl Category {
  /// Every category, in the order forms list them.
  pub const ALL: [Category; 4] = [Category::Roses, Category::Tulips, Category::Lilies, Category::Mixed];

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Roses => "roses",
      Category::Tulips => "tulips",
      Category::Lilies => "lilies",
      Category::Mixed => "mixed",
    }
  }

  /// Exact, case-sensitive lookup.
  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.as_str() == raw)
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A catalog entry.
///
/// Values of this type held by a `ProductRepository` always satisfy the
/// schema constraints; they are only ever built from validator output or
/// from records that passed the validator at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub stock_quantity: u32,
  pub description: String,
  pub category: Category,
  /// Gallery order. The first entry is the listing thumbnail.
  #[serde(default)]
  pub images: Vec<String>,
}

/// The catalog used when the data file is missing or unreadable.
pub fn seed_products() -> Vec<Product> {
  vec![Product {
    id: "1".to_string(),
    name: "Red Roses Bouquet".to_string(),
    price: 45.0,
    stock_quantity: 10,
    description: "A beautiful bouquet of red roses.".to_string(),
    category: Category::Roses,
    images: vec!["https://placehold.co/150".to_string()],
  }]
}
