// flora_catalog/src/schema/validated.rs

//! Validator output types. Their fields are private and they have no public
//! constructor, so the only way to obtain one is through
//! [`validate_create`](super::validate_create) / [`validate_partial`](super::validate_partial).
//! The repository's mutating operations accept nothing else.

use crate::model::{Category, Product};

/// A complete product candidate that passed every schema rule. Carries no id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
  pub(crate) name: String,
  pub(crate) price: f64,
  pub(crate) stock_quantity: u32,
  pub(crate) description: String,
  pub(crate) category: Category,
  pub(crate) images: Vec<String>,
}

impl ValidatedProduct {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn price(&self) -> f64 {
    self.price
  }

  pub fn stock_quantity(&self) -> u32 {
    self.stock_quantity
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn category(&self) -> Category {
    self.category
  }

  pub fn images(&self) -> &[String] {
    &self.images
  }

  pub(crate) fn into_product(self, id: String) -> Product {
    Product {
      id,
      name: self.name,
      price: self.price,
      stock_quantity: self.stock_quantity,
      description: self.description,
      category: self.category,
      images: self.images,
    }
  }
}

/// A partial update that passed the schema rules for every field it carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedPatch {
  pub(crate) name: Option<String>,
  pub(crate) price: Option<f64>,
  pub(crate) stock_quantity: Option<u32>,
  pub(crate) description: Option<String>,
  pub(crate) category: Option<Category>,
  pub(crate) images: Option<Vec<String>>,
}

impl ValidatedPatch {
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn price(&self) -> Option<f64> {
    self.price
  }

  pub fn stock_quantity(&self) -> Option<u32> {
    self.stock_quantity
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn category(&self) -> Option<Category> {
    self.category
  }

  pub fn images(&self) -> Option<&[String]> {
    self.images.as_deref()
  }

  /// True when the patch carries no field at all.
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.price.is_none()
      && self.stock_quantity.is_none()
      && self.description.is_none()
      && self.category.is_none()
      && self.images.is_none()
  }

  /// Shallow merge: every present field overwrites, absent fields keep their value.
  pub(crate) fn apply_to(self, product: &mut Product) {
    if let Some(name) = self.name {
      product.name = name;
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(stock_quantity) = self.stock_quantity {
      product.stock_quantity = stock_quantity;
    }
    if let Some(description) = self.description {
      product.description = description;
    }
    if let Some(category) = self.category {
      product.category = category;
    }
    if let Some(images) = self.images {
      product.images = images;
    }
  }
}
