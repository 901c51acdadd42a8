// shopfront/src/admin/draft.rs

use serde::{Deserialize, Serialize};

use crate::error::{ShopError, ShopResult};
use crate::models::ProductStatus;
use crate::store::ProductRecord;

pub const NAME_MAX_CHARS: usize = 255;
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 500;
pub const SKU_MAX_CHARS: usize = 100;

/// A product as submitted from the back-office form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub short_description: Option<String>,
  pub price_cents: i64,
  #[serde(default)]
  pub sale_price_cents: Option<i64>,
  pub category_id: i64,
  pub stock_quantity: i32,
  #[serde(default)]
  pub manage_stock: bool,
  #[serde(default)]
  pub in_stock: bool,
  #[serde(default)]
  pub is_featured: bool,
  pub status: ProductStatus,
  #[serde(default)]
  pub sku: Option<String>,
  #[serde(default)]
  pub attributes: Option<serde_json::Value>,
}

impl ProductDraft {
  /// Field rules that need no storage lookups. Every violated rule is reported, in field order.
  pub fn check_fields(&self) -> ShopResult<()> {
    let mut problems: Vec<String> = Vec::new();

    let name = self.name.trim();
    if name.is_empty() {
      problems.push("Product name is required.".to_string());
    } else if name.chars().count() > NAME_MAX_CHARS {
      problems.push(format!("Product name may not be longer than {NAME_MAX_CHARS} characters."));
    } else if slugify(name).is_empty() {
      problems.push("Product name must contain at least one letter or digit.".to_string());
    }

    if let Some(short) = &self.short_description {
      if short.chars().count() > SHORT_DESCRIPTION_MAX_CHARS {
        problems.push(format!(
          "Short description may not be longer than {SHORT_DESCRIPTION_MAX_CHARS} characters."
        ));
      }
    }

    if self.price_cents < 0 {
      problems.push("Price must be at least 0.".to_string());
    }
    if let Some(sale) = self.sale_price_cents {
      if sale < 0 {
        problems.push("Sale price must be at least 0.".to_string());
      } else if sale >= self.price_cents {
        problems.push("Sale price must be less than the regular price.".to_string());
      }
    }

    if self.stock_quantity < 0 {
      problems.push("Stock quantity must be at least 0.".to_string());
    }

    if let Some(sku) = self.normalized_sku() {
      if sku.chars().count() > SKU_MAX_CHARS {
        problems.push(format!("SKU may not be longer than {SKU_MAX_CHARS} characters."));
      }
    }

    if problems.is_empty() {
      Ok(())
    } else {
      Err(ShopError::Validation(problems.join(" ")))
    }
  }

  /// Blank SKUs count as absent.
  pub fn normalized_sku(&self) -> Option<&str> {
    self.sku.as_deref().map(str::trim).filter(|sku| !sku.is_empty())
  }

  pub fn slug(&self) -> String {
    slugify(&self.name)
  }

  /// The columns to write. Review statistics are carried over from `reviews` (zero for new products).
  pub fn into_record(self, reviews: (f64, i32)) -> ProductRecord {
    let slug = self.slug();
    let sku = self.normalized_sku().map(str::to_string);
    ProductRecord {
      name: self.name.trim().to_string(),
      slug,
      description: self.description,
      short_description: self.short_description,
      price_cents: self.price_cents,
      sale_price_cents: self.sale_price_cents,
      stock_quantity: self.stock_quantity,
      manage_stock: self.manage_stock,
      in_stock: self.in_stock,
      is_featured: self.is_featured,
      status: self.status,
      sku,
      category_id: self.category_id,
      rating: reviews.0,
      review_count: reviews.1,
      attributes: self.attributes,
    }
  }
}

/// Lowercase ASCII words joined by `-`. Every other character separates words.
pub fn slugify(text: &str) -> String {
  text
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|word| !word.is_empty())
    .map(str::to_ascii_lowercase)
    .collect::<Vec<_>>()
    .join("-")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> ProductDraft {
    ProductDraft {
      name: "Walnut Desk Lamp".to_string(),
      description: None,
      short_description: None,
      price_cents: 4_500,
      sale_price_cents: None,
      category_id: 1,
      stock_quantity: 10,
      manage_stock: true,
      in_stock: true,
      is_featured: false,
      status: ProductStatus::Active,
      sku: Some("  LAMP-01 ".to_string()),
      attributes: None,
    }
  }

  #[test]
  fn slugs_are_lowercase_ascii_words() {
    assert_eq!(slugify("Walnut Desk Lamp"), "walnut-desk-lamp");
    assert_eq!(slugify("  USB-C -- Hub (4 port) "), "usb-c-hub-4-port");
    assert_eq!(slugify("!!!"), "");
  }

  #[test]
  fn sale_price_must_undercut_the_price() {
    let mut d = draft();
    d.sale_price_cents = Some(4_500);
    let err = d.check_fields().unwrap_err();
    assert_eq!(err.to_string(), "Sale price must be less than the regular price.");

    d.sale_price_cents = Some(3_999);
    assert!(d.check_fields().is_ok());
  }

  #[test]
  fn every_violated_rule_is_reported() {
    let mut d = draft();
    d.name = " ".to_string();
    d.price_cents = -1;
    d.stock_quantity = -3;
    let message = d.check_fields().unwrap_err().to_string();
    assert!(message.contains("Product name is required."));
    assert!(message.contains("Price must be at least 0."));
    assert!(message.contains("Stock quantity must be at least 0."));
  }

  #[test]
  fn record_trims_and_derives_fields() {
    let record = draft().into_record((4.5, 12));
    assert_eq!(record.slug, "walnut-desk-lamp");
    assert_eq!(record.sku.as_deref(), Some("LAMP-01"));
    assert_eq!(record.review_count, 12);
  }
}
