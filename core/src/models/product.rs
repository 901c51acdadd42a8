// shopfront/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "product_status", rename_all = "lowercase"))]
pub enum ProductStatus {
  Draft,
  Active,
  Inactive,
}

impl ProductStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProductStatus::Draft => "draft",
      ProductStatus::Active => "active",
      ProductStatus::Inactive => "inactive",
    }
  }
}

impl fmt::Display for ProductStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ProductStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "draft" => Ok(ProductStatus::Draft),
      "active" => Ok(ProductStatus::Active),
      "inactive" => Ok(ProductStatus::Inactive),
      other => Err(format!("Unknown product status '{}'.", other)),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub short_description: Option<String>,
  pub price_cents: i64,
  pub sale_price_cents: Option<i64>,
  pub stock_quantity: i32,
  pub manage_stock: bool,
  pub in_stock: bool,
  pub is_featured: bool,
  pub status: ProductStatus,
  pub sku: Option<String>,
  pub category_id: i64,
  /// 0.0 to 5.0, one decimal.
  pub rating: f64,
  pub review_count: i32,
  /// Selectable options such as colors and sizes.
  pub attributes: Option<serde_json::Value>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// The price a shopper pays: the sale price when one is set.
  pub fn effective_price_cents(&self) -> i64 {
    self.sale_price_cents.unwrap_or(self.price_cents)
  }

  pub fn is_on_sale(&self) -> bool {
    self.sale_price_cents.is_some()
  }

  /// Visible on the public storefront.
  pub fn is_listed(&self) -> bool {
    self.status == ProductStatus::Active && self.in_stock
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_round_trips_through_its_text_form() {
    for status in [ProductStatus::Draft, ProductStatus::Active, ProductStatus::Inactive] {
      assert_eq!(status.as_str().parse::<ProductStatus>(), Ok(status));
    }
    assert!("archived".parse::<ProductStatus>().is_err());
  }
}
