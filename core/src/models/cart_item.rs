// shopfront/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CartItem {
  pub id: i64,
  pub user_id: Uuid,
  pub product_id: i64,
  pub quantity: i32,
  /// The shopper's option selection, e.g. `{"color": "Red", "size": "M"}`.
  pub product_attributes: Option<serde_json::Value>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A cart line joined with its product, as read for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
  #[serde(flatten)]
  pub item: CartItem,
  pub product: Product,
}

impl CartLine {
  pub fn line_total_cents(&self) -> i64 {
    self.product.effective_price_cents() * i64::from(self.item.quantity)
  }
}
