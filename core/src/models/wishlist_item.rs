// shopfront/src/models/wishlist_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct WishlistItem {
  pub id: i64,
  pub user_id: Uuid,
  pub product_id: i64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WishlistLine {
  #[serde(flatten)]
  pub item: WishlistItem,
  pub product: Product,
}
