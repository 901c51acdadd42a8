// shopfront/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "order_status", rename_all = "lowercase"))]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

/// Orders are written by checkout, outside this crate; the back-office only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
  pub id: i64,
  pub order_number: String,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_cents: i64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  pub price_cents: i64,
}
