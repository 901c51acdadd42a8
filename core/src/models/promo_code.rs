// shopfront/src/models/promo_code.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "promo_code_kind", rename_all = "snake_case"))]
pub enum PromoCodeKind {
  Percentage,
  Fixed,
  FreeShipping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct PromoCode {
  pub id: i64,
  pub code: String,
  pub name: String,
  pub kind: PromoCodeKind,
  /// Percent for `Percentage`, cents for `Fixed`, unused for `FreeShipping`.
  pub value: i64,
  pub minimum_amount_cents: Option<i64>,
  pub usage_limit: Option<i32>,
  pub used_count: i32,
  pub is_active: bool,
  pub starts_at: Option<DateTime<Utc>>,
  pub expires_at: Option<DateTime<Utc>>,
}

impl PromoCode {
  /// Switched on and inside its (inclusive, open-ended) validity window.
  pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
    self.is_active
      && self.starts_at.map_or(true, |starts| starts <= now)
      && self.expires_at.map_or(true, |expires| expires >= now)
  }

  pub fn has_uses_left(&self) -> bool {
    self.usage_limit.map_or(true, |limit| self.used_count < limit)
  }
}
