// shopfront/src/catalog/sort.rs

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::Product;

/// Listing order. Ties always fall back to insertion order (ascending id), so a
/// given query pages deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  /// Newest first.
  #[default]
  Latest,
  PriceLow,
  PriceHigh,
  Rating,
  Popular,
}

impl SortKey {
  /// Parses a query-string value; anything unrecognised means `Latest`.
  pub fn from_param(value: Option<&str>) -> Self {
    match value {
      Some("price_low") => SortKey::PriceLow,
      Some("price_high") => SortKey::PriceHigh,
      Some("rating") => SortKey::Rating,
      Some("popular") => SortKey::Popular,
      _ => SortKey::Latest,
    }
  }

  pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
    let primary = match self {
      SortKey::Latest => b.created_at.cmp(&a.created_at),
      SortKey::PriceLow => a.price_cents.cmp(&b.price_cents),
      SortKey::PriceHigh => b.price_cents.cmp(&a.price_cents),
      SortKey::Rating => b.rating.total_cmp(&a.rating),
      SortKey::Popular => b.review_count.cmp(&a.review_count),
    };
    primary.then(a.id.cmp(&b.id))
  }
}
