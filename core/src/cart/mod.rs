// shopfront/src/cart/mod.rs

//! Cart consistency manager. Every cart and wishlist mutation is a named-step
//! pipeline over its own context type, registered once in a `Workflows` registry.

pub mod add;
pub mod contexts;
pub mod remove;
pub mod update;
pub mod wishlist;

use serde::Serialize;

use crate::error::{ShopError, ShopResult};
use crate::models::{CartLine, Product};
use crate::registry::Workflows;

pub use contexts::{
  AddToCartCtx, RemoveCartLineCtx, RemoveWishlistLineCtx, ToggleWishlistCtx, UpdateCartLineCtx, WishlistToggle,
};

pub const ADDED_TO_CART: &str = "Product added to cart successfully!";
pub const CART_UPDATED: &str = "Cart updated successfully!";
pub const REMOVED_FROM_CART: &str = "Item removed from cart!";
pub const ADDED_TO_WISHLIST: &str = "Product added to wishlist!";
pub const REMOVED_FROM_WISHLIST: &str = "Product removed from wishlist!";
pub const WISHLIST_LINE_REMOVED: &str = "Item removed from wishlist!";

pub(crate) const FRESH_SHORTFALL: &str = "Product is out of stock or insufficient quantity available.";
pub(crate) const MERGE_SHORTFALL: &str = "Cannot add more items. Insufficient stock.";
pub(crate) const UPDATE_SHORTFALL: &str = "Insufficient stock available.";

/// Only stock-managed products limit the quantity.
pub(crate) fn ensure_stock_covers(product: &Product, quantity: i32, message: &'static str) -> ShopResult<()> {
  if product.manage_stock && product.stock_quantity < quantity {
    tracing::warn!(
      product_id = product.id,
      available = product.stock_quantity,
      requested = quantity,
      "Insufficient stock."
    );
    return Err(ShopError::InsufficientStock {
      product_id: product.id,
      available: product.stock_quantity,
      requested: quantity,
      message,
    });
  }
  Ok(())
}

/// The success message of a mutation, plus the line it left behind when there is one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice<T> {
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line: Option<T>,
}

impl<T> Notice<T> {
  pub fn new(message: &'static str, line: Option<T>) -> Self {
    Self { message, line }
  }
}

/// A cart as displayed. The subtotal is recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
  pub lines: Vec<CartLine>,
  pub subtotal_cents: i64,
  pub item_count: i64,
}

impl CartSummary {
  pub fn new(lines: Vec<CartLine>) -> Self {
    Self {
      subtotal_cents: subtotal_cents(&lines),
      item_count: lines.iter().map(|line| i64::from(line.item.quantity)).sum(),
      lines,
    }
  }
}

/// Sum of effective price times quantity.
pub fn subtotal_cents(lines: &[CartLine]) -> i64 {
  lines.iter().map(CartLine::line_total_cents).sum()
}

/// Registers the cart and wishlist pipelines.
pub fn register_all_pipelines(workflows: &Workflows<ShopError>) {
  workflows.register_pipeline(add::add_to_cart_pipeline());
  workflows.register_pipeline(update::update_cart_line_pipeline());
  workflows.register_pipeline(remove::remove_cart_line_pipeline());
  workflows.register_pipeline(wishlist::toggle_wishlist_pipeline());
  workflows.register_pipeline(wishlist::remove_wishlist_line_pipeline());
  tracing::info!("Cart and wishlist pipelines registered.");
}
