// shopfront/src/cart/contexts.rs

//! Context data carried through the cart and wishlist pipelines. Inputs are set by
//! the caller; the `Option` fields are filled in by the steps as they run.

use std::sync::Arc;

use crate::auth::Actor;
use crate::models::{CartItem, Product, WishlistItem};
use crate::store::Store;

pub struct AddToCartCtx {
  pub store: Arc<dyn Store>,
  pub actor: Actor,
  pub product_id: i64,
  pub quantity: i32,
  pub product_attributes: Option<serde_json::Value>,

  pub product: Option<Product>,
  pub existing_line: Option<CartItem>,
  pub saved_line: Option<CartItem>,
}

impl AddToCartCtx {
  pub fn new(
    store: Arc<dyn Store>,
    actor: Actor,
    product_id: i64,
    quantity: i32,
    product_attributes: Option<serde_json::Value>,
  ) -> Self {
    Self {
      store,
      actor,
      product_id,
      quantity,
      product_attributes,
      product: None,
      existing_line: None,
      saved_line: None,
    }
  }

  /// Quantity the line will hold once this add is applied.
  pub fn target_quantity(&self) -> i32 {
    self
      .existing_line
      .as_ref()
      .map_or(self.quantity, |line| line.quantity.saturating_add(self.quantity))
  }
}

pub struct UpdateCartLineCtx {
  pub store: Arc<dyn Store>,
  pub actor: Actor,
  pub line_id: i64,
  pub quantity: i32,

  pub line: Option<CartItem>,
  pub product: Option<Product>,
  pub saved_line: Option<CartItem>,
}

impl UpdateCartLineCtx {
  pub fn new(store: Arc<dyn Store>, actor: Actor, line_id: i64, quantity: i32) -> Self {
    Self {
      store,
      actor,
      line_id,
      quantity,
      line: None,
      product: None,
      saved_line: None,
    }
  }
}

pub struct RemoveCartLineCtx {
  pub store: Arc<dyn Store>,
  pub actor: Actor,
  pub line_id: i64,

  pub line: Option<CartItem>,
  pub removed: bool,
}

impl RemoveCartLineCtx {
  pub fn new(store: Arc<dyn Store>, actor: Actor, line_id: i64) -> Self {
    Self {
      store,
      actor,
      line_id,
      line: None,
      removed: false,
    }
  }
}

/// What a wishlist toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistToggle {
  Added(WishlistItem),
  Removed(WishlistItem),
}

pub struct ToggleWishlistCtx {
  pub store: Arc<dyn Store>,
  pub actor: Actor,
  pub product_id: i64,

  pub existing_line: Option<WishlistItem>,
  pub outcome: Option<WishlistToggle>,
}

impl ToggleWishlistCtx {
  pub fn new(store: Arc<dyn Store>, actor: Actor, product_id: i64) -> Self {
    Self {
      store,
      actor,
      product_id,
      existing_line: None,
      outcome: None,
    }
  }
}

pub struct RemoveWishlistLineCtx {
  pub store: Arc<dyn Store>,
  pub actor: Actor,
  pub line_id: i64,

  pub line: Option<WishlistItem>,
  pub removed: bool,
}

impl RemoveWishlistLineCtx {
  pub fn new(store: Arc<dyn Store>, actor: Actor, line_id: i64) -> Self {
    Self {
      store,
      actor,
      line_id,
      line: None,
      removed: false,
    }
  }
}
