// shopfront/src/cart/update.rs

use tracing::{info, warn};

use super::contexts::UpdateCartLineCtx;
use super::{ensure_stock_covers, UPDATE_SHORTFALL};
use crate::engine::{ContextData, PipelineControl};
use crate::error::{ShopError, ShopResult};
use crate::pipeline::Pipeline;

pub const UPDATE_CART_LINE: &str = "update_cart_line";

/// Sets a line's quantity outright. Ownership is checked before the stock read.
pub fn update_cart_line_pipeline() -> Pipeline<UpdateCartLineCtx, ShopError> {
  let mut p = Pipeline::new(
    UPDATE_CART_LINE,
    &[
      ("validate_quantity", false, None),
      ("load_line", false, None),
      ("check_ownership", false, None),
      ("load_product", false, None),
      ("check_stock", false, None),
      ("save_quantity", false, None),
    ],
  );

  p.on_step("validate_quantity", validate_quantity);
  p.on_step("load_line", load_line);
  p.on_step("check_ownership", check_ownership);
  p.on_step("load_product", load_product);
  p.on_step("check_stock", check_stock);
  p.on_step("save_quantity", save_quantity);
  p
}

async fn validate_quantity(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let quantity = ctx.read().quantity;
  if quantity < 1 {
    warn!(quantity, "Rejected cart update with a non-positive quantity.");
    return Err(ShopError::validation("Quantity must be at least 1."));
  }
  Ok(PipelineControl::Continue)
}

async fn load_line(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let (store, line_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.line_id)
  };

  let line = store
    .find_cart_item(line_id)
    .await?
    .ok_or_else(|| ShopError::not_found("Cart item", line_id))?;

  ctx.write().line = Some(line);
  Ok(PipelineControl::Continue)
}

async fn check_ownership(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let guard = ctx.read();
  if let Some(line) = guard.line.as_ref() {
    guard.actor.ensure_owns(line.user_id)?;
  }
  Ok(PipelineControl::Continue)
}

async fn load_product(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let (store, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.line.as_ref().map(|line| line.product_id))
  };
  let Some(product_id) = product_id else {
    return Ok(PipelineControl::Continue);
  };

  let product = store
    .find_product(product_id)
    .await?
    .ok_or_else(|| ShopError::not_found("Product", product_id))?;

  ctx.write().product = Some(product);
  Ok(PipelineControl::Continue)
}

async fn check_stock(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let guard = ctx.read();
  if let Some(product) = guard.product.as_ref() {
    ensure_stock_covers(product, guard.quantity, UPDATE_SHORTFALL)?;
  }
  Ok(PipelineControl::Continue)
}

async fn save_quantity(ctx: ContextData<UpdateCartLineCtx>) -> ShopResult<PipelineControl> {
  let (store, line_id, quantity) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.line_id, guard.quantity)
  };

  let saved = store
    .set_cart_quantity(line_id, quantity)
    .await?
    .ok_or_else(|| ShopError::not_found("Cart item", line_id))?;

  info!(line_id, quantity, "Updated cart line quantity.");
  ctx.write().saved_line = Some(saved);
  Ok(PipelineControl::Continue)
}
