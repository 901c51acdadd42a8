// shopfront/src/cart/add.rs

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::contexts::AddToCartCtx;
use super::{ensure_stock_covers, FRESH_SHORTFALL, MERGE_SHORTFALL};
use crate::engine::{ContextData, PipelineControl, SkipCondition};
use crate::error::{ShopError, ShopResult};
use crate::pipeline::Pipeline;
use crate::store::NewCartItem;

pub const ADD_TO_CART: &str = "add_to_cart";

/// validate -> load product -> find the user's line -> check stock -> re-read and
/// re-check -> merge into the existing line or create a new one.
pub fn add_to_cart_pipeline() -> Pipeline<AddToCartCtx, ShopError> {
  let has_no_line: SkipCondition<AddToCartCtx> =
    Arc::new(|ctx: ContextData<AddToCartCtx>| ctx.read().existing_line.is_none());
  let has_line: SkipCondition<AddToCartCtx> =
    Arc::new(|ctx: ContextData<AddToCartCtx>| ctx.read().existing_line.is_some());

  let mut p = Pipeline::new(
    ADD_TO_CART,
    &[
      ("validate_quantity", false, None),
      ("load_product", false, None),
      ("find_existing_line", false, None),
      ("check_stock", false, None),
      ("recheck_stock_before_write", false, None),
      ("merge_into_existing_line", false, Some(has_no_line)),
      ("create_line", false, Some(has_line)),
    ],
  );

  p.on_step("validate_quantity", validate_quantity);
  p.on_step("load_product", load_product);
  p.on_step("find_existing_line", find_existing_line);
  p.on_step("check_stock", check_stock);
  p.on_step("recheck_stock_before_write", recheck_stock_before_write);
  p.on_step("merge_into_existing_line", merge_into_existing_line);
  p.on_step("create_line", create_line);
  p
}

async fn validate_quantity(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let quantity = ctx.read().quantity;
  if quantity < 1 {
    warn!(quantity, "Rejected cart add with a non-positive quantity.");
    return Err(ShopError::validation("Quantity must be at least 1."));
  }
  Ok(PipelineControl::Continue)
}

async fn load_product(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let (store, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.product_id)
  };

  let product = store
    .find_product(product_id)
    .await?
    .ok_or_else(|| ShopError::not_found("Product", product_id))?;

  ctx.write().product = Some(product);
  Ok(PipelineControl::Continue)
}

async fn find_existing_line(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let (store, user_id, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.actor.user_id, guard.product_id)
  };

  let existing = store.find_cart_item_for(user_id, product_id).await?;
  debug!(%user_id, product_id, line_id = ?existing.as_ref().map(|l| l.id), "Looked up existing cart line.");
  ctx.write().existing_line = existing;
  Ok(PipelineControl::Continue)
}

/// Checks the requested quantity on its own first, then the merged quantity.
async fn check_stock(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let guard = ctx.read();
  let product = guard
    .product
    .as_ref()
    .ok_or_else(|| ShopError::not_found("Product", guard.product_id))?;

  if !product.in_stock {
    warn!(product_id = product.id, "Rejected cart add for out-of-stock product.");
    return Err(ShopError::OutOfStock { product_id: product.id });
  }
  ensure_stock_covers(product, guard.quantity, FRESH_SHORTFALL)?;
  if guard.existing_line.is_some() {
    ensure_stock_covers(product, guard.target_quantity(), MERGE_SHORTFALL)?;
  }
  Ok(PipelineControl::Continue)
}

/// Stock may have moved since `load_product`; validate the final quantity against a fresh read.
async fn recheck_stock_before_write(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let (store, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.product_id)
  };

  let fresh = store
    .find_product(product_id)
    .await?
    .ok_or_else(|| ShopError::not_found("Product", product_id))?;

  let mut guard = ctx.write();
  if !fresh.in_stock {
    return Err(ShopError::OutOfStock { product_id });
  }
  let shortfall = if guard.existing_line.is_some() {
    MERGE_SHORTFALL
  } else {
    FRESH_SHORTFALL
  };
  ensure_stock_covers(&fresh, guard.target_quantity(), shortfall)?;
  guard.product = Some(fresh);
  Ok(PipelineControl::Continue)
}

async fn merge_into_existing_line(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let (store, line_id, quantity) = {
    let guard = ctx.read();
    let line_id = guard.existing_line.as_ref().map(|line| line.id);
    (guard.store.clone(), line_id, guard.target_quantity())
  };
  let Some(line_id) = line_id else {
    return Ok(PipelineControl::Continue);
  };

  let saved = store
    .set_cart_quantity(line_id, quantity)
    .await?
    .ok_or_else(|| ShopError::not_found("Cart item", line_id))?;

  info!(line_id, quantity, "Merged add into existing cart line.");
  ctx.write().saved_line = Some(saved);
  Ok(PipelineControl::Continue)
}

async fn create_line(ctx: ContextData<AddToCartCtx>) -> ShopResult<PipelineControl> {
  let (store, new_item) = {
    let guard = ctx.read();
    let new_item = NewCartItem {
      user_id: guard.actor.user_id,
      product_id: guard.product_id,
      quantity: guard.quantity,
      product_attributes: guard.product_attributes.clone(),
    };
    (guard.store.clone(), new_item)
  };

  let saved = store.insert_cart_item(&new_item).await?;
  info!(line_id = saved.id, product_id = saved.product_id, quantity = saved.quantity, "Created cart line.");
  ctx.write().saved_line = Some(saved);
  Ok(PipelineControl::Continue)
}
