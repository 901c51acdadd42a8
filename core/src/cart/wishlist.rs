// shopfront/src/cart/wishlist.rs

use tracing::info;

use super::contexts::{RemoveWishlistLineCtx, ToggleWishlistCtx, WishlistToggle};
use crate::engine::{ContextData, PipelineControl};
use crate::error::{ShopError, ShopResult};
use crate::pipeline::Pipeline;

pub const TOGGLE_WISHLIST: &str = "toggle_wishlist";
pub const REMOVE_WISHLIST_LINE: &str = "remove_wishlist_line";

/// Removes the actor's line for the product if there is one, otherwise adds it.
/// Removal stops the pipeline before `add_line`.
pub fn toggle_wishlist_pipeline() -> Pipeline<ToggleWishlistCtx, ShopError> {
  let mut p = Pipeline::new(
    TOGGLE_WISHLIST,
    &[
      ("ensure_product_exists", false, None),
      ("remove_existing_line", false, None),
      ("add_line", false, None),
    ],
  );

  p.on_step("ensure_product_exists", ensure_product_exists);
  p.on_step("remove_existing_line", remove_existing_line);
  p.on_step("add_line", add_line);
  p
}

async fn ensure_product_exists(ctx: ContextData<ToggleWishlistCtx>) -> ShopResult<PipelineControl> {
  let (store, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.product_id)
  };

  if store.find_product(product_id).await?.is_none() {
    return Err(ShopError::not_found("Product", product_id));
  }
  Ok(PipelineControl::Continue)
}

async fn remove_existing_line(ctx: ContextData<ToggleWishlistCtx>) -> ShopResult<PipelineControl> {
  let (store, user_id, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.actor.user_id, guard.product_id)
  };

  let Some(existing) = store.find_wishlist_item_for(user_id, product_id).await? else {
    return Ok(PipelineControl::Continue);
  };

  store.delete_wishlist_item(existing.id).await?;
  info!(%user_id, product_id, line_id = existing.id, "Toggled wishlist line off.");
  {
    let mut guard = ctx.write();
    guard.existing_line = Some(existing.clone());
    guard.outcome = Some(WishlistToggle::Removed(existing));
  }
  Ok(PipelineControl::Stop)
}

async fn add_line(ctx: ContextData<ToggleWishlistCtx>) -> ShopResult<PipelineControl> {
  let (store, user_id, product_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.actor.user_id, guard.product_id)
  };

  let line = store.insert_wishlist_item(user_id, product_id).await?;
  info!(%user_id, product_id, line_id = line.id, "Toggled wishlist line on.");
  ctx.write().outcome = Some(WishlistToggle::Added(line));
  Ok(PipelineControl::Continue)
}

/// Deletes one of the actor's wishlist lines by id.
pub fn remove_wishlist_line_pipeline() -> Pipeline<RemoveWishlistLineCtx, ShopError> {
  let mut p = Pipeline::new(
    REMOVE_WISHLIST_LINE,
    &[
      ("load_line", false, None),
      ("check_ownership", false, None),
      ("delete_line", false, None),
    ],
  );

  p.on_step("load_line", |ctx: ContextData<RemoveWishlistLineCtx>| async move {
    let (store, line_id) = {
      let guard = ctx.read();
      (guard.store.clone(), guard.line_id)
    };
    let line = store
      .find_wishlist_item(line_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Wishlist item", line_id))?;
    ctx.write().line = Some(line);
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("check_ownership", |ctx: ContextData<RemoveWishlistLineCtx>| async move {
    let guard = ctx.read();
    if let Some(line) = guard.line.as_ref() {
      guard.actor.ensure_owns(line.user_id)?;
    }
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("delete_line", |ctx: ContextData<RemoveWishlistLineCtx>| async move {
    let (store, line_id) = {
      let guard = ctx.read();
      (guard.store.clone(), guard.line_id)
    };
    let removed = store.delete_wishlist_item(line_id).await?;
    info!(line_id, removed, "Removed wishlist line.");
    ctx.write().removed = removed;
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p
}
