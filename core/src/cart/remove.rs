// shopfront/src/cart/remove.rs

use tracing::info;

use super::contexts::RemoveCartLineCtx;
use crate::engine::{ContextData, PipelineControl};
use crate::error::{ShopError, ShopResult};
use crate::pipeline::Pipeline;

pub const REMOVE_CART_LINE: &str = "remove_cart_line";

/// Deletes one of the actor's cart lines. Stock is not touched.
pub fn remove_cart_line_pipeline() -> Pipeline<RemoveCartLineCtx, ShopError> {
  let mut p = Pipeline::new(
    REMOVE_CART_LINE,
    &[
      ("load_line", false, None),
      ("check_ownership", false, None),
      ("delete_line", false, None),
    ],
  );

  p.on_step("load_line", |ctx: ContextData<RemoveCartLineCtx>| async move {
    let (store, line_id) = {
      let guard = ctx.read();
      (guard.store.clone(), guard.line_id)
    };
    let line = store
      .find_cart_item(line_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Cart item", line_id))?;
    ctx.write().line = Some(line);
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("check_ownership", |ctx: ContextData<RemoveCartLineCtx>| async move {
    let guard = ctx.read();
    if let Some(line) = guard.line.as_ref() {
      guard.actor.ensure_owns(line.user_id)?;
    }
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("delete_line", delete_line);
  p
}

async fn delete_line(ctx: ContextData<RemoveCartLineCtx>) -> ShopResult<PipelineControl> {
  let (store, line_id) = {
    let guard = ctx.read();
    (guard.store.clone(), guard.line_id)
  };

  let removed = store.delete_cart_item(line_id).await?;
  info!(line_id, removed, "Removed cart line.");
  ctx.write().removed = removed;
  Ok(PipelineControl::Continue)
}
