// shopfront_app/src/web/handlers/wishlist_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct ToggleWishlistPayload {
  pub product_id: i64,
}

#[instrument(name = "handler::view_wishlist", skip(app_state, auth_user), fields(user_id = %auth_user.actor.user_id))]
pub async fn view_wishlist_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let lines = app_state.shop.view_wishlist(&auth_user.actor).await?;
  Ok(HttpResponse::Ok().json(json!({ "wishlist_items": lines })))
}

/// Adds the product, or removes it when it is already on the wishlist.
#[instrument(
  name = "handler::toggle_wishlist",
  skip(app_state, req_payload, auth_user),
  fields(user_id = %auth_user.actor.user_id, product_id = req_payload.product_id)
)]
pub async fn toggle_wishlist_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ToggleWishlistPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .toggle_wishlist(&auth_user.actor, req_payload.product_id)
    .await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": notice.message,
    "in_wishlist": notice.line.is_some(),
    "wishlist_item": notice.line,
  })))
}

#[instrument(
  name = "handler::remove_wishlist_line",
  skip(app_state, path, auth_user),
  fields(user_id = %auth_user.actor.user_id, line_id = %path.as_ref())
)]
pub async fn remove_wishlist_line_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .remove_wishlist_line(&auth_user.actor, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": notice.message })))
}
