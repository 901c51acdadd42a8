// shopfront_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use shopfront::AddToCart;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct UpdateCartLinePayload {
  pub quantity: i32,
}

#[instrument(name = "handler::view_cart", skip(app_state, auth_user), fields(user_id = %auth_user.actor.user_id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.shop.view_cart(&auth_user.actor).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload, auth_user),
  fields(user_id = %auth_user.actor.user_id, product_id = req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCart>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .add_to_cart(&auth_user.actor, req_payload.into_inner())
    .await?;
  if let Some(item) = notice.line.as_ref() {
    info!(cart_item_id = item.id, quantity = item.quantity, "Add to cart successful.");
  }
  Ok(HttpResponse::Ok().json(json!({
    "message": notice.message,
    "cart_item": notice.line,
  })))
}

#[instrument(
  name = "handler::update_cart_line",
  skip(app_state, path, req_payload, auth_user),
  fields(user_id = %auth_user.actor.user_id, line_id = %path.as_ref())
)]
pub async fn update_cart_line_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateCartLinePayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .update_cart_line(&auth_user.actor, path.into_inner(), req_payload.quantity)
    .await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": notice.message,
    "cart_item": notice.line,
  })))
}

#[instrument(
  name = "handler::remove_cart_line",
  skip(app_state, path, auth_user),
  fields(user_id = %auth_user.actor.user_id, line_id = %path.as_ref())
)]
pub async fn remove_cart_line_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .remove_cart_line(&auth_user.actor, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": notice.message })))
}
