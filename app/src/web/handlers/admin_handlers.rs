// shopfront_app/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use shopfront::admin::ProductDraft;
use shopfront::catalog::ListingParams;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::AdminUser;

#[instrument(name = "handler::admin_dashboard", skip(app_state, admin), fields(admin_id = %admin.grant.user_id()))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, admin: AdminUser) -> Result<HttpResponse, AppError> {
  let dashboard = app_state.shop.dashboard(&admin.grant).await?;
  Ok(HttpResponse::Ok().json(dashboard))
}

#[instrument(name = "handler::admin_list_products", skip(app_state, params, admin))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  params: web::Query<ListingParams>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let listing = app_state.shop.admin_catalog(&admin.grant, &params).await?;
  Ok(HttpResponse::Ok().json(listing))
}

#[instrument(name = "handler::admin_get_product", skip(app_state, path, admin), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let detail = app_state.shop.admin_product(&admin.grant, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(detail))
}

#[instrument(name = "handler::admin_create_product", skip(app_state, draft, admin), fields(name = %draft.name))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  draft: web::Json<ProductDraft>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state.shop.create_product(&admin.grant, draft.into_inner()).await?;
  if let Some(product) = notice.line.as_ref() {
    info!(product_id = product.id, slug = %product.slug, "Product created.");
  }
  Ok(HttpResponse::Created().json(json!({
    "message": notice.message,
    "product": notice.line,
  })))
}

#[instrument(
  name = "handler::admin_update_product",
  skip(app_state, path, draft, admin),
  fields(product_id = %path.as_ref())
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  draft: web::Json<ProductDraft>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state
    .shop
    .update_product(&admin.grant, path.into_inner(), draft.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": notice.message,
    "product": notice.line,
  })))
}

#[instrument(name = "handler::admin_delete_product", skip(app_state, path, admin), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let notice = app_state.shop.delete_product(&admin.grant, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": notice.message })))
}
