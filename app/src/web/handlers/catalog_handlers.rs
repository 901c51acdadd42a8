// shopfront_app/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use shopfront::catalog::ListingParams;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  let store = if app_state.config.database_url.is_some() {
    "postgres"
  } else {
    "memory"
  };
  HttpResponse::Ok().json(json!({ "status": "ok", "timestamp": Utc::now(), "store": store }))
}

#[instrument(name = "handler::home", skip(app_state))]
pub async fn home_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let home = app_state.shop.home().await?;
  Ok(HttpResponse::Ok().json(home))
}

#[instrument(name = "handler::list_products", skip(app_state, params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  params: web::Query<ListingParams>,
) -> Result<HttpResponse, AppError> {
  let listing = app_state.shop.browse_catalog(&params).await?;
  info!(
    total = listing.products.total,
    page = listing.products.current_page,
    "Listed products."
  );
  Ok(HttpResponse::Ok().json(listing))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let detail = app_state.shop.product_detail(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(detail))
}
