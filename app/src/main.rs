// shopfront_app/src/main.rs

mod config;
mod db;
mod errors;
mod seed;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use shopfront::{MemoryStore, Shop, Store};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e.into());
    }
  };

  let store: Arc<dyn Store> = match app_config.database_url.as_deref() {
    Some(url) => {
      let pool = db::connect(url, &app_config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to prepare the database.");
        e
      })?;
      Arc::new(db::PgStore::new(pool))
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data is lost on exit.");
      Arc::new(MemoryStore::new())
    }
  };

  if app_config.seed_db {
    if let Err(e) = seed::seed_catalog(store.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed database.");
    }
  }

  let app_state = AppState {
    shop: Arc::new(Shop::new(store)),
    config: app_config.clone(),
  };
  tracing::info!("Storefront pipelines registered.");

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .app_data(web::json_config())
      .app_data(web::query_config())
      .app_data(web::path_config())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await?;
  Ok(())
}
