// shopfront_app/src/db/mod.rs

pub mod postgres;

pub use postgres::PgStore;

use crate::config::AppConfig;
use crate::errors::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects the pool and, when configured, brings the schema up to date.
pub async fn connect(database_url: &str, config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(database_url)
    .await?;
  tracing::info!(max_connections = config.db_max_connections, "Connected to PostgreSQL.");

  if config.run_migrations {
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied.");
  }
  Ok(pool)
}
