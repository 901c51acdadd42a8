// shopfront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the server on the in-memory store.
  pub database_url: Option<String>,
  pub db_max_connections: u32,
  pub run_migrations: bool,
  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      db_max_connections: 5,
      run_migrations: true,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|name| env::var(name).ok())?;
    tracing::info!(
      server_host = %config.server_host,
      server_port = config.server_port,
      postgres = config.database_url.is_some(),
      "Application configuration loaded."
    );
    Ok(config)
  }

  /// Builds the configuration from any variable source. Unset or blank variables take their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
    let defaults = Self::default();

    Ok(Self {
      server_host: get_env("SERVER_HOST").unwrap_or(defaults.server_host),
      server_port: parse_var("SERVER_PORT", get_env("SERVER_PORT"), defaults.server_port)?,
      database_url: get_env("DATABASE_URL"),
      db_max_connections: parse_var(
        "DB_MAX_CONNECTIONS",
        get_env("DB_MAX_CONNECTIONS"),
        defaults.db_max_connections,
      )?,
      run_migrations: parse_var("RUN_MIGRATIONS", get_env("RUN_MIGRATIONS"), defaults.run_migrations)?,
      seed_db: parse_var("SEED_DB", get_env("SEED_DB"), defaults.seed_db)?,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    None => Ok(default),
    Some(value) => value
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, value, e))),
  }
}
