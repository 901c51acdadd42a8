// shopfront_app/src/web/mod.rs

pub mod auth;
pub mod handlers;
pub mod routes;

pub use routes::configure_app_routes;

use actix_web::web;

use crate::errors::AppError;

/// Malformed JSON bodies answer 400 with the usual `{"error": ...}` body.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err, _req| AppError::NotFound(err.to_string()).into())
}
