// shopfront_app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopfront::{PipelineError, ShopError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  /// The request conflicts with current stock.
  #[error("{0}")]
  Stock(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    match err {
      ShopError::NotFound { .. } => AppError::NotFound(err.to_string()),
      ShopError::Forbidden => AppError::Forbidden(err.to_string()),
      ShopError::OutOfStock { .. } | ShopError::InsufficientStock { .. } => AppError::Stock(err.to_string()),
      ShopError::Validation(message) => AppError::Validation(message),
      ShopError::Workflow { source } => AppError::Workflow { source },
      ShopError::Storage { source } => {
        // The PostgreSQL store wraps sqlx errors in anyhow; recover them so they are reported as such.
        match source.downcast::<sqlx::Error>() {
          Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
          Err(other) => AppError::Internal(other.to_string()),
        }
      }
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::from(ShopError::from(err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Stock(_) => StatusCode::CONFLICT,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Migrate(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::info!(application_error = %self, status = status.as_u16(), "Request refused");
    }

    let body = match self {
      AppError::Validation(m) | AppError::Forbidden(m) | AppError::NotFound(m) | AppError::Stock(m) => {
        json!({"error": m})
      }
      AppError::Auth(m) => json!({"error": m}),
      AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
      AppError::Sqlx(_) | AppError::Migrate(_) => json!({"error": "Database operation failed"}),
      AppError::Workflow { source } => {
        tracing::error!(workflow_error_source = ?source, "Workflow error details");
        json!({"error": "Workflow processing error"})
      }
      AppError::Internal(_) => json!({"error": "An internal error occurred"}),
    };
    HttpResponse::build(status).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
