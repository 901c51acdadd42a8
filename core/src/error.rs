// shopfront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures of the pipeline machinery itself, as opposed to business outcomes.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("Type mismatch during context downcast (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Pipeline '{pipeline}' stopped before producing its outcome")]
  Halted { pipeline: String },
}

/// Errors returned by every storefront operation.
///
/// The `Display` text of the business variants is the message shown to the shopper.
#[derive(Debug, Error)]
pub enum ShopError {
  #[error("{entity} {id} not found.")]
  NotFound { entity: &'static str, id: String },

  #[error("You are not allowed to modify this item.")]
  Forbidden,

  #[error("Product is out of stock.")]
  OutOfStock { product_id: i64 },

  #[error("{message} Only {available} available, {requested} requested.")]
  InsufficientStock {
    product_id: i64,
    available: i32,
    requested: i32,
    message: &'static str,
  },

  #[error("{0}")]
  Validation(String),

  #[error("Storage error: {source}")]
  Storage {
    #[from]
    source: AnyhowError,
  },

  #[error("Workflow error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },
}

impl ShopError {
  pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
    ShopError::NotFound {
      entity,
      id: id.to_string(),
    }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    ShopError::Validation(message.into())
  }

  /// True for the outcomes a shopper can cause and fix (as opposed to infrastructure failures).
  pub fn is_user_facing(&self) -> bool {
    !matches!(self, ShopError::Storage { .. } | ShopError::Workflow { .. })
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
