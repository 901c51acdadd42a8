// shopfront_app/src/state.rs
use crate::config::AppConfig;
use shopfront::Shop;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub shop: Arc<Shop>,
  pub config: Arc<AppConfig>,
}
