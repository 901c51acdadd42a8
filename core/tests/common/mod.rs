// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use shopfront::admin::slugify;
use shopfront::models::{Category, Product, ProductStatus};
use shopfront::store::{CatalogStore, NewCategory, ProductRecord};
use shopfront::{Actor, ContextData, MemoryStore, PipelineControl, PipelineError, Shop};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Engine test context and error ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TestError {
  #[error("Pipeline error: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

pub async fn record_step(ctx: ContextData<TestContext>, step_name: &'static str) -> Result<PipelineControl, TestError> {
  let mut guard = ctx.write();
  guard.counter += 1;
  guard.steps_executed.push(step_name.to_string());
  tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
  if guard.should_stop_at.as_deref() == Some(step_name) {
    return Ok(PipelineControl::Stop);
  }
  Ok(PipelineControl::Continue)
}

// --- Storefront fixtures ---
pub struct TestShop {
  pub shop: Shop,
  pub store: Arc<MemoryStore>,
  pub category: Category,
}

impl TestShop {
  pub async fn new() -> Self {
    let store = Arc::new(MemoryStore::new());
    let category = store
      .insert_category(&new_category("General", None, 1))
      .await
      .expect("seed category");
    let shop = Shop::new(store.clone());
    Self { shop, store, category }
  }

  pub async fn add_category(&self, name: &str, parent_id: Option<i64>, sort_order: i32) -> Category {
    self
      .store
      .insert_category(&new_category(name, parent_id, sort_order))
      .await
      .expect("insert category")
  }

  /// Inserts `record` into the shop's default category unless it names another one.
  pub async fn add_product(&self, mut record: ProductRecord) -> Product {
    if record.category_id == 0 {
      record.category_id = self.category.id;
    }
    self.store.insert_product(&record).await.expect("insert product")
  }

  /// A listed, stock-managed product with `stock` units.
  pub async fn stocked(&self, name: &str, price_cents: i64, stock: i32) -> Product {
    self
      .add_product(ProductRecord {
        stock_quantity: stock,
        ..product(name, price_cents)
      })
      .await
  }
}

pub fn new_category(name: &str, parent_id: Option<i64>, sort_order: i32) -> NewCategory {
  NewCategory {
    name: name.to_string(),
    slug: slugify(name),
    description: None,
    parent_id,
    is_active: true,
    sort_order,
  }
}

/// An active, in-stock, stock-managed product with 10 units. `category_id` 0 means
/// "the fixture shop's default category".
pub fn product(name: &str, price_cents: i64) -> ProductRecord {
  ProductRecord {
    name: name.to_string(),
    slug: slugify(name),
    description: None,
    short_description: None,
    price_cents,
    sale_price_cents: None,
    stock_quantity: 10,
    manage_stock: true,
    in_stock: true,
    is_featured: false,
    status: ProductStatus::Active,
    sku: None,
    category_id: 0,
    rating: 0.0,
    review_count: 0,
    attributes: None,
  }
}

pub fn customer() -> Actor {
  Actor::customer(Uuid::new_v4())
}

pub fn admin() -> Actor {
  Actor::admin(Uuid::new_v4())
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
