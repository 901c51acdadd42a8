// shopfront/src/store/mod.rs

//! Persistence seams. The storefront logic talks to these traits only; `MemoryStore`
//! implements them in-process and the server crate implements them on PostgreSQL.
//!
//! Stores persist what they are told. Stock rules, ownership and validation live
//! in the cart pipelines and the back-office module.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{CatalogQuery, Page};
use crate::error::ShopResult;
use crate::models::{
  CartItem, CartLine, Category, Order, OrderStatus, Product, ProductStatus, WishlistItem, WishlistLine,
};

pub mod memory;

pub use memory::MemoryStore;

/// Every writable product column.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub short_description: Option<String>,
  pub price_cents: i64,
  pub sale_price_cents: Option<i64>,
  pub stock_quantity: i32,
  pub manage_stock: bool,
  pub in_stock: bool,
  pub is_featured: bool,
  pub status: ProductStatus,
  pub sku: Option<String>,
  pub category_id: i64,
  pub rating: f64,
  pub review_count: i32,
  pub attributes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub parent_id: Option<i64>,
  pub is_active: bool,
  pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
  pub user_id: Uuid,
  pub product_id: i64,
  pub quantity: i32,
  pub product_attributes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
  pub product_id: i64,
  pub quantity: i32,
  pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
  pub order_number: String,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub lines: Vec<NewOrderLine>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
  pub total_products: i64,
  pub active_products: i64,
  pub total_categories: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
  pub total_orders: i64,
  pub pending_orders: i64,
}

/// A product with the number of order lines that reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
  #[serde(flatten)]
  pub product: Product,
  pub order_items_count: i64,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn find_product(&self, id: i64) -> ShopResult<Option<Product>>;

  /// Evaluates `query`: all filters, then its sort with insertion-order tie-break, then its page.
  async fn query_products(&self, query: &CatalogQuery) -> ShopResult<Page<Product>>;

  async fn insert_product(&self, record: &ProductRecord) -> ShopResult<Product>;

  /// Returns `None` when no product has `id`.
  async fn update_product(&self, id: i64, record: &ProductRecord) -> ShopResult<Option<Product>>;

  /// Deletes the product together with the cart and wishlist lines that reference it.
  async fn delete_product(&self, id: i64) -> ShopResult<bool>;

  /// Whether another product (not `except`) already uses `sku`.
  async fn sku_in_use(&self, sku: &str, except: Option<i64>) -> ShopResult<bool>;

  /// Whether another product (not `except`) already uses `slug`.
  async fn slug_in_use(&self, slug: &str, except: Option<i64>) -> ShopResult<bool>;

  async fn categories(&self) -> ShopResult<Vec<Category>>;

  async fn find_category(&self, id: i64) -> ShopResult<Option<Category>>;

  async fn insert_category(&self, category: &NewCategory) -> ShopResult<Category>;

  async fn catalog_counts(&self) -> ShopResult<CatalogCounts>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
  async fn find_cart_item(&self, id: i64) -> ShopResult<Option<CartItem>>;

  async fn find_cart_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<CartItem>>;

  async fn insert_cart_item(&self, item: &NewCartItem) -> ShopResult<CartItem>;

  /// Returns `None` when the line no longer exists.
  async fn set_cart_quantity(&self, id: i64, quantity: i32) -> ShopResult<Option<CartItem>>;

  async fn delete_cart_item(&self, id: i64) -> ShopResult<bool>;

  /// The user's lines joined with their products, in insertion order.
  async fn cart_lines(&self, user_id: Uuid) -> ShopResult<Vec<CartLine>>;
}

#[async_trait]
pub trait WishlistStore: Send + Sync {
  async fn find_wishlist_item(&self, id: i64) -> ShopResult<Option<WishlistItem>>;

  async fn find_wishlist_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<WishlistItem>>;

  async fn insert_wishlist_item(&self, user_id: Uuid, product_id: i64) -> ShopResult<WishlistItem>;

  async fn delete_wishlist_item(&self, id: i64) -> ShopResult<bool>;

  /// The user's lines joined with their products, newest first.
  async fn wishlist_lines(&self, user_id: Uuid) -> ShopResult<Vec<WishlistLine>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn insert_order(&self, order: &NewOrder) -> ShopResult<Order>;

  async fn order_counts(&self) -> ShopResult<OrderCounts>;

  /// Newest first.
  async fn recent_orders(&self, limit: u32) -> ShopResult<Vec<Order>>;

  /// Every product with how many order lines reference it, most first.
  async fn top_selling_products(&self, limit: u32) -> ShopResult<Vec<ProductSales>>;

  async fn product_has_orders(&self, product_id: i64) -> ShopResult<bool>;
}

/// Everything the storefront needs from persistence.
pub trait Store: CatalogStore + CartStore + WishlistStore + OrderStore {}

impl<T> Store for T where T: CatalogStore + CartStore + WishlistStore + OrderStore {}
