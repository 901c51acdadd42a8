// shopfront/src/store/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

use super::{
  CartStore, CatalogCounts, CatalogStore, NewCartItem, NewCategory, NewOrder, OrderCounts, OrderStore,
  ProductRecord, ProductSales, WishlistStore,
};
use crate::catalog::{CatalogQuery, Page};
use crate::error::ShopResult;
use crate::models::{
  CartItem, CartLine, Category, Order, OrderItem, OrderStatus, Product, ProductStatus, WishlistItem, WishlistLine,
};

#[derive(Default)]
struct Tables {
  products: BTreeMap<i64, Product>,
  categories: BTreeMap<i64, Category>,
  cart_items: BTreeMap<i64, CartItem>,
  wishlist_items: BTreeMap<i64, WishlistItem>,
  orders: BTreeMap<i64, Order>,
  order_items: Vec<OrderItem>,
  last_id: i64,
  last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
  fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }

  /// Strictly increasing, so rows written later always sort as newer.
  fn now(&mut self) -> DateTime<Utc> {
    let mut now = Utc::now();
    if let Some(last) = self.last_timestamp {
      if now <= last {
        now = last + Duration::microseconds(1);
      }
    }
    self.last_timestamp = Some(now);
    now
  }

  fn apply_record(product: &mut Product, record: &ProductRecord) {
    product.name = record.name.clone();
    product.slug = record.slug.clone();
    product.description = record.description.clone();
    product.short_description = record.short_description.clone();
    product.price_cents = record.price_cents;
    product.sale_price_cents = record.sale_price_cents;
    product.stock_quantity = record.stock_quantity;
    product.manage_stock = record.manage_stock;
    product.in_stock = record.in_stock;
    product.is_featured = record.is_featured;
    product.status = record.status;
    product.sku = record.sku.clone();
    product.category_id = record.category_id;
    product.rating = record.rating;
    product.review_count = record.review_count;
    product.attributes = record.attributes.clone();
  }
}

/// An in-process store over `parking_lot` locked tables.
///
/// Ids come from one shared counter, so they follow insertion order across every table.
/// No lock is held across an `.await`.
#[derive(Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CatalogStore for MemoryStore {
  async fn find_product(&self, id: i64) -> ShopResult<Option<Product>> {
    Ok(self.tables.read().products.get(&id).cloned())
  }

  async fn query_products(&self, query: &CatalogQuery) -> ShopResult<Page<Product>> {
    let tables = self.tables.read();
    Ok(query.evaluate(tables.products.values()))
  }

  async fn insert_product(&self, record: &ProductRecord) -> ShopResult<Product> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let now = tables.now();
    let mut product = Product {
      id,
      name: String::new(),
      slug: String::new(),
      description: None,
      short_description: None,
      price_cents: 0,
      sale_price_cents: None,
      stock_quantity: 0,
      manage_stock: false,
      in_stock: false,
      is_featured: false,
      status: ProductStatus::Draft,
      sku: None,
      category_id: record.category_id,
      rating: 0.0,
      review_count: 0,
      attributes: None,
      created_at: now,
      updated_at: now,
    };
    Tables::apply_record(&mut product, record);
    tables.products.insert(id, product.clone());
    debug!(product_id = id, slug = %product.slug, "Inserted product.");
    Ok(product)
  }

  async fn update_product(&self, id: i64, record: &ProductRecord) -> ShopResult<Option<Product>> {
    let mut tables = self.tables.write();
    let now = tables.now();
    let Some(product) = tables.products.get_mut(&id) else {
      return Ok(None);
    };
    Tables::apply_record(product, record);
    product.updated_at = now;
    Ok(Some(product.clone()))
  }

  async fn delete_product(&self, id: i64) -> ShopResult<bool> {
    let mut tables = self.tables.write();
    if tables.products.remove(&id).is_none() {
      return Ok(false);
    }
    tables.cart_items.retain(|_, item| item.product_id != id);
    tables.wishlist_items.retain(|_, item| item.product_id != id);
    debug!(product_id = id, "Deleted product with its cart and wishlist lines.");
    Ok(true)
  }

  async fn sku_in_use(&self, sku: &str, except: Option<i64>) -> ShopResult<bool> {
    Ok(
      self
        .tables
        .read()
        .products
        .values()
        .any(|p| Some(p.id) != except && p.sku.as_deref() == Some(sku)),
    )
  }

  async fn slug_in_use(&self, slug: &str, except: Option<i64>) -> ShopResult<bool> {
    Ok(
      self
        .tables
        .read()
        .products
        .values()
        .any(|p| Some(p.id) != except && p.slug == slug),
    )
  }

  async fn categories(&self) -> ShopResult<Vec<Category>> {
    Ok(self.tables.read().categories.values().cloned().collect())
  }

  async fn find_category(&self, id: i64) -> ShopResult<Option<Category>> {
    Ok(self.tables.read().categories.get(&id).cloned())
  }

  async fn insert_category(&self, category: &NewCategory) -> ShopResult<Category> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let category = Category {
      id,
      name: category.name.clone(),
      slug: category.slug.clone(),
      description: category.description.clone(),
      parent_id: category.parent_id,
      is_active: category.is_active,
      sort_order: category.sort_order,
    };
    tables.categories.insert(id, category.clone());
    Ok(category)
  }

  async fn catalog_counts(&self) -> ShopResult<CatalogCounts> {
    let tables = self.tables.read();
    Ok(CatalogCounts {
      total_products: tables.products.len() as i64,
      active_products: tables
        .products
        .values()
        .filter(|p| p.status == ProductStatus::Active)
        .count() as i64,
      total_categories: tables.categories.len() as i64,
    })
  }
}

#[async_trait]
impl CartStore for MemoryStore {
  async fn find_cart_item(&self, id: i64) -> ShopResult<Option<CartItem>> {
    Ok(self.tables.read().cart_items.get(&id).cloned())
  }

  async fn find_cart_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<CartItem>> {
    Ok(
      self
        .tables
        .read()
        .cart_items
        .values()
        .find(|item| item.user_id == user_id && item.product_id == product_id)
        .cloned(),
    )
  }

  async fn insert_cart_item(&self, item: &NewCartItem) -> ShopResult<CartItem> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let now = tables.now();
    let item = CartItem {
      id,
      user_id: item.user_id,
      product_id: item.product_id,
      quantity: item.quantity,
      product_attributes: item.product_attributes.clone(),
      created_at: now,
      updated_at: now,
    };
    tables.cart_items.insert(id, item.clone());
    Ok(item)
  }

  async fn set_cart_quantity(&self, id: i64, quantity: i32) -> ShopResult<Option<CartItem>> {
    let mut tables = self.tables.write();
    let now = tables.now();
    Ok(tables.cart_items.get_mut(&id).map(|item| {
      item.quantity = quantity;
      item.updated_at = now;
      item.clone()
    }))
  }

  async fn delete_cart_item(&self, id: i64) -> ShopResult<bool> {
    Ok(self.tables.write().cart_items.remove(&id).is_some())
  }

  async fn cart_lines(&self, user_id: Uuid) -> ShopResult<Vec<CartLine>> {
    let tables = self.tables.read();
    Ok(
      tables
        .cart_items
        .values()
        .filter(|item| item.user_id == user_id)
        .filter_map(|item| {
          tables.products.get(&item.product_id).map(|product| CartLine {
            item: item.clone(),
            product: product.clone(),
          })
        })
        .collect(),
    )
  }
}

#[async_trait]
impl WishlistStore for MemoryStore {
  async fn find_wishlist_item(&self, id: i64) -> ShopResult<Option<WishlistItem>> {
    Ok(self.tables.read().wishlist_items.get(&id).cloned())
  }

  async fn find_wishlist_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<WishlistItem>> {
    Ok(
      self
        .tables
        .read()
        .wishlist_items
        .values()
        .find(|item| item.user_id == user_id && item.product_id == product_id)
        .cloned(),
    )
  }

  async fn insert_wishlist_item(&self, user_id: Uuid, product_id: i64) -> ShopResult<WishlistItem> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let now = tables.now();
    let item = WishlistItem {
      id,
      user_id,
      product_id,
      created_at: now,
    };
    tables.wishlist_items.insert(id, item.clone());
    Ok(item)
  }

  async fn delete_wishlist_item(&self, id: i64) -> ShopResult<bool> {
    Ok(self.tables.write().wishlist_items.remove(&id).is_some())
  }

  async fn wishlist_lines(&self, user_id: Uuid) -> ShopResult<Vec<WishlistLine>> {
    let tables = self.tables.read();
    Ok(
      tables
        .wishlist_items
        .values()
        .rev()
        .filter(|item| item.user_id == user_id)
        .filter_map(|item| {
          tables.products.get(&item.product_id).map(|product| WishlistLine {
            item: item.clone(),
            product: product.clone(),
          })
        })
        .collect(),
    )
  }
}

#[async_trait]
impl OrderStore for MemoryStore {
  async fn insert_order(&self, order: &NewOrder) -> ShopResult<Order> {
    let mut tables = self.tables.write();
    let order_id = tables.next_id();
    let now = tables.now();

    let mut total_cents = 0;
    for line in &order.lines {
      let id = tables.next_id();
      total_cents += line.price_cents * i64::from(line.quantity);
      tables.order_items.push(OrderItem {
        id,
        order_id,
        product_id: line.product_id,
        quantity: line.quantity,
        price_cents: line.price_cents,
      });
    }

    let order = Order {
      id: order_id,
      order_number: order.order_number.clone(),
      user_id: order.user_id,
      status: order.status,
      total_cents,
      created_at: now,
    };
    tables.orders.insert(order_id, order.clone());
    Ok(order)
  }

  async fn order_counts(&self) -> ShopResult<OrderCounts> {
    let tables = self.tables.read();
    Ok(OrderCounts {
      total_orders: tables.orders.len() as i64,
      pending_orders: tables
        .orders
        .values()
        .filter(|o| o.status == OrderStatus::Pending)
        .count() as i64,
    })
  }

  async fn recent_orders(&self, limit: u32) -> ShopResult<Vec<Order>> {
    let tables = self.tables.read();
    let mut orders: Vec<Order> = tables.orders.values().cloned().collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    orders.truncate(limit as usize);
    Ok(orders)
  }

  async fn top_selling_products(&self, limit: u32) -> ShopResult<Vec<ProductSales>> {
    let tables = self.tables.read();
    let mut counts: HashMap<i64, i64> = HashMap::new();
    for item in &tables.order_items {
      *counts.entry(item.product_id).or_default() += 1;
    }

    let mut sales: Vec<ProductSales> = tables
      .products
      .values()
      .map(|product| ProductSales {
        product: product.clone(),
        order_items_count: counts.get(&product.id).copied().unwrap_or(0),
      })
      .collect();
    sales.sort_by(|a, b| {
      b.order_items_count
        .cmp(&a.order_items_count)
        .then(a.product.id.cmp(&b.product.id))
    });
    sales.truncate(limit as usize);
    Ok(sales)
  }

  async fn product_has_orders(&self, product_id: i64) -> ShopResult<bool> {
    Ok(self.tables.read().order_items.iter().any(|item| item.product_id == product_id))
  }
}
