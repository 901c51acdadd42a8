// shopfront_app/src/db/postgres.rs

use async_trait::async_trait;
use shopfront::catalog::{CatalogQuery, Filter, Page, SearchScope, SortKey};
use shopfront::models::{
  CartItem, CartLine, Category, Order, OrderStatus, Product, ProductStatus, WishlistItem, WishlistLine,
};
use shopfront::store::{
  CartStore, CatalogCounts, CatalogStore, NewCartItem, NewCategory, NewOrder, OrderCounts, OrderStore,
  ProductRecord, ProductSales, WishlistStore,
};
use shopfront::{ShopError, ShopResult};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, slug, description, short_description, price_cents, sale_price_cents, \
   stock_quantity, manage_stock, in_stock, is_featured, status, sku, category_id, rating, review_count, \
   attributes, created_at, updated_at";

const CATEGORY_COLUMNS: &str = "id, name, slug, description, parent_id, is_active, sort_order";

const CART_ITEM_COLUMNS: &str = "id, user_id, product_id, quantity, product_attributes, created_at, updated_at";

const WISHLIST_ITEM_COLUMNS: &str = "id, user_id, product_id, created_at";

const ORDER_COLUMNS: &str = "id, order_number, user_id, status, total_cents, created_at";

/// Store errors cross into the domain as opaque storage failures; `AppError` recovers the sqlx error.
fn storage(e: sqlx::Error) -> ShopError {
  ShopError::from(anyhow::Error::new(e))
}

/// Escapes LIKE metacharacters so a search term only ever matches literally.
fn like_pattern(needle: &str) -> String {
  let mut escaped = String::with_capacity(needle.len() + 2);
  escaped.push('%');
  for ch in needle.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped.push('%');
  escaped
}

/// Appends one ` AND ...` clause per filter. The builder must already end in a WHERE clause.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
  for filter in filters {
    match filter {
      Filter::Listed => {
        query.push(" AND status = 'active' AND in_stock");
      }
      Filter::Status(status) => {
        query.push(" AND status = ");
        query.push_bind(*status);
      }
      Filter::Search { needle, scope } => {
        let pattern = like_pattern(needle);
        match scope {
          SearchScope::Name => {
            query.push(" AND name ILIKE ");
            query.push_bind(pattern);
          }
          SearchScope::NameAndDescriptions => {
            query.push(" AND (name ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR description ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR short_description ILIKE ");
            query.push_bind(pattern);
            query.push(")");
          }
        }
      }
      Filter::Category(category_id) => {
        query.push(" AND category_id = ");
        query.push_bind(*category_id);
      }
      Filter::MinPrice(min) => {
        query.push(" AND price_cents >= ");
        query.push_bind(*min);
      }
      Filter::MaxPrice(max) => {
        query.push(" AND price_cents <= ");
        query.push_bind(*max);
      }
      Filter::Featured => {
        query.push(" AND is_featured");
      }
      Filter::ExcludeProduct(id) => {
        query.push(" AND id <> ");
        query.push_bind(*id);
      }
      Filter::LowStock { at_most } => {
        query.push(" AND manage_stock AND stock_quantity > 0 AND stock_quantity <= ");
        query.push_bind(*at_most);
      }
    }
  }
}

/// Ties always fall back to insertion order.
fn order_by(sort: SortKey) -> &'static str {
  match sort {
    SortKey::Latest => " ORDER BY created_at DESC, id ASC",
    SortKey::PriceLow => " ORDER BY price_cents ASC, id ASC",
    SortKey::PriceHigh => " ORDER BY price_cents DESC, id ASC",
    SortKey::Rating => " ORDER BY rating DESC, id ASC",
    SortKey::Popular => " ORDER BY review_count DESC, id ASC",
  }
}

#[derive(FromRow)]
struct SalesRow {
  #[sqlx(flatten)]
  product: Product,
  order_items_count: i64,
}

#[derive(FromRow)]
struct CatalogCountsRow {
  total_products: i64,
  active_products: i64,
  total_categories: i64,
}

#[derive(FromRow)]
struct OrderCountsRow {
  total_orders: i64,
  pending_orders: i64,
}

/// The storefront's persistence on PostgreSQL, using runtime-checked queries.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Loads the products referenced by `ids`, keyed by id.
  async fn products_by_id(&self, ids: &[i64]) -> ShopResult<HashMap<i64, Product>> {
    if ids.is_empty() {
      return Ok(HashMap::new());
    }
    let products: Vec<Product> = sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(&self.pool)
    .await
    .map_err(storage)?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
  }
}

#[async_trait]
impl CatalogStore for PgStore {
  async fn find_product(&self, id: i64) -> ShopResult<Option<Product>> {
    sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)
  }

  #[instrument(name = "PgStore::query_products", skip(self, query), fields(filters = query.filters.len()))]
  async fn query_products(&self, query: &CatalogQuery) -> ShopResult<Page<Product>> {
    let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1=1");
    push_filters(&mut count, &query.filters);
    let total = count
      .build_query_scalar::<i64>()
      .fetch_one(&self.pool)
      .await
      .map_err(storage)?;

    let mut select: QueryBuilder<Postgres> =
      QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1"));
    push_filters(&mut select, &query.filters);
    select.push(order_by(query.sort));
    select.push(" LIMIT ");
    select.push_bind(i64::from(query.page.per_page));
    select.push(" OFFSET ");
    select.push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

    let items: Vec<Product> = select
      .build_query_as::<Product>()
      .fetch_all(&self.pool)
      .await
      .map_err(storage)?;
    debug!(total, returned = items.len(), "Catalog query evaluated.");
    Ok(Page::new(items, total.max(0) as u64, query.page))
  }

  async fn insert_product(&self, record: &ProductRecord) -> ShopResult<Product> {
    sqlx::query_as::<_, Product>(&format!(
      "INSERT INTO products (name, slug, description, short_description, price_cents, sale_price_cents, \
       stock_quantity, manage_stock, in_stock, is_featured, status, sku, category_id, rating, review_count, attributes) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
       RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&record.name)
    .bind(&record.slug)
    .bind(&record.description)
    .bind(&record.short_description)
    .bind(record.price_cents)
    .bind(record.sale_price_cents)
    .bind(record.stock_quantity)
    .bind(record.manage_stock)
    .bind(record.in_stock)
    .bind(record.is_featured)
    .bind(record.status)
    .bind(&record.sku)
    .bind(record.category_id)
    .bind(record.rating)
    .bind(record.review_count)
    .bind(&record.attributes)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn update_product(&self, id: i64, record: &ProductRecord) -> ShopResult<Option<Product>> {
    sqlx::query_as::<_, Product>(&format!(
      "UPDATE products SET name = $2, slug = $3, description = $4, short_description = $5, price_cents = $6, \
       sale_price_cents = $7, stock_quantity = $8, manage_stock = $9, in_stock = $10, is_featured = $11, \
       status = $12, sku = $13, category_id = $14, rating = $15, review_count = $16, attributes = $17, \
       updated_at = clock_timestamp() \
       WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(&record.name)
    .bind(&record.slug)
    .bind(&record.description)
    .bind(&record.short_description)
    .bind(record.price_cents)
    .bind(record.sale_price_cents)
    .bind(record.stock_quantity)
    .bind(record.manage_stock)
    .bind(record.in_stock)
    .bind(record.is_featured)
    .bind(record.status)
    .bind(&record.sku)
    .bind(record.category_id)
    .bind(record.rating)
    .bind(record.review_count)
    .bind(&record.attributes)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn delete_product(&self, id: i64) -> ShopResult<bool> {
    // cart_items and wishlist_items cascade on delete.
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage)?;
    Ok(result.rows_affected() > 0)
  }

  async fn sku_in_use(&self, sku: &str, except: Option<i64>) -> ShopResult<bool> {
    sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS (SELECT 1 FROM products WHERE sku = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(sku)
    .bind(except)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn slug_in_use(&self, slug: &str, except: Option<i64>) -> ShopResult<bool> {
    sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS (SELECT 1 FROM products WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(slug)
    .bind(except)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn categories(&self) -> ShopResult<Vec<Category>> {
    sqlx::query_as::<_, Category>(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"))
      .fetch_all(&self.pool)
      .await
      .map_err(storage)
  }

  async fn find_category(&self, id: i64) -> ShopResult<Option<Category>> {
    sqlx::query_as::<_, Category>(&format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)
  }

  async fn insert_category(&self, category: &NewCategory) -> ShopResult<Category> {
    sqlx::query_as::<_, Category>(&format!(
      "INSERT INTO categories (name, slug, description, parent_id, is_active, sort_order) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.description)
    .bind(category.parent_id)
    .bind(category.is_active)
    .bind(category.sort_order)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn catalog_counts(&self) -> ShopResult<CatalogCounts> {
    let row: CatalogCountsRow = sqlx::query_as(
      "SELECT \
         (SELECT COUNT(*) FROM products) AS total_products, \
         (SELECT COUNT(*) FROM products WHERE status = $1) AS active_products, \
         (SELECT COUNT(*) FROM categories) AS total_categories",
    )
    .bind(ProductStatus::Active)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)?;
    Ok(CatalogCounts {
      total_products: row.total_products,
      active_products: row.active_products,
      total_categories: row.total_categories,
    })
  }
}

#[async_trait]
impl CartStore for PgStore {
  async fn find_cart_item(&self, id: i64) -> ShopResult<Option<CartItem>> {
    sqlx::query_as::<_, CartItem>(&format!("SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)
  }

  async fn find_cart_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<CartItem>> {
    sqlx::query_as::<_, CartItem>(&format!(
      "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE user_id = $1 AND product_id = $2"
    ))
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn insert_cart_item(&self, item: &NewCartItem) -> ShopResult<CartItem> {
    sqlx::query_as::<_, CartItem>(&format!(
      "INSERT INTO cart_items (user_id, product_id, quantity, product_attributes) \
       VALUES ($1, $2, $3, $4) RETURNING {CART_ITEM_COLUMNS}"
    ))
    .bind(item.user_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(&item.product_attributes)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn set_cart_quantity(&self, id: i64, quantity: i32) -> ShopResult<Option<CartItem>> {
    sqlx::query_as::<_, CartItem>(&format!(
      "UPDATE cart_items SET quantity = $2, updated_at = clock_timestamp() WHERE id = $1 \
       RETURNING {CART_ITEM_COLUMNS}"
    ))
    .bind(id)
    .bind(quantity)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn delete_cart_item(&self, id: i64) -> ShopResult<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage)?;
    Ok(result.rows_affected() > 0)
  }

  async fn cart_lines(&self, user_id: Uuid) -> ShopResult<Vec<CartLine>> {
    let items: Vec<CartItem> = sqlx::query_as(&format!(
      "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE user_id = $1 ORDER BY id ASC"
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(storage)?;

    let ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
    let products = self.products_by_id(&ids).await?;
    Ok(
      items
        .into_iter()
        .filter_map(|item| {
          let product = products.get(&item.product_id)?.clone();
          Some(CartLine { item, product })
        })
        .collect(),
    )
  }
}

#[async_trait]
impl WishlistStore for PgStore {
  async fn find_wishlist_item(&self, id: i64) -> ShopResult<Option<WishlistItem>> {
    sqlx::query_as::<_, WishlistItem>(&format!(
      "SELECT {WISHLIST_ITEM_COLUMNS} FROM wishlist_items WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn find_wishlist_item_for(&self, user_id: Uuid, product_id: i64) -> ShopResult<Option<WishlistItem>> {
    sqlx::query_as::<_, WishlistItem>(&format!(
      "SELECT {WISHLIST_ITEM_COLUMNS} FROM wishlist_items WHERE user_id = $1 AND product_id = $2"
    ))
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn insert_wishlist_item(&self, user_id: Uuid, product_id: i64) -> ShopResult<WishlistItem> {
    sqlx::query_as::<_, WishlistItem>(&format!(
      "INSERT INTO wishlist_items (user_id, product_id) VALUES ($1, $2) RETURNING {WISHLIST_ITEM_COLUMNS}"
    ))
    .bind(user_id)
    .bind(product_id)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)
  }

  async fn delete_wishlist_item(&self, id: i64) -> ShopResult<bool> {
    let result = sqlx::query("DELETE FROM wishlist_items WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage)?;
    Ok(result.rows_affected() > 0)
  }

  async fn wishlist_lines(&self, user_id: Uuid) -> ShopResult<Vec<WishlistLine>> {
    let items: Vec<WishlistItem> = sqlx::query_as(&format!(
      "SELECT {WISHLIST_ITEM_COLUMNS} FROM wishlist_items WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(storage)?;

    let ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
    let products = self.products_by_id(&ids).await?;
    Ok(
      items
        .into_iter()
        .filter_map(|item| {
          let product = products.get(&item.product_id)?.clone();
          Some(WishlistLine { item, product })
        })
        .collect(),
    )
  }
}

#[async_trait]
impl OrderStore for PgStore {
  #[instrument(name = "PgStore::insert_order", skip(self, order), fields(order_number = %order.order_number))]
  async fn insert_order(&self, order: &NewOrder) -> ShopResult<Order> {
    let total_cents: i64 = order
      .lines
      .iter()
      .map(|line| line.price_cents * i64::from(line.quantity))
      .sum();

    let mut tx = self.pool.begin().await.map_err(storage)?;
    let saved: Order = sqlx::query_as(&format!(
      "INSERT INTO orders (order_number, user_id, status, total_cents) VALUES ($1, $2, $3, $4) \
       RETURNING {ORDER_COLUMNS}"
    ))
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(order.status)
    .bind(total_cents)
    .fetch_one(&mut *tx)
    .await
    .map_err(storage)?;

    for line in &order.lines {
      sqlx::query("INSERT INTO order_items (order_id, product_id, quantity, price_cents) VALUES ($1, $2, $3, $4)")
        .bind(saved.id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.price_cents)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;
    }
    tx.commit().await.map_err(storage)?;
    Ok(saved)
  }

  async fn order_counts(&self) -> ShopResult<OrderCounts> {
    let row: OrderCountsRow = sqlx::query_as(
      "SELECT COUNT(*) AS total_orders, COUNT(*) FILTER (WHERE status = $1) AS pending_orders FROM orders",
    )
    .bind(OrderStatus::Pending)
    .fetch_one(&self.pool)
    .await
    .map_err(storage)?;
    Ok(OrderCounts {
      total_orders: row.total_orders,
      pending_orders: row.pending_orders,
    })
  }

  async fn recent_orders(&self, limit: u32) -> ShopResult<Vec<Order>> {
    sqlx::query_as::<_, Order>(&format!(
      "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT $1"
    ))
    .bind(i64::from(limit))
    .fetch_all(&self.pool)
    .await
    .map_err(storage)
  }

  async fn top_selling_products(&self, limit: u32) -> ShopResult<Vec<ProductSales>> {
    let columns = PRODUCT_COLUMNS
      .split(", ")
      .map(|column| format!("p.{column}"))
      .collect::<Vec<_>>()
      .join(", ");
    let rows: Vec<SalesRow> = sqlx::query_as(&format!(
      "SELECT {columns}, COUNT(oi.id) AS order_items_count \
       FROM products p LEFT JOIN order_items oi ON oi.product_id = p.id \
       GROUP BY p.id ORDER BY order_items_count DESC, p.id ASC LIMIT $1"
    ))
    .bind(i64::from(limit))
    .fetch_all(&self.pool)
    .await
    .map_err(storage)?;
    Ok(
      rows
        .into_iter()
        .map(|row| ProductSales {
          product: row.product,
          order_items_count: row.order_items_count,
        })
        .collect(),
    )
  }

  async fn product_has_orders(&self, product_id: i64) -> ShopResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM order_items WHERE product_id = $1)")
      .bind(product_id)
      .fetch_one(&self.pool)
      .await
      .map_err(storage)
  }
}
