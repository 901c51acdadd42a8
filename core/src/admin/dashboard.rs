// shopfront/src/admin/dashboard.rs

use serde::Serialize;

use crate::catalog::low_stock_query;
use crate::error::ShopResult;
use crate::models::{Order, Product};
use crate::store::{ProductSales, Store};

/// Length of each dashboard list.
pub const DASHBOARD_LIST_SIZE: u32 = 5;
/// Stock-managed products at or below this many units count as low on stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
  pub total_products: i64,
  pub active_products: i64,
  pub total_categories: i64,
  pub total_orders: i64,
  pub pending_orders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
  pub stats: DashboardStats,
  pub recent_orders: Vec<Order>,
  pub low_stock_products: Vec<Product>,
  pub top_products: Vec<ProductSales>,
}

impl Dashboard {
  pub async fn load(store: &dyn Store) -> ShopResult<Self> {
    let catalog = store.catalog_counts().await?;
    let orders = store.order_counts().await?;
    let recent_orders = store.recent_orders(DASHBOARD_LIST_SIZE).await?;
    let low_stock_products = store
      .query_products(&low_stock_query(LOW_STOCK_THRESHOLD, DASHBOARD_LIST_SIZE))
      .await?
      .items;
    let top_products = store.top_selling_products(DASHBOARD_LIST_SIZE).await?;

    Ok(Self {
      stats: DashboardStats {
        total_products: catalog.total_products,
        active_products: catalog.active_products,
        total_categories: catalog.total_categories,
        total_orders: orders.total_orders,
        pending_orders: orders.pending_orders,
      },
      recent_orders,
      low_stock_products,
      top_products,
    })
  }
}
