// tests/admin_tests.rs
mod common;

use common::*;
use serial_test::serial;
use shopfront::admin::{ProductDraft, PRODUCT_CREATED, PRODUCT_DELETED};
use shopfront::models::{OrderStatus, ProductStatus};
use shopfront::store::{CatalogStore, NewOrder, NewOrderLine, OrderStore, ProductRecord};
use shopfront::{AddToCart, ShopError};
use uuid::Uuid;

fn draft(name: &str, category_id: i64) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    description: Some("Hand finished.".to_string()),
    short_description: None,
    price_cents: 4_000,
    sale_price_cents: None,
    category_id,
    stock_quantity: 8,
    manage_stock: true,
    in_stock: true,
    is_featured: false,
    status: ProductStatus::Active,
    sku: None,
    attributes: None,
  }
}

#[tokio::test]
#[serial]
async fn test_customers_cannot_obtain_an_admin_grant() {
  setup_tracing();
  assert!(matches!(customer().authorize_admin(), Err(ShopError::Forbidden)));
  assert!(admin().authorize_admin().is_ok());
}

#[tokio::test]
#[serial]
async fn test_create_product_derives_slug_and_starts_without_reviews() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();

  let notice = t
    .shop
    .create_product(
      &grant,
      ProductDraft {
        sku: Some("CHAIR-1".to_string()),
        ..draft("Rattan Lounge Chair", t.category.id)
      },
    )
    .await
    .unwrap();

  assert_eq!(notice.message, PRODUCT_CREATED);
  let product = notice.line.unwrap();
  assert_eq!(product.slug, "rattan-lounge-chair");
  assert_eq!(product.sku.as_deref(), Some("CHAIR-1"));
  assert_eq!(product.review_count, 0);
  assert!(t.store.find_product(product.id).await.unwrap().is_some());
}

#[tokio::test]
#[serial]
async fn test_sale_price_not_below_price_is_rejected() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();

  let result = t
    .shop
    .create_product(
      &grant,
      ProductDraft {
        sale_price_cents: Some(4_000),
        ..draft("Stool", t.category.id)
      },
    )
    .await;

  match result {
    Err(ShopError::Validation(message)) => {
      assert_eq!(message, "Sale price must be less than the regular price.")
    }
    other => panic!("Expected Validation, got {:?}", other),
  }
  assert_eq!(t.store.catalog_counts().await.unwrap().total_products, 0);
}

#[tokio::test]
#[serial]
async fn test_category_sku_and_slug_must_be_valid() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();

  let missing_category = t.shop.create_product(&grant, draft("Stool", 77_777)).await;
  assert!(matches!(missing_category, Err(ShopError::Validation(ref m)) if m == "Selected category does not exist."));

  t.shop
    .create_product(
      &grant,
      ProductDraft {
        sku: Some("STOOL".to_string()),
        ..draft("Stool", t.category.id)
      },
    )
    .await
    .unwrap();

  let duplicate_sku = t
    .shop
    .create_product(
      &grant,
      ProductDraft {
        sku: Some("STOOL".to_string()),
        ..draft("Bar Stool", t.category.id)
      },
    )
    .await;
  assert!(matches!(duplicate_sku, Err(ShopError::Validation(ref m)) if m == "This SKU is already in use."));

  let duplicate_slug = t.shop.create_product(&grant, draft("stool!", t.category.id)).await;
  assert!(matches!(duplicate_slug, Err(ShopError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn test_update_ignores_the_product_itself_for_uniqueness() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();
  let reviewed = t
    .add_product(ProductRecord {
      sku: Some("DESK".to_string()),
      rating: 4.2,
      review_count: 9,
      ..product("Desk", 30_000)
    })
    .await;

  let notice = t
    .shop
    .update_product(
      &grant,
      reviewed.id,
      ProductDraft {
        sku: Some("DESK".to_string()),
        price_cents: 27_500,
        ..draft("Desk", t.category.id)
      },
    )
    .await
    .unwrap();

  let updated = notice.line.unwrap();
  assert_eq!(updated.price_cents, 27_500);
  assert_eq!(updated.review_count, 9);
  assert_eq!(updated.created_at, reviewed.created_at);

  assert!(matches!(
    t.shop.update_product(&grant, 5_555, draft("Ghost", t.category.id)).await,
    Err(ShopError::NotFound { .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_delete_cascades_cart_and_wishlist_lines() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();
  let product = t.stocked("Vase", 1_500, 4).await;
  let shopper = customer();
  t.shop
    .add_to_cart(
      &shopper,
      AddToCart {
        product_id: product.id,
        quantity: 1,
        product_attributes: None,
      },
    )
    .await
    .unwrap();
  t.shop.toggle_wishlist(&shopper, product.id).await.unwrap();

  let notice = t.shop.delete_product(&grant, product.id).await.unwrap();

  assert_eq!(notice.message, PRODUCT_DELETED);
  assert!(t.shop.view_cart(&shopper).await.unwrap().lines.is_empty());
  assert!(t.shop.view_wishlist(&shopper).await.unwrap().is_empty());
  assert!(matches!(
    t.shop.delete_product(&grant, product.id).await,
    Err(ShopError::NotFound { .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_products_on_orders_are_not_deleted() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();
  let product = t.stocked("Vase", 1_500, 4).await;
  t.store
    .insert_order(&NewOrder {
      order_number: "ORD-1".to_string(),
      user_id: Uuid::new_v4(),
      status: OrderStatus::Delivered,
      lines: vec![NewOrderLine {
        product_id: product.id,
        quantity: 1,
        price_cents: 1_500,
      }],
    })
    .await
    .unwrap();

  assert!(matches!(
    t.shop.delete_product(&grant, product.id).await,
    Err(ShopError::Validation(_))
  ));
  assert!(t.store.find_product(product.id).await.unwrap().is_some());
}

#[tokio::test]
#[serial]
async fn test_dashboard_summarises_catalog_and_orders() {
  setup_tracing();
  let t = TestShop::new().await;
  let grant = admin().authorize_admin().unwrap();

  let low = t.stocked("Nearly gone", 1_000, 2).await;
  t.stocked("Plenty", 1_000, 50).await;
  t.stocked("Gone", 1_000, 0).await;
  let bestseller = t.stocked("Bestseller", 1_000, 30).await;
  t.add_product(ProductRecord {
    status: ProductStatus::Draft,
    ..product("Unreleased", 1_000)
  })
  .await;

  for (i, status) in [OrderStatus::Pending, OrderStatus::Shipped, OrderStatus::Pending]
    .into_iter()
    .enumerate()
  {
    t.store
      .insert_order(&NewOrder {
        order_number: format!("ORD-{i}"),
        user_id: Uuid::new_v4(),
        status,
        lines: vec![
          NewOrderLine {
            product_id: bestseller.id,
            quantity: 1,
            price_cents: 1_000,
          },
          NewOrderLine {
            product_id: low.id,
            quantity: 2,
            price_cents: 1_000,
          },
        ]
        .into_iter()
        .take(if i == 0 { 2 } else { 1 })
        .collect(),
      })
      .await
      .unwrap();
  }

  let dashboard = t.shop.dashboard(&grant).await.unwrap();

  assert_eq!(dashboard.stats.total_products, 5);
  assert_eq!(dashboard.stats.active_products, 4);
  assert_eq!(dashboard.stats.total_categories, 1);
  assert_eq!(dashboard.stats.total_orders, 3);
  assert_eq!(dashboard.stats.pending_orders, 2);

  assert_eq!(dashboard.recent_orders[0].order_number, "ORD-2");
  assert_eq!(dashboard.recent_orders[2].total_cents, 3_000);

  let low_names: Vec<_> = dashboard.low_stock_products.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(low_names, vec!["Nearly gone"]);

  assert_eq!(dashboard.top_products[0].product.id, bestseller.id);
  assert_eq!(dashboard.top_products[0].order_items_count, 3);
  assert_eq!(dashboard.top_products[1].product.id, low.id);
  assert_eq!(dashboard.top_products.len(), 5);
}
