// tests/catalog_tests.rs
mod common;

use common::*;
use serial_test::serial;
use shopfront::catalog::{ListingParams, BACK_OFFICE_PAGE_SIZE, STOREFRONT_PAGE_SIZE};
use shopfront::models::ProductStatus;
use shopfront::store::ProductRecord;
use shopfront::ShopError;

fn params() -> ListingParams {
  ListingParams::default()
}

#[tokio::test]
#[serial]
async fn test_default_listing_is_newest_first_twelve_per_page() {
  setup_tracing();
  let t = TestShop::new().await;
  for i in 1..=14 {
    t.stocked(&format!("Item {i}"), 1_000, 5).await;
  }

  let listing = t.shop.browse_catalog(&params()).await.unwrap();

  assert_eq!(listing.products.per_page, STOREFRONT_PAGE_SIZE);
  assert_eq!(listing.products.items.len(), 12);
  assert_eq!(listing.products.total, 14);
  assert_eq!(listing.products.last_page, 2);
  assert_eq!(listing.products.items[0].name, "Item 14");
  assert_eq!(listing.products.items[11].name, "Item 3");

  let second = t
    .shop
    .browse_catalog(&ListingParams {
      page: Some(2),
      ..params()
    })
    .await
    .unwrap();
  let names: Vec<_> = second.products.items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Item 2", "Item 1"]);
}

#[tokio::test]
#[serial]
async fn test_page_past_the_last_is_empty_not_an_error() {
  setup_tracing();
  let t = TestShop::new().await;
  t.stocked("Only", 500, 1).await;

  let listing = t
    .shop
    .browse_catalog(&ListingParams {
      page: Some(7),
      ..params()
    })
    .await
    .unwrap();

  assert!(listing.products.items.is_empty());
  assert_eq!(listing.products.current_page, 7);
  assert_eq!(listing.products.last_page, 1);
  assert_eq!(listing.products.total, 1);
}

#[tokio::test]
#[serial]
async fn test_storefront_hides_inactive_and_out_of_stock_products() {
  setup_tracing();
  let t = TestShop::new().await;
  t.stocked("Visible", 500, 3).await;
  t.add_product(ProductRecord {
    status: ProductStatus::Draft,
    ..product("Draft", 500)
  })
  .await;
  t.add_product(ProductRecord {
    in_stock: false,
    ..product("Sold out", 500)
  })
  .await;

  let listing = t.shop.browse_catalog(&params()).await.unwrap();
  let names: Vec<_> = listing.products.items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Visible"]);

  let grant = admin().authorize_admin().unwrap();
  let back_office = t.shop.admin_catalog(&grant, &params()).await.unwrap();
  assert_eq!(back_office.products.total, 3);
  assert_eq!(back_office.products.per_page, BACK_OFFICE_PAGE_SIZE);
}

#[tokio::test]
#[serial]
async fn test_search_scope_differs_between_storefront_and_back_office() {
  setup_tracing();
  let t = TestShop::new().await;
  t.add_product(ProductRecord {
    short_description: Some("A sturdy OAK frame".to_string()),
    ..product("Bookshelf", 9_000)
  })
  .await;
  t.stocked("Oak Table", 20_000, 2).await;
  t.stocked("Lamp", 3_000, 2).await;

  let search = ListingParams {
    search: Some("oak".to_string()),
    ..params()
  };

  let public = t.shop.browse_catalog(&search).await.unwrap();
  let mut names: Vec<_> = public.products.items.iter().map(|p| p.name.clone()).collect();
  names.sort();
  assert_eq!(names, vec!["Bookshelf", "Oak Table"]);

  let grant = admin().authorize_admin().unwrap();
  let admin_hits = t.shop.admin_catalog(&grant, &search).await.unwrap();
  let names: Vec<_> = admin_hits.products.items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Oak Table"]);
}

#[tokio::test]
#[serial]
async fn test_price_bounds_are_inclusive_and_use_list_price() {
  setup_tracing();
  let t = TestShop::new().await;
  t.stocked("Cheap", 1_000, 1).await;
  t.stocked("Middle", 2_000, 1).await;
  t.add_product(ProductRecord {
    sale_price_cents: Some(1_500),
    ..product("Discounted", 3_000)
  })
  .await;

  let listing = t
    .shop
    .browse_catalog(&ListingParams {
      min_price: Some(1_000),
      max_price: Some(2_000),
      sort: Some("price_low".to_string()),
      ..params()
    })
    .await
    .unwrap();
  let names: Vec<_> = listing.products.items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Cheap", "Middle"]);

  let inverted = t
    .shop
    .browse_catalog(&ListingParams {
      min_price: Some(3_000),
      max_price: Some(1_000),
      ..params()
    })
    .await;
  assert!(matches!(inverted, Err(ShopError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn test_sorts_break_ties_by_insertion_order() {
  setup_tracing();
  let t = TestShop::new().await;
  let first = t.stocked("First", 1_000, 1).await;
  let second = t.stocked("Second", 1_000, 1).await;
  let pricey = t.stocked("Pricey", 5_000, 1).await;
  t.add_product(ProductRecord {
    rating: 4.5,
    review_count: 40,
    ..product("Loved", 2_000)
  })
  .await;

  let by = |sort: &str| ListingParams {
    sort: Some(sort.to_string()),
    ..params()
  };

  let low = t.shop.browse_catalog(&by("price_low")).await.unwrap();
  let ids: Vec<_> = low.products.items.iter().map(|p| p.id).take(2).collect();
  assert_eq!(ids, vec![first.id, second.id]);

  let high = t.shop.browse_catalog(&by("price_high")).await.unwrap();
  assert_eq!(high.products.items[0].id, pricey.id);
  assert_eq!(high.products.items[2].id, first.id);

  let rated = t.shop.browse_catalog(&by("rating")).await.unwrap();
  assert_eq!(rated.products.items[0].name, "Loved");
  assert_eq!(rated.products.items[1].id, first.id);

  let popular = t.shop.browse_catalog(&by("popular")).await.unwrap();
  assert_eq!(popular.products.items[0].name, "Loved");

  let unknown = t.shop.browse_catalog(&by("alphabetical")).await.unwrap();
  assert_eq!(unknown.products.items[0].name, "Loved");
}

#[tokio::test]
#[serial]
async fn test_category_filter_and_navigation() {
  setup_tracing();
  let t = TestShop::new().await;
  let books = t.add_category("Books", None, 2).await;
  t.add_category("Comics", Some(books.id), 1).await;
  t.add_product(ProductRecord {
    category_id: books.id,
    ..product("Novel", 1_200)
  })
  .await;
  t.stocked("Kettle", 2_500, 4).await;

  let listing = t
    .shop
    .browse_catalog(&ListingParams {
      category: Some(books.id),
      ..params()
    })
    .await
    .unwrap();

  let names: Vec<_> = listing.products.items.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Novel"]);
  let nav: Vec<_> = listing.categories.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(nav, vec!["Books", "General"]);
  assert_eq!(listing.filters.category, Some(books.id));
}

#[tokio::test]
#[serial]
async fn test_product_detail_lists_up_to_four_related_products() {
  setup_tracing();
  let t = TestShop::new().await;
  let main = t.stocked("Main", 1_000, 1).await;
  for i in 1..=5 {
    t.stocked(&format!("Sibling {i}"), 1_000, 1).await;
  }
  t.add_product(ProductRecord {
    status: ProductStatus::Inactive,
    ..product("Retired sibling", 1_000)
  })
  .await;
  let elsewhere = t.add_category("Elsewhere", None, 3).await;
  t.add_product(ProductRecord {
    category_id: elsewhere.id,
    ..product("Stranger", 1_000)
  })
  .await;

  let detail = t.shop.product_detail(main.id).await.unwrap();

  assert_eq!(detail.product.id, main.id);
  assert_eq!(detail.category.map(|c| c.id), Some(t.category.id));
  assert_eq!(detail.related_products.len(), 4);
  assert!(detail
    .related_products
    .iter()
    .all(|p| p.id != main.id && p.name.starts_with("Sibling")));

  assert!(matches!(
    t.shop.product_detail(9_999).await,
    Err(ShopError::NotFound { entity: "Product", .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_home_page_shelves() {
  setup_tracing();
  let t = TestShop::new().await;
  for i in 1..=10 {
    t.add_product(ProductRecord {
      is_featured: i % 2 == 0,
      ..product(&format!("Item {i}"), 1_000)
    })
    .await;
  }
  for i in 0..7 {
    t.add_category(&format!("Root {i}"), None, 10 - i).await;
  }

  let home = t.shop.home().await.unwrap();

  assert_eq!(home.new_products.len(), 8);
  assert_eq!(home.new_products[0].name, "Item 10");
  assert_eq!(home.featured_products.len(), 5);
  assert!(home.featured_products.iter().all(|p| p.is_featured));
  assert_eq!(home.categories.len(), 6);
  assert_eq!(home.categories[0].category.name, "General");
  assert_eq!(home.categories[1].category.name, "Root 6");
}
