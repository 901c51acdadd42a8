// shopfront_app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{admin_handlers, cart_handlers, catalog_handlers, wishlist_handlers};

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(catalog_handlers::health_check_handler))
      .route("/home", web::get().to(catalog_handlers::home_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(catalog_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(catalog_handlers::get_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/{line_id}", web::put().to(cart_handlers::update_cart_line_handler))
          .route("/{line_id}", web::delete().to(cart_handlers::remove_cart_line_handler)),
      )
      .service(
        web::scope("/wishlist")
          .route("", web::get().to(wishlist_handlers::view_wishlist_handler))
          .route("", web::post().to(wishlist_handlers::toggle_wishlist_handler))
          .route("/{line_id}", web::delete().to(wishlist_handlers::remove_wishlist_line_handler)),
      )
      .service(
        web::scope("/admin")
          .route("", web::get().to(admin_handlers::dashboard_handler))
          .route("/products", web::get().to(admin_handlers::list_products_handler))
          .route("/products", web::post().to(admin_handlers::create_product_handler))
          .route("/products/{product_id}", web::get().to(admin_handlers::get_product_handler))
          .route("/products/{product_id}", web::put().to(admin_handlers::update_product_handler))
          .route("/products/{product_id}", web::delete().to(admin_handlers::delete_product_handler)),
      ),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::state::AppState;
  use crate::web::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
  use crate::web::{json_config, path_config, query_config};
  use actix_web::http::StatusCode;
  use actix_web::{test, App};
  use serde_json::{json, Value};
  use shopfront::models::{Product, ProductStatus};
  use shopfront::store::{CatalogStore, NewCategory, ProductRecord};
  use shopfront::{MemoryStore, Shop};
  use std::sync::Arc;
  use uuid::Uuid;

  async fn stocked_shop(stock_quantity: i32) -> (AppState, Product) {
    let store = Arc::new(MemoryStore::new());
    let category = store
      .insert_category(&NewCategory {
        name: "Lighting".to_string(),
        slug: "lighting".to_string(),
        description: None,
        parent_id: None,
        is_active: true,
        sort_order: 0,
      })
      .await
      .unwrap();
    let product = store
      .insert_product(&ProductRecord {
        name: "Paper Lantern".to_string(),
        slug: "paper-lantern".to_string(),
        description: None,
        short_description: None,
        price_cents: 1_800,
        sale_price_cents: None,
        stock_quantity,
        manage_stock: true,
        in_stock: true,
        is_featured: false,
        status: ProductStatus::Active,
        sku: None,
        category_id: category.id,
        rating: 0.0,
        review_count: 0,
        attributes: None,
      })
      .await
      .unwrap();
    let state = AppState {
      shop: Arc::new(Shop::new(store)),
      config: Arc::new(AppConfig::default()),
    };
    (state, product)
  }

  macro_rules! app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new($state))
          .app_data(json_config())
          .app_data(query_config())
          .app_data(path_config())
          .configure(configure_app_routes),
      )
      .await
    };
  }

  #[actix_web::test]
  async fn health_reports_ok() {
    let (state, _) = stocked_shop(1).await;
    let app = app!(state);
    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
  }

  #[actix_web::test]
  async fn public_listing_and_detail() {
    let (state, product) = stocked_shop(4).await;
    let app = app!(state);

    let req = test::TestRequest::get()
      .uri("/api/v1/products?search=lantern&min_price=&sort=price_low")
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["products"]["total"], 1);
    assert_eq!(body["products"]["per_page"], 12);
    assert_eq!(body["products"]["items"][0]["slug"], "paper-lantern");

    let req = test::TestRequest::get()
      .uri(&format!("/api/v1/products/{}", product.id))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["category"]["name"], "Lighting");

    let req = test::TestRequest::get().uri("/api/v1/products/999").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
      .uri("/api/v1/products?min_price=900&max_price=100")
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn cart_requires_an_identity() {
    let (state, _) = stocked_shop(1).await;
    let app = app!(state);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("authentication"));
  }

  #[actix_web::test]
  async fn adding_past_the_stock_is_a_conflict() {
    let (state, product) = stocked_shop(3).await;
    let app = app!(state);
    let user = Uuid::new_v4().to_string();
    let add = || {
      test::TestRequest::post()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.clone()))
        .set_json(json!({ "product_id": product.id, "quantity": 2 }))
        .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, add()).await;
    assert_eq!(body["message"], "Product added to cart successfully!");
    assert_eq!(body["cart_item"]["quantity"], 2);

    let resp = test::call_service(&app, add()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
      .as_str()
      .unwrap()
      .starts_with("Cannot add more items. Insufficient stock."));

    let req = test::TestRequest::get()
      .uri("/api/v1/cart")
      .insert_header((USER_ID_HEADER, user.clone()))
      .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["subtotal_cents"], 3_600);
  }

  #[actix_web::test]
  async fn other_users_lines_are_forbidden() {
    let (state, product) = stocked_shop(5).await;
    let app = app!(state);
    let owner = Uuid::new_v4().to_string();
    let req = test::TestRequest::post()
      .uri("/api/v1/cart")
      .insert_header((USER_ID_HEADER, owner))
      .set_json(json!({ "product_id": product.id, "quantity": 1 }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let line_id = body["cart_item"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
      .uri(&format!("/api/v1/cart/{}", line_id))
      .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
  }

  #[actix_web::test]
  async fn wishlist_toggles() {
    let (state, product) = stocked_shop(1).await;
    let app = app!(state);
    let user = Uuid::new_v4().to_string();
    let toggle = || {
      test::TestRequest::post()
        .uri("/api/v1/wishlist")
        .insert_header((USER_ID_HEADER, user.clone()))
        .set_json(json!({ "product_id": product.id }))
        .to_request()
    };

    let on: Value = test::call_and_read_body_json(&app, toggle()).await;
    assert_eq!(on["in_wishlist"], true);
    let off: Value = test::call_and_read_body_json(&app, toggle()).await;
    assert_eq!(off["in_wishlist"], false);
    assert_eq!(off["message"], "Product removed from wishlist!");
  }

  #[actix_web::test]
  async fn back_office_requires_the_admin_role() {
    let (state, _) = stocked_shop(2).await;
    let app = app!(state);
    let user = Uuid::new_v4().to_string();

    let req = test::TestRequest::get()
      .uri("/api/v1/admin")
      .insert_header((USER_ID_HEADER, user.clone()))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
      .uri("/api/v1/admin")
      .insert_header((USER_ID_HEADER, user.clone()))
      .insert_header((USER_ROLE_HEADER, "admin"))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["stats"]["total_products"], 1);
    assert_eq!(body["low_stock_products"][0]["slug"], "paper-lantern");
  }

  #[actix_web::test]
  async fn admin_product_lifecycle() {
    let (state, product) = stocked_shop(2).await;
    let app = app!(state);
    let admin = Uuid::new_v4().to_string();
    let draft = json!({
      "name": "Glass Pendant",
      "price_cents": 6_400,
      "category_id": product.category_id,
      "stock_quantity": 6,
      "status": "active",
    });

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/admin/products")
        .insert_header((USER_ID_HEADER, admin.clone()))
        .insert_header((USER_ROLE_HEADER, "admin"))
        .set_json(&draft)
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["product"]["slug"], "glass-pendant");
    let id = body["product"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
      .uri("/api/v1/admin/products?search=pendant")
      .insert_header((USER_ID_HEADER, admin.clone()))
      .insert_header((USER_ROLE_HEADER, "admin"))
      .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["products"]["total"], 1);
    assert_eq!(listing["products"]["per_page"], 15);

    let req = test::TestRequest::delete()
      .uri(&format!("/api/v1/admin/products/{}", id))
      .insert_header((USER_ID_HEADER, admin.clone()))
      .insert_header((USER_ROLE_HEADER, "admin"))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Product deleted successfully.");

    let req = test::TestRequest::post()
      .uri("/api/v1/admin/products")
      .insert_header((USER_ID_HEADER, admin))
      .insert_header((USER_ROLE_HEADER, "admin"))
      .insert_header(("content-type", "application/json"))
      .set_payload("{\"name\": ")
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
  }
}
