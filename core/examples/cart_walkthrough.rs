// shopfront/examples/cart_walkthrough.rs

use shopfront::admin::ProductDraft;
use shopfront::catalog::ListingParams;
use shopfront::models::ProductStatus;
use shopfront::store::{CatalogStore, NewCategory};
use shopfront::{Actor, AddToCart, MemoryStore, Shop, ShopError};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Shopfront Cart Walkthrough ---");

  let store = Arc::new(MemoryStore::new());
  let category = store
    .insert_category(&NewCategory {
      name: "Kitchen".to_string(),
      slug: "kitchen".to_string(),
      description: None,
      parent_id: None,
      is_active: true,
      sort_order: 1,
    })
    .await?;
  let shop = Shop::new(store);

  // 1. An admin stocks the shelf.
  let grant = Actor::admin(Uuid::new_v4()).authorize_admin()?;
  let kettle = shop
    .create_product(
      &grant,
      ProductDraft {
        name: "Enamel Kettle".to_string(),
        description: Some("Two litres, induction safe.".to_string()),
        short_description: None,
        price_cents: 3_900,
        sale_price_cents: Some(3_200),
        category_id: category.id,
        stock_quantity: 3,
        manage_stock: true,
        in_stock: true,
        is_featured: true,
        status: ProductStatus::Active,
        sku: Some("KET-01".to_string()),
        attributes: None,
      },
    )
    .await?
    .line
    .ok_or("product was not returned")?;
  info!(product_id = kettle.id, slug = %kettle.slug, "Created product.");

  // 2. A shopper finds it.
  let listing = shop
    .browse_catalog(&ListingParams {
      search: Some("kettle".to_string()),
      ..Default::default()
    })
    .await?;
  info!(hits = listing.products.total, "Searched the catalog.");

  // 3. Adds two, then tries to add two more than the shelf holds.
  let shopper = Actor::customer(Uuid::new_v4());
  let request = AddToCart {
    product_id: kettle.id,
    quantity: 2,
    product_attributes: None,
  };
  let notice = shop.add_to_cart(&shopper, request.clone()).await?;
  info!(message = notice.message, "First add.");

  match shop.add_to_cart(&shopper, request).await {
    Err(err @ ShopError::InsufficientStock { .. }) => warn!(%err, "Second add refused."),
    other => warn!(?other, "Unexpected outcome for second add."),
  }

  let cart = shop.view_cart(&shopper).await?;
  info!(lines = cart.lines.len(), subtotal_cents = cart.subtotal_cents, "Cart after both adds.");

  // 4. Wishlist toggling.
  let on = shop.toggle_wishlist(&shopper, kettle.id).await?;
  let off = shop.toggle_wishlist(&shopper, kettle.id).await?;
  info!(first = on.message, second = off.message, "Toggled the wishlist twice.");

  Ok(())
}
