// shopfront_app/src/seed.rs

//! Demo catalog written through the store traits, so it works on either store.

use shopfront::admin::slugify;
use shopfront::models::ProductStatus;
use shopfront::store::{NewCategory, ProductRecord};
use shopfront::{ShopResult, Store};
use tracing::info;

const ROOT_CATEGORIES: [(&str, &str); 4] = [
  ("Home & Living", "Furniture, lighting and decor."),
  ("Kitchen", "Cookware and tableware."),
  ("Outdoors", "Garden and camping gear."),
  ("Stationery", "Paper goods and desk tools."),
];

/// (name, price, sale price, stock, featured, root category index)
const PRODUCTS: [(&str, i64, Option<i64>, i32, bool, usize); 12] = [
  ("Oak Side Table", 12_900, None, 7, true, 0),
  ("Linen Cushion Cover", 2_400, Some(1_900), 40, false, 0),
  ("Brass Floor Lamp", 18_500, None, 3, true, 0),
  ("Enamel Kettle", 3_900, Some(3_200), 12, true, 1),
  ("Cast Iron Skillet", 4_500, None, 25, false, 1),
  ("Stoneware Mug Set", 2_800, None, 4, false, 1),
  ("Folding Camp Chair", 5_600, Some(4_900), 18, false, 2),
  ("Cedar Planter Box", 6_200, None, 9, true, 2),
  ("Hurricane Lantern", 3_100, None, 2, false, 2),
  ("Dot Grid Notebook", 1_400, None, 60, false, 3),
  ("Walnut Desk Organizer", 4_200, Some(3_600), 11, true, 3),
  ("Fountain Pen", 7_500, None, 5, false, 3),
];

/// Seeds categories and products unless the catalog already has categories.
pub async fn seed_catalog(store: &dyn Store) -> ShopResult<()> {
  if !store.categories().await?.is_empty() {
    info!("Catalog already has categories; skipping seed.");
    return Ok(());
  }

  let mut roots = Vec::with_capacity(ROOT_CATEGORIES.len());
  for (position, (name, description)) in ROOT_CATEGORIES.iter().enumerate() {
    let category = store
      .insert_category(&NewCategory {
        name: name.to_string(),
        slug: slugify(name),
        description: Some(description.to_string()),
        parent_id: None,
        is_active: true,
        sort_order: position as i32,
      })
      .await?;
    roots.push(category);
  }

  let outdoor_lighting = store
    .insert_category(&NewCategory {
      name: "Outdoor Lighting".to_string(),
      slug: "outdoor-lighting".to_string(),
      description: None,
      parent_id: Some(roots[2].id),
      is_active: true,
      sort_order: 0,
    })
    .await?;

  for (index, (name, price_cents, sale_price_cents, stock_quantity, is_featured, root)) in
    PRODUCTS.iter().enumerate()
  {
    let category_id = if name.contains("Lantern") {
      outdoor_lighting.id
    } else {
      roots[*root].id
    };
    store
      .insert_product(&ProductRecord {
        name: name.to_string(),
        slug: slugify(name),
        description: Some(format!("{} from the house collection.", name)),
        short_description: None,
        price_cents: *price_cents,
        sale_price_cents: *sale_price_cents,
        stock_quantity: *stock_quantity,
        manage_stock: true,
        in_stock: true,
        is_featured: *is_featured,
        status: ProductStatus::Active,
        sku: Some(format!("SEED-{:03}", index + 1)),
        category_id,
        rating: ((index * 7) % 50) as f64 / 10.0,
        review_count: ((index * 13) % 120) as i32,
        attributes: None,
      })
      .await?;
  }

  info!(
    categories = roots.len() + 1,
    products = PRODUCTS.len(),
    "Seeded demo catalog."
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use shopfront::store::CatalogStore;
  use shopfront::MemoryStore;

  #[tokio::test]
  async fn seeding_runs_once() {
    let store = MemoryStore::new();
    seed_catalog(&store).await.unwrap();
    seed_catalog(&store).await.unwrap();

    let counts = store.catalog_counts().await.unwrap();
    assert_eq!(counts.total_categories, 5);
    assert_eq!(counts.total_products, PRODUCTS.len() as i64);
    assert_eq!(counts.active_products, PRODUCTS.len() as i64);
  }
}
