// shopfront/src/catalog/mod.rs

//! Catalog query engine: turns listing parameters into a declarative
//! `CatalogQuery` and evaluates it into a `Page<Product>`.

pub mod filter;
pub mod page;
pub mod query;
pub mod sort;

pub use filter::{Filter, SearchScope};
pub use page::{Page, PageRequest};
pub use query::{Audience, CatalogQuery, ListingParams, BACK_OFFICE_PAGE_SIZE, STOREFRONT_PAGE_SIZE};
pub use sort::SortKey;

/// Related products shown on a product page.
pub const RELATED_PRODUCTS: u32 = 4;
/// Featured and newest products shown on the home page.
pub const HOME_SHELF_SIZE: u32 = 8;
/// Root categories shown on the home page.
pub const HOME_CATEGORIES: usize = 6;

/// Listed products in the same category as `product_id`, excluding it.
pub fn related_products_query(product_id: i64, category_id: i64) -> CatalogQuery {
  CatalogQuery::new(
    vec![
      Filter::Listed,
      Filter::Category(category_id),
      Filter::ExcludeProduct(product_id),
    ],
    SortKey::Latest,
    PageRequest::first(RELATED_PRODUCTS),
  )
}

pub fn featured_products_query() -> CatalogQuery {
  CatalogQuery::new(
    vec![Filter::Listed, Filter::Featured],
    SortKey::Latest,
    PageRequest::first(HOME_SHELF_SIZE),
  )
}

pub fn newest_products_query() -> CatalogQuery {
  CatalogQuery::new(vec![Filter::Listed], SortKey::Latest, PageRequest::first(HOME_SHELF_SIZE))
}

/// Stock-managed products that are nearly, but not entirely, sold out.
pub fn low_stock_query(at_most: i32, limit: u32) -> CatalogQuery {
  CatalogQuery::new(
    vec![Filter::LowStock { at_most }],
    SortKey::Latest,
    PageRequest::first(limit),
  )
}
