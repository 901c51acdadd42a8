// shopfront/src/catalog/filter.rs

//! Product predicates. Each variant is evaluated in memory by `Filter::matches`
//! and rendered to SQL by the PostgreSQL store; adding a filter means adding a
//! variant here and an arm there, without touching how queries are assembled.

use serde::Serialize;

use crate::models::{Product, ProductStatus};

/// Which text fields a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
  Name,
  NameAndDescriptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
  /// Visible on the storefront: active and in stock.
  Listed,
  Status(ProductStatus),
  /// Case-insensitive substring; `needle` is stored lowercased.
  Search { needle: String, scope: SearchScope },
  Category(i64),
  /// Inclusive lower bound on the list price.
  MinPrice(i64),
  /// Inclusive upper bound on the list price.
  MaxPrice(i64),
  Featured,
  ExcludeProduct(i64),
  /// Stock-managed, not sold out, at most `at_most` left.
  LowStock { at_most: i32 },
}

impl Filter {
  pub fn search(term: &str, scope: SearchScope) -> Self {
    Filter::Search {
      needle: term.to_lowercase(),
      scope,
    }
  }

  pub fn matches(&self, product: &Product) -> bool {
    match self {
      Filter::Listed => product.is_listed(),
      Filter::Status(status) => product.status == *status,
      Filter::Search { needle, scope } => {
        let hit = |text: &str| text.to_lowercase().contains(needle.as_str());
        match scope {
          SearchScope::Name => hit(&product.name),
          SearchScope::NameAndDescriptions => {
            hit(&product.name)
              || product.description.as_deref().is_some_and(hit)
              || product.short_description.as_deref().is_some_and(hit)
          }
        }
      }
      Filter::Category(category_id) => product.category_id == *category_id,
      Filter::MinPrice(min) => product.price_cents >= *min,
      Filter::MaxPrice(max) => product.price_cents <= *max,
      Filter::Featured => product.is_featured,
      Filter::ExcludeProduct(id) => product.id != *id,
      Filter::LowStock { at_most } => {
        product.manage_stock && product.stock_quantity > 0 && product.stock_quantity <= *at_most
      }
    }
  }
}
