// shopfront/src/catalog/query.rs

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::filter::{Filter, SearchScope};
use super::page::{Page, PageRequest};
use super::sort::SortKey;
use crate::error::{ShopError, ShopResult};
use crate::models::{Product, ProductStatus};

pub const STOREFRONT_PAGE_SIZE: u32 = 12;
pub const BACK_OFFICE_PAGE_SIZE: u32 = 15;

/// Who the listing is for. Decides the base predicate, the searched fields and the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
  Storefront,
  BackOffice,
}

impl Audience {
  fn base_filters(&self) -> Vec<Filter> {
    match self {
      Audience::Storefront => vec![Filter::Listed],
      Audience::BackOffice => Vec::new(),
    }
  }

  fn search_scope(&self) -> SearchScope {
    match self {
      Audience::Storefront => SearchScope::NameAndDescriptions,
      Audience::BackOffice => SearchScope::Name,
    }
  }

  pub fn page_size(&self) -> u32 {
    match self {
      Audience::Storefront => STOREFRONT_PAGE_SIZE,
      Audience::BackOffice => BACK_OFFICE_PAGE_SIZE,
    }
  }
}

/// Listing parameters as they arrive in a query string. Blank values count as absent.
/// Prices are in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingParams {
  #[serde(default, deserialize_with = "blank_as_none")]
  pub search: Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub category: Option<i64>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub min_price: Option<i64>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub max_price: Option<i64>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub sort: Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub page: Option<i64>,
  /// Honoured for the back office only.
  #[serde(default, deserialize_with = "blank_as_none")]
  pub status: Option<ProductStatus>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
  T::Err: Display,
{
  let raw: Option<String> = Option::deserialize(deserializer)?;
  match raw.as_deref() {
    None | Some("") => Ok(None),
    Some(value) => value.parse().map(Some).map_err(de::Error::custom),
  }
}

/// A declarative catalog query: every filter must match, then `sort`, then `page`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogQuery {
  pub filters: Vec<Filter>,
  pub sort: SortKey,
  pub page: PageRequest,
}

impl CatalogQuery {
  pub fn new(filters: Vec<Filter>, sort: SortKey, page: PageRequest) -> Self {
    Self { filters, sort, page }
  }

  /// Builds the query for `audience` from raw listing parameters.
  pub fn from_params(params: &ListingParams, audience: Audience) -> ShopResult<Self> {
    if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
      if min > max {
        return Err(ShopError::validation(
          "The minimum price must not be greater than the maximum price.",
        ));
      }
    }

    let status = match audience {
      Audience::BackOffice => params.status,
      Audience::Storefront => None,
    };

    let filters = audience
      .base_filters()
      .into_iter()
      .chain(params.search.as_deref().map(|term| Filter::search(term, audience.search_scope())))
      .chain(status.map(Filter::Status))
      .chain(params.category.map(Filter::Category))
      .chain(params.min_price.map(Filter::MinPrice))
      .chain(params.max_price.map(Filter::MaxPrice))
      .collect();

    Ok(Self::new(
      filters,
      SortKey::from_param(params.sort.as_deref()),
      PageRequest::new(params.page, audience.page_size()),
    ))
  }

  pub fn matches(&self, product: &Product) -> bool {
    self.filters.iter().all(|f| f.matches(product))
  }

  /// Evaluates the query over an in-memory collection.
  pub fn evaluate<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Page<Product> {
    let mut hits: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
    hits.sort_by(|a, b| self.sort.compare(a, b));
    Page::slice(hits, self.page).map(Product::clone)
  }
}
