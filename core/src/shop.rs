// shopfront/src/shop.rs

//! `Shop`: the storefront operations the presentation layer calls.
//!
//! Cart and wishlist mutations run through the pipelines registered in
//! `cart::register_all_pipelines`; reads go straight to the store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::admin::{self, Dashboard, ProductDraft};
use crate::auth::{Actor, AdminGrant};
use crate::cart::{
  self, AddToCartCtx, CartSummary, Notice, RemoveCartLineCtx, RemoveWishlistLineCtx, ToggleWishlistCtx,
  UpdateCartLineCtx, WishlistToggle,
};
use crate::catalog::{
  featured_products_query, newest_products_query, related_products_query, Audience, CatalogQuery, ListingParams,
  Page, HOME_CATEGORIES,
};
use crate::engine::ContextData;
use crate::error::{PipelineError, ShopError, ShopResult};
use crate::models::category::{active_by_name, active_roots_by_name, active_tree};
use crate::models::{CartItem, Category, CategoryNode, Product, WishlistItem, WishlistLine};
use crate::registry::Workflows;
use crate::store::Store;

/// A product listing with the category navigation shown beside it and the filters echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
  pub products: Page<Product>,
  pub categories: Vec<Category>,
  pub filters: ListingParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
  pub product: Product,
  pub category: Option<Category>,
  pub related_products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
  pub featured_products: Vec<Product>,
  pub new_products: Vec<Product>,
  pub categories: Vec<CategoryNode>,
}

/// Input of an add-to-cart request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCart {
  pub product_id: i64,
  pub quantity: i32,
  #[serde(default)]
  pub product_attributes: Option<serde_json::Value>,
}

pub struct Shop {
  store: Arc<dyn Store>,
  workflows: Workflows<ShopError>,
}

impl Shop {
  pub fn new(store: Arc<dyn Store>) -> Self {
    let workflows = Workflows::new();
    cart::register_all_pipelines(&workflows);
    Self { store, workflows }
  }

  pub fn store(&self) -> &Arc<dyn Store> {
    &self.store
  }

  /// Runs the pipeline registered for `TData` and hands the finished context back.
  async fn run_workflow<TData>(&self, pipeline: &'static str, data: TData) -> ShopResult<TData>
  where
    TData: 'static + Send + Sync,
  {
    let ctx = ContextData::new(data);
    self.workflows.run(ctx.clone()).await?;
    ctx.try_unwrap().map_err(|_| Self::halted(pipeline))
  }

  fn halted(pipeline: &'static str) -> ShopError {
    warn!(pipeline, "Pipeline finished without an outcome.");
    ShopError::from(PipelineError::Halted {
      pipeline: pipeline.to_string(),
    })
  }

  // --- Catalog ---

  #[instrument(name = "Shop::browse_catalog", skip_all)]
  pub async fn browse_catalog(&self, params: &ListingParams) -> ShopResult<Listing> {
    let query = CatalogQuery::from_params(params, Audience::Storefront)?;
    let products = self.store.query_products(&query).await?;
    let categories = active_roots_by_name(&self.store.categories().await?);
    Ok(Listing {
      products,
      categories,
      filters: ListingParams {
        page: None,
        status: None,
        ..params.clone()
      },
    })
  }

  #[instrument(name = "Shop::product_detail", skip(self))]
  pub async fn product_detail(&self, product_id: i64) -> ShopResult<ProductDetail> {
    let product = self.find_product(product_id).await?;
    let category = self.store.find_category(product.category_id).await?;
    let related_products = self
      .store
      .query_products(&related_products_query(product.id, product.category_id))
      .await?
      .items;
    Ok(ProductDetail {
      product,
      category,
      related_products,
    })
  }

  #[instrument(name = "Shop::home", skip_all)]
  pub async fn home(&self) -> ShopResult<HomePage> {
    let featured_products = self.store.query_products(&featured_products_query()).await?.items;
    let new_products = self.store.query_products(&newest_products_query()).await?.items;
    let categories = active_tree(&self.store.categories().await?, HOME_CATEGORIES);
    Ok(HomePage {
      featured_products,
      new_products,
      categories,
    })
  }

  /// Active top-level categories by name.
  pub async fn categories(&self) -> ShopResult<Vec<Category>> {
    Ok(active_roots_by_name(&self.store.categories().await?))
  }

  async fn find_product(&self, product_id: i64) -> ShopResult<Product> {
    self
      .store
      .find_product(product_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Product", product_id))
  }

  // --- Cart ---

  #[instrument(name = "Shop::add_to_cart", skip(self, request), fields(user_id = %actor.user_id, product_id = request.product_id, quantity = request.quantity))]
  pub async fn add_to_cart(&self, actor: &Actor, request: AddToCart) -> ShopResult<Notice<CartItem>> {
    let ctx = AddToCartCtx::new(
      self.store.clone(),
      *actor,
      request.product_id,
      request.quantity,
      request.product_attributes,
    );
    let done = self.run_workflow(cart::add::ADD_TO_CART, ctx).await?;
    let line = done.saved_line.ok_or_else(|| Self::halted(cart::add::ADD_TO_CART))?;
    Ok(Notice::new(cart::ADDED_TO_CART, Some(line)))
  }

  #[instrument(name = "Shop::update_cart_line", skip(self), fields(user_id = %actor.user_id))]
  pub async fn update_cart_line(&self, actor: &Actor, line_id: i64, quantity: i32) -> ShopResult<Notice<CartItem>> {
    let ctx = UpdateCartLineCtx::new(self.store.clone(), *actor, line_id, quantity);
    let done = self.run_workflow(cart::update::UPDATE_CART_LINE, ctx).await?;
    let line = done
      .saved_line
      .ok_or_else(|| Self::halted(cart::update::UPDATE_CART_LINE))?;
    Ok(Notice::new(cart::CART_UPDATED, Some(line)))
  }

  #[instrument(name = "Shop::remove_cart_line", skip(self), fields(user_id = %actor.user_id))]
  pub async fn remove_cart_line(&self, actor: &Actor, line_id: i64) -> ShopResult<Notice<CartItem>> {
    let ctx = RemoveCartLineCtx::new(self.store.clone(), *actor, line_id);
    let done = self.run_workflow(cart::remove::REMOVE_CART_LINE, ctx).await?;
    if !done.removed {
      return Err(ShopError::not_found("Cart item", line_id));
    }
    Ok(Notice::new(cart::REMOVED_FROM_CART, None))
  }

  #[instrument(name = "Shop::view_cart", skip(self), fields(user_id = %actor.user_id))]
  pub async fn view_cart(&self, actor: &Actor) -> ShopResult<CartSummary> {
    Ok(CartSummary::new(self.store.cart_lines(actor.user_id).await?))
  }

  // --- Wishlist ---

  #[instrument(name = "Shop::toggle_wishlist", skip(self), fields(user_id = %actor.user_id))]
  pub async fn toggle_wishlist(&self, actor: &Actor, product_id: i64) -> ShopResult<Notice<WishlistItem>> {
    let ctx = ToggleWishlistCtx::new(self.store.clone(), *actor, product_id);
    let done = self.run_workflow(cart::wishlist::TOGGLE_WISHLIST, ctx).await?;
    match done.outcome {
      Some(WishlistToggle::Added(line)) => Ok(Notice::new(cart::ADDED_TO_WISHLIST, Some(line))),
      Some(WishlistToggle::Removed(_)) => Ok(Notice::new(cart::REMOVED_FROM_WISHLIST, None)),
      None => Err(Self::halted(cart::wishlist::TOGGLE_WISHLIST)),
    }
  }

  #[instrument(name = "Shop::remove_wishlist_line", skip(self), fields(user_id = %actor.user_id))]
  pub async fn remove_wishlist_line(&self, actor: &Actor, line_id: i64) -> ShopResult<Notice<WishlistItem>> {
    let ctx = RemoveWishlistLineCtx::new(self.store.clone(), *actor, line_id);
    let done = self.run_workflow(cart::wishlist::REMOVE_WISHLIST_LINE, ctx).await?;
    if !done.removed {
      return Err(ShopError::not_found("Wishlist item", line_id));
    }
    Ok(Notice::new(cart::WISHLIST_LINE_REMOVED, None))
  }

  /// Newest first.
  pub async fn view_wishlist(&self, actor: &Actor) -> ShopResult<Vec<WishlistLine>> {
    self.store.wishlist_lines(actor.user_id).await
  }

  // --- Back office ---

  #[instrument(name = "Shop::admin_catalog", skip_all, fields(admin_id = %grant.user_id()))]
  pub async fn admin_catalog(&self, grant: &AdminGrant, params: &ListingParams) -> ShopResult<Listing> {
    let query = CatalogQuery::from_params(params, Audience::BackOffice)?;
    let products = self.store.query_products(&query).await?;
    let categories = active_by_name(&self.store.categories().await?);
    Ok(Listing {
      products,
      categories,
      filters: ListingParams {
        search: params.search.clone(),
        status: params.status,
        category: params.category,
        ..ListingParams::default()
      },
    })
  }

  pub async fn admin_product(&self, _grant: &AdminGrant, product_id: i64) -> ShopResult<ProductDetail> {
    let product = self.find_product(product_id).await?;
    let category = self.store.find_category(product.category_id).await?;
    Ok(ProductDetail {
      product,
      category,
      related_products: Vec::new(),
    })
  }

  #[instrument(name = "Shop::create_product", skip_all, fields(admin_id = %grant.user_id(), name = %draft.name))]
  pub async fn create_product(&self, grant: &AdminGrant, draft: ProductDraft) -> ShopResult<Notice<Product>> {
    self.check_draft(&draft, None).await?;
    let product = self.store.insert_product(&draft.into_record((0.0, 0))).await?;
    info!(product_id = product.id, slug = %product.slug, "Product created.");
    Ok(Notice::new(admin::PRODUCT_CREATED, Some(product)))
  }

  #[instrument(name = "Shop::update_product", skip_all, fields(admin_id = %grant.user_id(), product_id = product_id))]
  pub async fn update_product(
    &self,
    grant: &AdminGrant,
    product_id: i64,
    draft: ProductDraft,
  ) -> ShopResult<Notice<Product>> {
    let existing = self.find_product(product_id).await?;
    self.check_draft(&draft, Some(product_id)).await?;
    let record = draft.into_record((existing.rating, existing.review_count));
    let product = self
      .store
      .update_product(product_id, &record)
      .await?
      .ok_or_else(|| ShopError::not_found("Product", product_id))?;
    info!(product_id, "Product updated.");
    Ok(Notice::new(admin::PRODUCT_UPDATED, Some(product)))
  }

  /// Removes the product and every cart and wishlist line that references it.
  /// Products that appear on orders are kept.
  #[instrument(name = "Shop::delete_product", skip_all, fields(admin_id = %grant.user_id(), product_id = product_id))]
  pub async fn delete_product(&self, grant: &AdminGrant, product_id: i64) -> ShopResult<Notice<Product>> {
    self.find_product(product_id).await?;
    if self.store.product_has_orders(product_id).await? {
      return Err(ShopError::validation(
        "This product appears on orders and cannot be deleted. Set it inactive instead.",
      ));
    }
    if !self.store.delete_product(product_id).await? {
      return Err(ShopError::not_found("Product", product_id));
    }
    info!(product_id, "Product deleted.");
    Ok(Notice::new(admin::PRODUCT_DELETED, None))
  }

  #[instrument(name = "Shop::dashboard", skip_all, fields(admin_id = %grant.user_id()))]
  pub async fn dashboard(&self, grant: &AdminGrant) -> ShopResult<Dashboard> {
    Dashboard::load(self.store.as_ref()).await
  }

  /// Field rules, then the rules that need the store. `except` is the product being updated.
  async fn check_draft(&self, draft: &ProductDraft, except: Option<i64>) -> ShopResult<()> {
    draft.check_fields()?;

    if self.store.find_category(draft.category_id).await?.is_none() {
      return Err(ShopError::validation("Selected category does not exist."));
    }
    if let Some(sku) = draft.normalized_sku() {
      if self.store.sku_in_use(sku, except).await? {
        return Err(ShopError::validation("This SKU is already in use."));
      }
    }
    if self.store.slug_in_use(&draft.slug(), except).await? {
      return Err(ShopError::validation("A product with this name already exists."));
    }
    Ok(())
  }
}
