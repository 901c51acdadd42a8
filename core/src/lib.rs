// shopfront/src/lib.rs

//! Shopfront: the catalog query engine and cart consistency manager of a small
//! online shop.
//!
//! - `catalog` turns listing parameters into a declarative `CatalogQuery` and
//!   evaluates it into a `Page<Product>`.
//! - `cart` runs every cart and wishlist mutation as a named-step pipeline that
//!   enforces quantity and stock rules.
//! - `admin` holds the back-office product rules and the dashboard.
//! - `store` is the persistence seam, with an in-process `MemoryStore`.
//! - `Shop` ties them together behind one facade.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod shop;
pub mod store;

pub use crate::engine::{ContextData, PipelineControl, PipelineResult, SkipCondition};
pub use crate::pipeline::Pipeline;
pub use crate::registry::Workflows;

pub use crate::auth::{Actor, AdminGrant, Capability};
pub use crate::error::{PipelineError, ShopError, ShopResult};
pub use crate::shop::{AddToCart, HomePage, Listing, ProductDetail, Shop};
pub use crate::store::{MemoryStore, Store};
