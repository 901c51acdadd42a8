// shopfront/src/admin/mod.rs

//! Back-office: product drafts and the dashboard. Every entry point on `Shop`
//! for these takes an `AdminGrant`.

pub mod dashboard;
pub mod draft;

pub use dashboard::{Dashboard, DashboardStats, DASHBOARD_LIST_SIZE, LOW_STOCK_THRESHOLD};
pub use draft::{slugify, ProductDraft};

pub const PRODUCT_CREATED: &str = "Product created successfully.";
pub const PRODUCT_UPDATED: &str = "Product updated successfully.";
pub const PRODUCT_DELETED: &str = "Product deleted successfully.";
