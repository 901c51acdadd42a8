// shopfront/src/models/mod.rs

//! Data structures representing storefront records.

pub mod cart_item;
pub mod category;
pub mod order;
pub mod product;
pub mod promo_code;
pub mod wishlist_item;

pub use cart_item::{CartItem, CartLine};
pub use category::{Category, CategoryNode};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductStatus};
pub use promo_code::{PromoCode, PromoCodeKind};
pub use wishlist_item::{WishlistItem, WishlistLine};
