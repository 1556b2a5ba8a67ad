//! Plant Catalog Domain Module
//!
//! Read-only data the shop sells against: the plant list and the coupon
//! table, both loaded from seed JSON embedded at compile time. Nothing in
//! the application mutates the catalog.

pub mod handlers;
pub mod models;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Coupon, Plant, PlantSize};
pub use store::Catalog;
