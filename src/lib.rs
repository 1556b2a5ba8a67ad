//! Garden Paradise Plant Shop
//!
//! In-memory storefront backend: a fixed plant catalog with coupon codes,
//! per-session carts with a tiered automatic quantity discount, GST, and
//! an append-only order history.

// Domain modules
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod error;
pub mod router;
