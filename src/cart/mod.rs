//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartLine, Order, inputs, view models)
//! - The pricing engine (subtotal, tiered auto discount, coupons, GST)
//! - Per-session application state management
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod pricing;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, SharedState};
