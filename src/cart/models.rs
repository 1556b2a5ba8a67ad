//! Shopping Cart Domain Models
//!
//! Data structures for the cart, checkout snapshots and the API payloads
//! around them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel recorded on an order when no discount or no coupon applied.
pub const NIL: &str = "NIL";

/// A line in the shopping cart.
///
/// Name and unit price are captured when the plant is first added and kept
/// as a snapshot; a later catalog change never touches lines already in
/// the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog id of the plant
    pub plant_id: u32,

    /// Name as it was at add-time
    pub name: String,

    /// Unit price as it was at add-time
    pub unit_price: Decimal,

    /// Always at least 1; a line forced to 0 is removed instead
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The cart: at most one line per plant id.
pub type Cart = BTreeMap<u32, CartLine>;

/// An immutable checkout snapshot in the order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// One past the highest id already in the history, starting at 1
    pub id: u32,

    /// Cart lines copied at checkout time
    pub items: Vec<CartLine>,

    /// Pre-discount subtotal
    pub subtotal: Decimal,

    /// GST actually charged, after discounts
    pub gst: Decimal,

    /// Amount the customer paid
    pub final_total: Decimal,

    /// Combined auto + coupon discount formatted as `-$x.yz`, or `NIL`
    pub discount: String,

    /// Coupon code used, or `NIL` when no valid coupon was applied
    pub coupon: String,
}

// =============================================================================
// API inputs
// =============================================================================

/// Input for adding a plant to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    /// Catalog id of the plant to add
    pub plant_id: u32,
}

/// Input for overwriting a line's quantity
#[derive(Debug, Deserialize)]
pub struct SetQuantityInput {
    /// New quantity; zero or negative removes the line
    pub quantity: i64,
}

/// Input for checkout
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutInput {
    /// Coupon code entered by the customer, if any
    pub coupon: Option<String>,
}

/// Query parameters for the cart view
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    /// Coupon code to preview against the cart, if any
    pub coupon: Option<String>,
}

// =============================================================================
// View models
// =============================================================================

/// The automatic discount as shown on the cart page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountView {
    pub amount: Decimal,
    pub percent: u32,
    pub label: String,
}

/// A successfully applied coupon as shown on the cart page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponView {
    pub code: String,
    pub amount: Decimal,
    pub percent: u32,
}

/// The cart page view-model: lines plus the full pricing breakdown
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,

    /// Total quantity across all lines (the sidebar cart badge)
    pub item_count: u32,

    pub subtotal: Decimal,

    /// Present only when a tier qualified
    pub auto_discount: Option<DiscountView>,

    /// Present only when the supplied code was valid
    pub coupon: Option<CouponView>,

    /// True when a code was supplied but not found in the coupon table.
    /// Distinct from no code supplied at all.
    pub coupon_invalid: bool,

    pub gst: Decimal,
    pub total: Decimal,
}

/// Response for adding an item
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemResponse {
    /// Transient confirmation, e.g. "Added Sunflower to cart!"
    pub message: String,

    /// The updated cart
    pub cart: CartView,
}

/// Response for the order history page
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// All orders for the session, ascending by id
    pub orders: Vec<Order>,
}
