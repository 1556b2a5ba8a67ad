//! Cart Pricing Engine
//!
//! Subtotal, the tiered automatic discount, coupon discounts, GST and the
//! final total, plus the checkout snapshot. The discounts stack
//! sequentially: the coupon applies to the subtotal left after the
//! automatic discount, and GST is charged on whatever remains. All money
//! stays in `Decimal` at full precision; rounding happens only when a
//! discount is formatted for an order label.

use super::models::{Cart, CartLine, Order, NIL};
use crate::catalog::{Catalog, PlantSize};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Fixed 10% GST applied to the post-discount amount.
fn gst_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn percent_of(base: Decimal, percent: u32) -> Decimal {
    base * Decimal::from(percent) / Decimal::ONE_HUNDRED
}

/// One tier of the automatic quantity discount.
pub struct AutoDiscountRule {
    pub size: PlantSize,
    pub min_quantity: u32,
    pub percent: u32,
    pub label: &'static str,
}

/// The fixed tier table. When more than one tier qualifies, the highest
/// percent wins; tiers never stack.
pub const AUTO_DISCOUNT_RULES: [AutoDiscountRule; 3] = [
    AutoDiscountRule {
        size: PlantSize::Big,
        min_quantity: 3,
        percent: 20,
        label: "3 big plants",
    },
    AutoDiscountRule {
        size: PlantSize::Medium,
        min_quantity: 4,
        percent: 15,
        label: "4 medium plants",
    },
    AutoDiscountRule {
        size: PlantSize::Small,
        min_quantity: 5,
        percent: 10,
        label: "5 small plants",
    },
];

/// Result of the automatic discount computation. Zero-valued with an
/// empty label when no tier qualifies.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoDiscount {
    pub amount: Decimal,
    pub percent: u32,
    pub label: String,
}

impl AutoDiscount {
    fn none() -> Self {
        Self {
            amount: Decimal::ZERO,
            percent: 0,
            label: String::new(),
        }
    }
}

/// A validated coupon application.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponDiscount {
    pub code: String,
    pub amount: Decimal,
    pub percent: u32,
}

/// Full pricing breakdown for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub auto_discount: AutoDiscount,
    pub coupon: Option<CouponDiscount>,
    /// A code was supplied but is not in the coupon table
    pub coupon_invalid: bool,
    pub taxable: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
}

/// Adds one unit of a plant, merging into the existing line when present.
/// Name and price are snapshots taken now. Returns the name for the
/// confirmation message.
pub fn add_item(cart: &mut Cart, plant_id: u32, name: &str, unit_price: Decimal) -> String {
    cart.entry(plant_id)
        .and_modify(|line| line.quantity += 1)
        .or_insert_with(|| CartLine {
            plant_id,
            name: name.to_string(),
            unit_price,
            quantity: 1,
        });
    name.to_string()
}

/// Removes a line; an absent id is a silent no-op.
pub fn remove_item(cart: &mut Cart, plant_id: u32) {
    cart.remove(&plant_id);
}

/// Overwrites a line's quantity. Zero or negative removes the line; a
/// line never persists at quantity 0. Absent ids are a silent no-op.
pub fn set_quantity(cart: &mut Cart, plant_id: u32, quantity: i64) {
    if quantity <= 0 {
        remove_item(cart, plant_id);
    } else if let Some(line) = cart.get_mut(&plant_id) {
        line.quantity = quantity as u32;
    }
}

/// Sum of unit price times quantity over all lines; zero for an empty
/// cart.
pub fn subtotal(cart: &Cart) -> Decimal {
    cart.values().map(CartLine::line_total).sum()
}

/// Computes the tiered automatic discount for a cart.
///
/// Quantities are totalled per size (lines whose id is missing from the
/// catalog are skipped), the qualifying tier with the highest percent is
/// chosen, and the discount is taken once against the whole subtotal,
/// never per tier.
pub fn auto_discount(cart: &Cart, catalog: &Catalog, subtotal: Decimal) -> AutoDiscount {
    if cart.is_empty() {
        return AutoDiscount::none();
    }

    let mut totals: HashMap<PlantSize, u32> = HashMap::new();
    for line in cart.values() {
        if let Some(plant) = catalog.plant(line.plant_id) {
            *totals.entry(plant.size).or_default() += line.quantity;
        }
    }

    let best = AUTO_DISCOUNT_RULES
        .iter()
        .filter(|rule| totals.get(&rule.size).copied().unwrap_or(0) >= rule.min_quantity)
        .max_by_key(|rule| rule.percent);

    match best {
        Some(rule) => AutoDiscount {
            amount: percent_of(subtotal, rule.percent),
            percent: rule.percent,
            label: rule.label.to_string(),
        },
        None => AutoDiscount::none(),
    }
}

/// Applies a coupon code to `base`. Returns `None` when the code is not
/// in the table, so the caller can tell an invalid code apart from a zero
/// discount.
pub fn apply_coupon(catalog: &Catalog, code: &str, base: Decimal) -> Option<CouponDiscount> {
    let normalized = code.trim().to_uppercase();
    let coupon = catalog.coupon(&normalized)?;
    Some(CouponDiscount {
        amount: percent_of(base, coupon.discount_percent),
        percent: coupon.discount_percent,
        code: normalized,
    })
}

/// Prices a cart end to end.
///
/// The coupon applies to the subtotal left after the automatic discount,
/// then GST is charged on the remainder. This ordering is load-bearing.
pub fn price_cart(cart: &Cart, catalog: &Catalog, coupon_code: Option<&str>) -> PricingBreakdown {
    let subtotal = subtotal(cart);
    let auto = auto_discount(cart, catalog, subtotal);

    let base_for_coupon = subtotal - auto.amount;
    let code = coupon_code.map(str::trim).filter(|c| !c.is_empty());
    let coupon = code.and_then(|c| apply_coupon(catalog, c, base_for_coupon));
    let coupon_invalid = code.is_some() && coupon.is_none();

    let coupon_amount = coupon.as_ref().map(|c| c.amount).unwrap_or(Decimal::ZERO);
    let taxable = base_for_coupon - coupon_amount;
    let gst = taxable * gst_rate();

    PricingBreakdown {
        subtotal,
        auto_discount: auto,
        coupon,
        coupon_invalid,
        taxable,
        gst,
        total: taxable + gst,
    }
}

/// Records a checkout: snapshots the cart and its pricing into a new
/// order keyed one past the highest existing id, then clears the cart.
pub fn checkout(
    cart: &mut Cart,
    history: &mut BTreeMap<u32, Order>,
    catalog: &Catalog,
    coupon_code: Option<&str>,
) -> Order {
    let pricing = price_cart(cart, catalog, coupon_code);

    let id = history.keys().max().copied().unwrap_or(0) + 1;

    let combined = pricing.auto_discount.amount
        + pricing
            .coupon
            .as_ref()
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO);
    let discount = if combined > Decimal::ZERO {
        format!("-${:.2}", combined.round_dp(2))
    } else {
        NIL.to_string()
    };
    let coupon = pricing
        .coupon
        .map(|c| c.code)
        .unwrap_or_else(|| NIL.to_string());

    let order = Order {
        id,
        items: cart.values().cloned().collect(),
        subtotal: pricing.subtotal,
        gst: pricing.gst,
        final_total: pricing.total,
        discount,
        coupon,
    };
    history.insert(id, order.clone());
    cart.clear();
    order
}
