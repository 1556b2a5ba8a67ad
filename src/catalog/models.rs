//! Catalog Domain Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Size category of a plant. The automatic quantity discount is tiered on
/// this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantSize {
    Small,
    Medium,
    Big,
}

impl PlantSize {
    /// Parses the lowercase form used in seed data and query strings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "big" => Some(Self::Big),
            _ => None,
        }
    }
}

/// A purchasable plant from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Unique catalog identifier
    pub id: u32,

    /// Display name of the plant
    pub name: String,

    /// Short marketing description
    pub description: String,

    /// Unit price. Cart lines snapshot this at add-time.
    pub price: Decimal,

    /// Size category used by the tiered discount
    pub size: PlantSize,

    /// Display color, lowercase
    pub color: String,

    /// Image URI for the product card
    pub image: String,
}

/// A percent-off coupon. The coupon table keys these by uppercase code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Percent taken off the amount the coupon is applied to (0-100)
    pub discount_percent: u32,

    /// Human-readable description shown alongside the code
    pub description: String,
}
