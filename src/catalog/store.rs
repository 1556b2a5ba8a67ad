//! Catalog Store
//!
//! Parses the seed JSON embedded at compile time and serves read-only
//! lookups over it: plants by id, coupons by normalized code, and the
//! size/color filtering used by the shop page.

use super::models::{Coupon, Plant, PlantSize};
use serde::Deserialize;
use std::collections::HashMap;

const PLANTS_JSON: &str = include_str!("../../assets/plants.json");
const COUPONS_JSON: &str = include_str!("../../assets/coupons.json");

#[derive(Deserialize)]
struct PlantsFile {
    plants: Vec<Plant>,
}

#[derive(Deserialize)]
struct CouponsFile {
    coupons: HashMap<String, Coupon>,
}

/// The read-only plant and coupon catalog.
pub struct Catalog {
    plants: Vec<Plant>,
    coupons: HashMap<String, Coupon>,
}

impl Catalog {
    /// Parses the embedded seed files.
    pub fn load() -> Result<Self, serde_json::Error> {
        let plants: PlantsFile = serde_json::from_str(PLANTS_JSON)?;
        let coupons: CouponsFile = serde_json::from_str(COUPONS_JSON)?;
        Ok(Self {
            plants: plants.plants,
            coupons: coupons.coupons,
        })
    }

    /// All plants, in catalog order.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Looks up a single plant by id.
    pub fn plant(&self, id: u32) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    /// Looks up a coupon, normalizing the code to uppercase first.
    pub fn coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons.get(&code.to_uppercase())
    }

    /// The full coupon table, keyed by uppercase code.
    pub fn coupons(&self) -> &HashMap<String, Coupon> {
        &self.coupons
    }

    /// Filters plants by size and color. An empty filter matches every
    /// plant; when both are given, a plant must match both.
    pub fn filter(&self, sizes: &[PlantSize], colors: &[String]) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| sizes.is_empty() || sizes.contains(&p.size))
            .filter(|p| {
                colors.is_empty() || colors.iter().any(|c| c.eq_ignore_ascii_case(&p.color))
            })
            .collect()
    }
}
