//! # Pricing
//!
//! Turns project totals and a table of unit prices into a cost breakdown.
//!
//! The price table is supplied by the caller on every call; the engine never
//! holds prices of its own. Only the six purchased materials (I, E, F, J, K,
//! L) can be priced. A material missing from the table costs nothing.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::room::{calculate, RoomDimensions};
//! use calc_core::materials::Material;
//! use calc_core::pricing::{price_breakdown, PriceTable};
//!
//! let totals = calculate(&RoomDimensions::new(400.0, 300.0, 20.0)).unwrap();
//!
//! let mut prices = PriceTable::new();
//! prices.set_price(Material::Board, 30.0).unwrap();
//! prices.set_price(Material::GypsumScrew, 0.05).unwrap();
//!
//! let costs = price_breakdown(&totals, &prices);
//! assert_eq!(costs.line(Material::Board).unwrap().line_cost, 120.0);
//! assert!((costs.grand_total - 136.7).abs() < 1e-9);
//! ```

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::calculations::totals::ProjectTotals;
use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;

/// Unit prices keyed by material.
///
/// Serializes as a flat map of letter codes:
///
/// ```json
/// { "I": 30.0, "E": 12.5, "K": 0.05 }
/// ```
///
/// Deserialization rejects unpriced materials (G, H) and non-finite values,
/// so a table read from storage upholds the same rules as [`PriceTable::set_price`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<Material, f64>,
}

impl PriceTable {
    /// Empty table; every material prices at 0
    pub fn new() -> Self {
        PriceTable::default()
    }

    /// Table holding an explicit 0 for every priced material
    pub fn with_defaults() -> Self {
        PriceTable {
            prices: Material::PRICED.iter().map(|m| (*m, 0.0)).collect(),
        }
    }

    /// Set the unit price of a material.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the material is never priced, or the price is not finite
    ///
    /// Negative prices are accepted; see [`PriceTable::has_negative_prices`].
    pub fn set_price(&mut self, material: Material, price: f64) -> CalcResult<()> {
        if !material.is_priced() {
            return Err(CalcError::invalid_input(
                material.code().to_string(),
                price.to_string(),
                format!("{} is not a priced material", material.display_name()),
            ));
        }
        if !price.is_finite() {
            return Err(CalcError::invalid_input(
                material.code().to_string(),
                price.to_string(),
                "Price must be a finite number",
            ));
        }
        if price < 0.0 {
            warn!(material = %material, price, "negative unit price set");
        }
        self.prices.insert(material, price);
        Ok(())
    }

    /// Builder-style [`PriceTable::set_price`]
    pub fn with_price(mut self, material: Material, price: f64) -> CalcResult<Self> {
        self.set_price(material, price)?;
        Ok(self)
    }

    /// Unit price of a material, 0 when absent
    pub fn price(&self, material: Material) -> f64 {
        self.prices.get(&material).copied().unwrap_or(0.0)
    }

    /// Remove a material's price, returning it if present
    pub fn remove(&mut self, material: Material) -> Option<f64> {
        self.prices.remove(&material)
    }

    /// Overlay another table's prices onto this one
    pub fn merge(&mut self, other: &PriceTable) {
        for (material, price) in &other.prices {
            self.prices.insert(*material, *price);
        }
    }

    /// Restore every priced material to 0
    pub fn reset(&mut self) {
        *self = PriceTable::with_defaults();
    }

    /// Whether any price is below zero.
    ///
    /// Prices should be non-negative; enforcing that is left to the caller.
    pub fn has_negative_prices(&self) -> bool {
        self.prices.values().any(|p| *p < 0.0)
    }

    /// Iterate over explicitly set prices in display order
    pub fn iter(&self) -> impl Iterator<Item = (Material, f64)> + '_ {
        self.prices.iter().map(|(m, p)| (*m, *p))
    }

    /// Number of explicitly set prices
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether no price has been set
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<'de> Deserialize<'de> for PriceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<Material, f64>::deserialize(deserializer)?;
        let mut table = PriceTable::new();
        for (material, price) in raw {
            table.set_price(material, price).map_err(D::Error::custom)?;
        }
        Ok(table)
    }
}

/// One priced material in a cost breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    /// Material being priced
    pub material: Material,
    /// Quantity from the project totals
    pub quantity: f64,
    /// Unit price (0 when the table has none)
    pub unit_price: f64,
    /// quantity × unit_price
    pub line_cost: f64,
}

/// Cost of every priced material plus the grand total.
///
/// A derived view: recompute it whenever totals or prices change.
///
/// ## JSON Example
///
/// ```json
/// {
///   "lines": [
///     { "material": "I", "quantity": 4.0, "unit_price": 30.0, "line_cost": 120.0 }
///   ],
///   "grand_total": 120.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// One line per priced material, in display order (I, E, F, J, K, L)
    pub lines: Vec<CostLine>,
    /// Sum of all line costs
    pub grand_total: f64,
}

impl CostBreakdown {
    /// Find the line for a material; `None` for unpriced materials
    pub fn line(&self, material: Material) -> Option<&CostLine> {
        self.lines.iter().find(|l| l.material == material)
    }
}

/// Price the project totals.
///
/// Hangers and the perimeter angle are skipped. Missing prices count as 0.
pub fn price_breakdown(totals: &ProjectTotals, prices: &PriceTable) -> CostBreakdown {
    let lines: Vec<CostLine> = Material::PRICED
        .iter()
        .map(|&material| {
            let quantity = totals.get(material);
            let unit_price = prices.price(material);
            CostLine {
                material,
                quantity,
                unit_price,
                line_cost: quantity * unit_price,
            }
        })
        .collect();

    let grand_total = lines.iter().fold(0.0, |acc, l| acc + l.line_cost);

    debug!(grand_total, priced = prices.len(), "computed cost breakdown");

    CostBreakdown { lines, grand_total }
}
