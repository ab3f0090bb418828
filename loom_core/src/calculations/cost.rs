//! # Yarn Cost
//!
//! Material cost of a production run from the three yarn masses and their
//! unit prices, plus a margin preview against a sale price per m².
//!
//! Negative unit prices are clamped to zero before multiplying, not
//! rejected. The only failure is a non-positive area.
//!
//! ## Example
//!
//! ```rust
//! use loom_core::calculations::cost::{calculate, CostInput};
//!
//! let cost = calculate(&CostInput {
//!     pile_kg: 1000.0,
//!     weft_kg: 200.0,
//!     warp_kg: 150.0,
//!     pile_price_per_kg: 85.0,
//!     weft_price_per_kg: 35.0,
//!     warp_price_per_kg: 40.0,
//!     area_m2: 20_000.0,
//! }).unwrap();
//!
//! assert_eq!(cost.total, 98_500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::round_to;
use crate::errors::{CalcError, CalcResult};

/// Input parameters for the cost calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    /// Pile yarn mass (kg)
    pub pile_kg: f64,
    /// Weft yarn mass (kg)
    pub weft_kg: f64,
    /// Warp yarn mass (kg)
    pub warp_kg: f64,
    /// Pile yarn price (currency/kg), clamped to ≥ 0
    pub pile_price_per_kg: f64,
    /// Weft yarn price (currency/kg), clamped to ≥ 0
    pub weft_price_per_kg: f64,
    /// Warp yarn price (currency/kg), clamped to ≥ 0
    pub warp_price_per_kg: f64,
    /// Woven area (m²)
    pub area_m2: f64,
}

impl CostInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(CalcError::invalid_argument(
                "area_m2",
                self.area_m2.to_string(),
                "Area must be positive",
            ));
        }
        Ok(())
    }
}

/// Cost breakdown for a production run. All amounts rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub pile_cost: f64,
    pub weft_cost: f64,
    pub warp_cost: f64,
    pub total: f64,
    pub cost_per_m2: f64,
}

/// Calculate yarn cost.
pub fn calculate(input: &CostInput) -> CalcResult<CostResult> {
    input.validate()?;

    let pile_cost = input.pile_kg * input.pile_price_per_kg.max(0.0);
    let weft_cost = input.weft_kg * input.weft_price_per_kg.max(0.0);
    let warp_cost = input.warp_kg * input.warp_price_per_kg.max(0.0);
    let total = pile_cost + weft_cost + warp_cost;

    Ok(CostResult {
        pile_cost: round_to(pile_cost, 2),
        weft_cost: round_to(weft_cost, 2),
        warp_cost: round_to(warp_cost, 2),
        total: round_to(total, 2),
        cost_per_m2: round_to(total / input.area_m2, 2),
    })
}

/// Revenue and profit at a given sale price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginResult {
    /// Sale price used for the preview (currency/m²)
    pub sale_price_per_m2: f64,
    /// sale_price × area
    pub revenue: f64,
    /// revenue - total cost
    pub profit: f64,
    /// profit / revenue in percent (0 when revenue is 0)
    pub margin_pct: f64,
}

/// Preview revenue, profit and margin for a sale price per m².
pub fn calculate_margin(cost: &CostResult, area_m2: f64, sale_price_per_m2: f64) -> CalcResult<MarginResult> {
    if !area_m2.is_finite() || area_m2 <= 0.0 {
        return Err(CalcError::invalid_argument(
            "area_m2",
            area_m2.to_string(),
            "Area must be positive",
        ));
    }
    if !sale_price_per_m2.is_finite() || sale_price_per_m2 < 0.0 {
        return Err(CalcError::invalid_argument(
            "sale_price_per_m2",
            sale_price_per_m2.to_string(),
            "Sale price cannot be negative",
        ));
    }

    let revenue = sale_price_per_m2 * area_m2;
    let profit = revenue - cost.total;
    let margin_pct = if revenue > 0.0 { profit / revenue * 100.0 } else { 0.0 };

    Ok(MarginResult {
        sale_price_per_m2,
        revenue: round_to(revenue, 2),
        profit: round_to(profit, 2),
        margin_pct: round_to(margin_pct, 1),
    })
}
