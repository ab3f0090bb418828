//! # Pile Height Optimization
//!
//! What-if sweep over pile height: lower the pile step by step and report
//! how much pile yarn (and money) each reduction would save against the
//! current quality.
//!
//! Row `i` uses `height = baseline − i × step` for `i = 0 ..= step_count`.
//! The sweep stops at the first height that would be zero or negative; that
//! row and all later ones are dropped without error. Row 0 reproduces the
//! baseline and always shows zero savings.
//!
//! ## Example
//!
//! ```rust
//! use loom_core::calculations::optimization::{simulate, OptimizationInput};
//! use loom_core::calculations::pile::PileInput;
//!
//! let input = OptimizationInput {
//!     pile: PileInput {
//!         dtex: 1667.0,
//!         reed_per_m: 600,
//!         pick_per_m: 700,
//!         pile_height_mm: 8.0,
//!         binding_mm: 1.5,
//!         waste_fraction: 0.10,
//!         high_bulk_factor: 1.12,
//!     },
//!     width_m: 4.0,
//!     length_m: 5000.0,
//!     pile_price_per_kg: 85.0,
//!     step_mm: 1.0,
//!     step_count: 5,
//! };
//!
//! let rows = simulate(&input).unwrap();
//! assert_eq!(rows.len(), 6);
//! assert_eq!(rows[0].savings_kg, 0.0);
//! assert!(rows[5].savings_money > rows[1].savings_money);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::pile::{self, PileInput};
use crate::constants::round_to;
use crate::errors::{CalcError, CalcResult};

/// Input parameters for a pile-height sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationInput {
    /// Current pile quality; its height is the sweep's starting point
    pub pile: PileInput,

    /// Carpet width (m)
    pub width_m: f64,

    /// Total length to weave (m)
    pub length_m: f64,

    /// Pile yarn price (currency/kg)
    pub pile_price_per_kg: f64,

    /// Height reduction per step (mm)
    pub step_mm: f64,

    /// Number of reductions to try after the baseline row
    pub step_count: u32,
}

impl OptimizationInput {
    /// Validate sweep parameters. Pile parameters are checked by the pile
    /// calculator on every row.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.step_mm.is_finite() || self.step_mm <= 0.0 {
            return Err(CalcError::invalid_argument(
                "step_mm",
                self.step_mm.to_string(),
                "Step size must be positive",
            ));
        }
        if !self.width_m.is_finite() || self.width_m <= 0.0 {
            return Err(CalcError::invalid_argument(
                "width_m",
                self.width_m.to_string(),
                "Width must be positive",
            ));
        }
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(CalcError::invalid_argument(
                "length_m",
                self.length_m.to_string(),
                "Length must be positive",
            ));
        }
        if !self.pile_price_per_kg.is_finite() {
            return Err(CalcError::invalid_argument(
                "pile_price_per_kg",
                self.pile_price_per_kg.to_string(),
                "Price must be a finite number",
            ));
        }
        Ok(())
    }

    /// Woven area of the run (m²)
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.length_m
    }
}

/// One point of the pile-height sweep.
///
/// ## JSON Example
///
/// ```json
/// {
///   "pile_height_mm": 7.0,
///   "kg_per_m2": 1.3370,
///   "total_kg": 26740.0,
///   "savings_kg": 3450.0,
///   "savings_money": 293250.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRow {
    /// Candidate pile height (mm)
    pub pile_height_mm: f64,

    /// Pile consumption at this height (kg/m²)
    pub kg_per_m2: f64,

    /// Pile consumption over the full area (kg)
    pub total_kg: f64,

    /// Yarn saved against the baseline height (kg)
    pub savings_kg: f64,

    /// savings_kg × pile price
    pub savings_money: f64,
}

/// Run the pile-height sweep.
///
/// Rows come back in decreasing height order.
pub fn simulate(input: &OptimizationInput) -> CalcResult<Vec<OptimizationRow>> {
    input.validate()?;

    let area_m2 = input.area_m2();
    let baseline_total = pile::calculate(&input.pile)? * area_m2;
    let baseline_height = input.pile.pile_height_mm;

    // Grows with the rows actually emitted; step_count may be far larger
    let mut rows = Vec::new();
    for i in 0..=input.step_count {
        // i × step rather than repeated subtraction, so error does not accumulate
        let height = baseline_height - f64::from(i) * input.step_mm;
        if height <= 0.0 {
            tracing::debug!(
                step = i,
                height_mm = height,
                "pile height sweep reached zero, truncating"
            );
            break;
        }

        let kg_per_m2 = pile::calculate(&input.pile.with_pile_height(height))?;
        let total_kg = kg_per_m2 * area_m2;
        let savings_kg = round_to(baseline_total - total_kg, 2);

        rows.push(OptimizationRow {
            pile_height_mm: height,
            kg_per_m2,
            total_kg: round_to(total_kg, 2),
            savings_kg,
            savings_money: round_to(savings_kg * input.pile_price_per_kg, 2),
        });
    }

    tracing::debug!(rows = rows.len(), "pile height sweep complete");
    Ok(rows)
}
