//! # Pile Yarn Consumption
//!
//! Mass of face (pile) yarn drawn per square metre of finished carpet.
//!
//! ## Formula
//!
//! ```text
//! loop_m  = (2 × pile_height_mm + binding_mm) / 1000
//! kg/m²   = dtex × reed × pick × loop_m × (1 + waste) × high_bulk / 10^7
//! ```
//!
//! Units: `[g/10 000 m] × [1/m] × [1/m] × [m] = g/m² / 10 000`, and a
//! further ÷ 1000 takes grams to kilograms, giving the 10^7 divisor.
//! Typical results for acrylic face-to-face qualities are 0.8 – 2.5 kg/m².
//!
//! ## Example
//!
//! ```rust
//! use loom_core::calculations::pile::{calculate, PileInput};
//!
//! let input = PileInput {
//!     dtex: 1667.0,
//!     reed_per_m: 600,
//!     pick_per_m: 700,
//!     pile_height_mm: 8.0,
//!     binding_mm: 1.5,
//!     waste_fraction: 0.10,
//!     high_bulk_factor: 1.12,
//! };
//!
//! let kg_per_m2 = calculate(&input).unwrap();
//! assert_eq!(kg_per_m2, 1.5095);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{round_to, PILE_FORMULA_DIVISOR};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for pile yarn consumption.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dtex": 1667.0,
///   "reed_per_m": 600,
///   "pick_per_m": 700,
///   "pile_height_mm": 8.0,
///   "binding_mm": 1.5,
///   "waste_fraction": 0.10,
///   "high_bulk_factor": 1.12
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PileInput {
    /// Pile yarn linear density (dtex)
    pub dtex: f64,

    /// Reed density, warp ends per metre of width
    pub reed_per_m: u32,

    /// Weft insertion density, picks per metre of length
    pub pick_per_m: u32,

    /// Pile height above the backing (mm)
    pub pile_height_mm: f64,

    /// Extra yarn length needed to bind each loop into the backing (mm)
    pub binding_mm: f64,

    /// Fractional production loss (0.10 = 10 %)
    pub waste_fraction: f64,

    /// Volume expansion of high-bulk acrylic after finishing (≥ 1.0)
    pub high_bulk_factor: f64,
}

impl PileInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.dtex.is_finite() || self.dtex <= 0.0 {
            return Err(CalcError::invalid_argument(
                "dtex",
                self.dtex.to_string(),
                "Linear density must be positive",
            ));
        }
        if self.reed_per_m == 0 {
            return Err(CalcError::invalid_argument(
                "reed_per_m",
                "0",
                "Reed density must be positive",
            ));
        }
        if self.pick_per_m == 0 {
            return Err(CalcError::invalid_argument(
                "pick_per_m",
                "0",
                "Pick density must be positive",
            ));
        }
        if !self.pile_height_mm.is_finite() || self.pile_height_mm <= 0.0 {
            return Err(CalcError::invalid_argument(
                "pile_height_mm",
                self.pile_height_mm.to_string(),
                "Pile height must be positive",
            ));
        }
        if !self.binding_mm.is_finite() || self.binding_mm < 0.0 {
            return Err(CalcError::invalid_argument(
                "binding_mm",
                self.binding_mm.to_string(),
                "Binding allowance cannot be negative",
            ));
        }
        if !self.waste_fraction.is_finite() || self.waste_fraction < 0.0 {
            return Err(CalcError::invalid_argument(
                "waste_fraction",
                self.waste_fraction.to_string(),
                "Waste fraction cannot be negative",
            ));
        }
        if !self.high_bulk_factor.is_finite() || self.high_bulk_factor < 1.0 {
            return Err(CalcError::invalid_argument(
                "high_bulk_factor",
                self.high_bulk_factor.to_string(),
                "High-bulk factor must be at least 1.0",
            ));
        }
        Ok(())
    }

    /// Yarn length in one pile loop, in metres.
    ///
    /// A loop climbs the pile height, comes back down, and is tied in by the
    /// binding allowance.
    pub fn loop_length_m(&self) -> f64 {
        (2.0 * self.pile_height_mm + self.binding_mm) / 1000.0
    }

    /// Copy of this input with a different pile height.
    pub fn with_pile_height(&self, pile_height_mm: f64) -> Self {
        PileInput {
            pile_height_mm,
            ..*self
        }
    }
}

/// Calculate pile yarn consumption in kg/m², rounded to 4 decimals.
///
/// # Returns
///
/// * `Ok(f64)` - Consumption per square metre of carpet
/// * `Err(CalcError)` - If any input is outside its valid domain
pub fn calculate(input: &PileInput) -> CalcResult<f64> {
    input.validate()?;

    let kg_per_m2 = input.dtex
        * f64::from(input.reed_per_m)
        * f64::from(input.pick_per_m)
        * input.loop_length_m()
        * (1.0 + input.waste_fraction)
        * input.high_bulk_factor
        / PILE_FORMULA_DIVISOR;

    Ok(round_to(kg_per_m2, 4))
}
