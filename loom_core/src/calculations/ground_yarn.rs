//! # Weft and Warp (Ground Yarn) Consumption
//!
//! Total mass of the yarns forming the carpet backing. Both follow the same
//! structure and only differ in which density runs through them:
//!
//! ```text
//! weft:  length_m = pick_per_m × run_length_m × width_m
//! warp:  length_m = reed_per_m × width_m × run_length_m
//! kg    = length_m / (Nm × 1000) × (1 + waste)
//! ```
//!
//! Results are rounded to 2 decimals (kg).

use serde::{Deserialize, Serialize};

use crate::constants::round_to;
use crate::errors::{CalcError, CalcResult};

/// Input parameters for a ground yarn (weft or warp) calculation.
///
/// `density_per_m` is picks per metre for weft, ends per metre for warp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundYarnInput {
    /// Picks/m (weft) or ends/m (warp)
    pub density_per_m: u32,

    /// Carpet width on the loom (m)
    pub width_m: f64,

    /// Total length to weave (m)
    pub length_m: f64,

    /// Yarn metric count (Nm)
    pub count_nm: f64,

    /// Fractional production loss
    pub waste_fraction: f64,
}

impl GroundYarnInput {
    /// Validate input parameters. `count_field` names the count in errors.
    fn validate(&self, count_field: &str) -> CalcResult<()> {
        if !self.count_nm.is_finite() || self.count_nm <= 0.0 {
            return Err(CalcError::invalid_argument(
                count_field,
                self.count_nm.to_string(),
                "Yarn count must be positive",
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
        Ok(())
    }

    /// Total yarn length laid into the fabric (m)
    pub fn yarn_length_m(&self) -> f64 {
        f64::from(self.density_per_m) * self.length_m * self.width_m
    }

    fn mass_kg(&self) -> f64 {
        let kg = self.yarn_length_m() / (self.count_nm * 1000.0) * (1.0 + self.waste_fraction);
        round_to(kg, 2)
    }
}

/// Weft yarn mass in kg. `density_per_m` is the pick density.
pub fn calculate_weft(input: &GroundYarnInput) -> CalcResult<f64> {
    input.validate("weft_nm")?;
    Ok(input.mass_kg())
}

/// Warp yarn mass in kg. `density_per_m` is the reed density.
pub fn calculate_warp(input: &GroundYarnInput) -> CalcResult<f64> {
    input.validate("warp_nm")?;
    Ok(input.mass_kg())
}
