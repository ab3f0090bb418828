//! # Planner Settings
//!
//! Front-end defaults that are not part of a production run itself: how the
//! pile-height sweep is laid out and which markup seeds the margin preview.
//! Settings parse from JSON strings; reading the file is up to the caller.
//!
//! ## Example
//!
//! ```rust
//! use loom_core::settings::PlannerSettings;
//!
//! let settings = PlannerSettings::from_json_str(r#"{ "optimization_step_mm": 0.5 }"#).unwrap();
//! assert_eq!(settings.optimization_step_mm, 0.5);
//! assert_eq!(settings.optimization_steps, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Defaults for the optimization sweep and margin preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Pile height reduction per sweep step (mm)
    pub optimization_step_mm: f64,

    /// Sweep steps after the baseline row
    pub optimization_steps: u32,

    /// Suggested sale price as a multiple of cost/m²
    pub sale_markup: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            optimization_step_mm: 1.0,
            optimization_steps: 5,
            sale_markup: 1.3,
        }
    }
}

impl PlannerSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: PlannerSettings = serde_json::from_str(json).map_err(|e| {
            CalcError::invalid_argument("settings", json.chars().take(80).collect::<String>(), e.to_string())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.optimization_step_mm.is_finite() || self.optimization_step_mm <= 0.0 {
            return Err(CalcError::invalid_argument(
                "optimization_step_mm",
                self.optimization_step_mm.to_string(),
                "Step size must be positive",
            ));
        }
        if !self.sale_markup.is_finite() || self.sale_markup < 0.0 {
            return Err(CalcError::invalid_argument(
                "sale_markup",
                self.sale_markup.to_string(),
                "Markup cannot be negative",
            ));
        }
        Ok(())
    }

    /// Suggested sale price per m², whole currency units
    pub fn suggested_sale_price(&self, cost_per_m2: f64) -> f64 {
        (cost_per_m2 * self.sale_markup).round()
    }
}
