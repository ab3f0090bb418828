//! # Creel Planning
//!
//! Bobbin layout on the creel (yarn-feeder rack) for face-to-face weaving.
//!
//! ```text
//! total_ends        = floor(reed_per_m × width_m)
//! ends_per_color    = total_ends / colors
//! bobbins_per_color = ceil(ends_per_color)
//! total_bobbins     = bobbins_per_color × colors × 2
//! ```
//!
//! The factor 2 accounts for the two carpet faces woven at once: each face
//! draws its own set of pile ends from the creel.
//!
//! ## Example
//!
//! ```rust
//! use loom_core::calculations::creel::{calculate, CreelInput};
//!
//! let plan = calculate(&CreelInput {
//!     reed_per_m: 600,
//!     width_m: 4.0,
//!     color_count: 8,
//!     creel_capacity: 8000,
//! }).unwrap();
//!
//! assert_eq!(plan.total_ends, 2400);
//! assert_eq!(plan.bobbins_per_color, 300);
//! assert_eq!(plan.total_bobbins, 4800);
//! assert!(!plan.capacity_exceeded);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::round_to;
use crate::errors::{CalcError, CalcResult};

/// Faces woven simultaneously on a face-to-face loom
pub const FACES_PER_RUN: u64 = 2;

/// Input parameters for creel planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreelInput {
    /// Reed density (ends/m)
    pub reed_per_m: u32,

    /// Carpet width on the loom (m)
    pub width_m: f64,

    /// Number of pile colors in the design
    pub color_count: u32,

    /// Bobbin positions available on the creel
    pub creel_capacity: u32,
}

impl CreelInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.color_count == 0 {
            return Err(CalcError::invalid_argument(
                "color_count",
                "0",
                "At least one color is required",
            ));
        }
        if self.creel_capacity == 0 {
            return Err(CalcError::invalid_argument(
                "creel_capacity",
                "0",
                "Creel capacity must be positive",
            ));
        }
        if !self.width_m.is_finite() || self.width_m <= 0.0 {
            return Err(CalcError::invalid_argument(
                "width_m",
                self.width_m.to_string(),
                "Width must be positive",
            ));
        }
        Ok(())
    }
}

/// Bobbin layout on the creel.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_ends": 2400,
///   "ends_per_color": 300.0,
///   "bobbins_per_color": 300,
///   "total_bobbins": 4800,
///   "creel_capacity": 8000,
///   "capacity_exceeded": false,
///   "utilization": 0.6
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreelPlan {
    /// Warp ends across the full width
    pub total_ends: u64,

    /// Ends per color at full precision (see [`CreelPlan::ends_per_color_display`])
    pub ends_per_color: f64,

    /// Bobbins needed per color for one face
    pub bobbins_per_color: u64,

    /// Bobbins for all colors and both faces
    pub total_bobbins: u64,

    /// Bobbin positions on the creel the plan was made for
    pub creel_capacity: u32,

    /// True when the plan needs more bobbins than the creel holds
    pub capacity_exceeded: bool,

    /// total_bobbins / capacity (4 decimals); above 1.0 when exceeded
    pub utilization: f64,
}

impl CreelPlan {
    /// Ends per color rounded to 1 decimal for reports
    pub fn ends_per_color_display(&self) -> f64 {
        round_to(self.ends_per_color, 1)
    }

    /// Bobbin positions left free on the creel, zero when exceeded
    pub fn free_positions(&self) -> u64 {
        u64::from(self.creel_capacity).saturating_sub(self.total_bobbins)
    }
}

/// Calculate the creel plan.
pub fn calculate(input: &CreelInput) -> CalcResult<CreelPlan> {
    input.validate()?;

    // Truncation: a partial end at the selvedge is not threaded
    let total_ends = (f64::from(input.reed_per_m) * input.width_m).floor() as u64;
    let colors = u64::from(input.color_count);
    let ends_per_color = total_ends as f64 / colors as f64;
    let bobbins_per_color = total_ends.div_ceil(colors);
    let total_bobbins = bobbins_per_color
        .checked_mul(colors)
        .and_then(|n| n.checked_mul(FACES_PER_RUN))
        .ok_or_else(|| {
            CalcError::invalid_argument(
                "width_m",
                input.width_m.to_string(),
                "Width gives more bobbins than can be counted",
            )
        })?;
    let capacity = u64::from(input.creel_capacity);

    Ok(CreelPlan {
        total_ends,
        ends_per_color,
        bobbins_per_color,
        total_bobbins,
        creel_capacity: input.creel_capacity,
        capacity_exceeded: total_bobbins > capacity,
        utilization: round_to(total_bobbins as f64 / capacity as f64, 4),
    })
}
