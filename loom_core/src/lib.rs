//! # loom_core - Carpet Production Calculation Engine
//!
//! `loom_core` estimates raw-material consumption, production time, creel
//! layout and cost for face-to-face woven acrylic carpet from machine and
//! yarn parameters. All inputs and outputs are JSON-serializable so any
//! front end (dashboard, CLI, service) can drive it with plain records.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All records implement Serialize/Deserialize
//! - **Rich Errors**: Every failure names the offending field and value
//! - **Self-validating**: Each calculator checks its own inputs and can be used alone
//!
//! ## Quick Start
//!
//! ```rust
//! use loom_core::{orchestrate, ProductionInputs};
//!
//! let inputs = ProductionInputs {
//!     pile_height_mm: 7.0,
//!     ..Default::default()
//! };
//!
//! let results = orchestrate(&inputs).unwrap();
//! println!("Pile: {:.4} kg/m²", results.pile_kg_per_m2);
//! println!("Cost: {:.2} per m²", results.cost.cost_per_m2);
//! ```
//!
//! ## Modules
//!
//! - [`production`] - Input/result records and the orchestrator
//! - [`calculations`] - Individual calculators (pile, weft/warp, time, creel, cost, sweep)
//! - [`units`] - dtex / Nm / Ne conversions
//! - [`constants`] - Named calibration constants
//! - [`settings`] - Front-end defaults
//! - [`errors`] - Structured error type

pub mod calculations;
pub mod constants;
pub mod errors;
pub mod production;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use production::{orchestrate, CalculationResults, ProductionInputs, YarnShares};
pub use settings::PlannerSettings;
pub use units::{resolve_linear_count, LinearCount, YarnUnit};
