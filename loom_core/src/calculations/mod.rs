//! # Production Calculations
//!
//! The individual calculators behind the orchestrator. Each one follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with its own `validate()`
//! - `*Result` / plain value - Calculation output (JSON-serializable)
//! - `calculate(&input) -> CalcResult<_>` - Pure calculation function
//!
//! Every calculator checks its own inputs, so any of them can be called
//! directly without going through [`crate::production::orchestrate`].
//!
//! ## Available Calculations
//!
//! - [`pile`] - Pile (face) yarn consumption per m²
//! - [`ground_yarn`] - Weft and warp yarn mass
//! - [`time`] - Loom running time
//! - [`creel`] - Creel bobbin layout for face-to-face weaving
//! - [`cost`] - Yarn cost and margin preview
//! - [`optimization`] - Pile height what-if sweep

pub mod cost;
pub mod creel;
pub mod ground_yarn;
pub mod optimization;
pub mod pile;
pub mod time;

// Re-export commonly used types
pub use cost::{CostInput, CostResult, MarginResult};
pub use creel::{CreelInput, CreelPlan};
pub use ground_yarn::GroundYarnInput;
pub use optimization::{OptimizationInput, OptimizationRow};
pub use pile::PileInput;
pub use time::{TimeInput, TimeResult};
