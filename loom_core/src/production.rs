//! # Production Plan
//!
//! [`ProductionInputs`] is the single record a front end fills in;
//! [`orchestrate`] runs every calculator over it and returns one
//! [`CalculationResults`] record. Nothing is cached or shared between calls.
//!
//! ## Pipeline
//!
//! ```text
//! yarn unit/value ─► (dtex, Nm)        weft Ne ─► weft Nm
//!        │
//!        ├─► pile kg/m² ─► × area ─► pile kg ─┐
//!        │   weft kg  (half waste) ───────────┼─► cost
//!        │   warp kg  (half waste) ───────────┘
//!        ├─► time
//!        └─► creel
//! ```
//!
//! ## Example
//!
//! ```rust
//! use loom_core::production::{orchestrate, ProductionInputs};
//!
//! let inputs = ProductionInputs::default();
//! let results = orchestrate(&inputs).unwrap();
//!
//! assert_eq!(results.pile_kg_per_m2, 1.5095);
//! assert_eq!(results.creel.total_bobbins, 4800);
//! println!("{}", serde_json::to_string_pretty(&results).unwrap());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{
    cost, creel, ground_yarn, pile, time, CostInput, CostResult, CreelInput, CreelPlan,
    GroundYarnInput, OptimizationInput, PileInput, TimeInput, TimeResult,
};
use crate::constants::{round_to, SUBSIDIARY_WASTE_RATIO, WASTE_MAX};
use crate::errors::CalcResult;
use crate::units::{ne_to_nm, LinearCount, YarnUnit};

/// All machine, yarn and price parameters of one production run.
///
/// Fields are not checked on construction; each calculator validates the
/// fields it uses when [`orchestrate`] runs.
///
/// ## JSON Example
///
/// ```json
/// {
///   "reed_per_m": 600,
///   "pick_per_m": 700,
///   "pile_height_mm": 8.0,
///   "binding_mm": 1.5,
///   "waste_fraction": 0.10,
///   "high_bulk_factor": 1.12,
///   "yarn_unit": "dtex",
///   "yarn_value": 1667.0,
///   "weft_ne": 8.0,
///   "warp_nm": 10.0,
///   "width_m": 4.0,
///   "length_m": 5000.0,
///   "speed_rpm": 300,
///   "efficiency_pct": 80.0,
///   "creel_capacity": 8000,
///   "color_count": 8,
///   "pile_price_per_kg": 85.0,
///   "weft_price_per_kg": 35.0,
///   "warp_price_per_kg": 40.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionInputs {
    /// Reed density (warp ends/m)
    pub reed_per_m: u32,

    /// Weft insertion density (picks/m)
    pub pick_per_m: u32,

    /// Pile height (mm)
    pub pile_height_mm: f64,

    /// Binding allowance per loop (mm)
    pub binding_mm: f64,

    /// Pile waste fraction; weft and warp use half of it
    pub waste_fraction: f64,

    /// High-bulk expansion factor of the pile yarn
    pub high_bulk_factor: f64,

    /// Unit of `yarn_value`
    pub yarn_unit: YarnUnit,

    /// Pile yarn count in `yarn_unit`
    pub yarn_value: f64,

    /// Weft yarn count (Ne, English cotton system)
    pub weft_ne: f64,

    /// Warp yarn count (Nm, metric system)
    pub warp_nm: f64,

    /// Carpet / machine width (m)
    pub width_m: f64,

    /// Total length to weave (m)
    pub length_m: f64,

    /// Machine speed (rev/min)
    pub speed_rpm: u32,

    /// Expected efficiency (%)
    pub efficiency_pct: f64,

    /// Creel capacity (bobbin positions)
    pub creel_capacity: u32,

    /// Number of pile colors
    pub color_count: u32,

    /// Pile yarn price (currency/kg)
    pub pile_price_per_kg: f64,

    /// Weft yarn price (currency/kg)
    pub weft_price_per_kg: f64,

    /// Warp yarn price (currency/kg)
    pub warp_price_per_kg: f64,
}

impl Default for ProductionInputs {
    fn default() -> Self {
        ProductionInputs {
            reed_per_m: 600,
            pick_per_m: 700,
            pile_height_mm: 8.0,
            binding_mm: 1.5,
            waste_fraction: 0.10,
            high_bulk_factor: 1.12,
            yarn_unit: YarnUnit::Dtex,
            yarn_value: 1667.0,
            weft_ne: 8.0,
            warp_nm: 10.0,
            width_m: 4.0,
            length_m: 5000.0,
            speed_rpm: 300,
            efficiency_pct: 80.0,
            creel_capacity: 8000,
            color_count: 8,
            pile_price_per_kg: 85.0,
            weft_price_per_kg: 35.0,
            warp_price_per_kg: 40.0,
        }
    }
}

impl ProductionInputs {
    /// Check every field by running the full calculation.
    ///
    /// Only step-level `debug!` events are emitted; the waste and creel
    /// warnings and the summary are left to [`orchestrate`].
    pub fn validate(&self) -> CalcResult<()> {
        calculate_all(self).map(|_| ())
    }

    /// Pile yarn count in both dtex and Nm
    pub fn linear_count(&self) -> CalcResult<LinearCount> {
        self.yarn_unit.resolve(self.yarn_value)
    }

    /// Woven area (m²)
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.length_m
    }

    /// Waste fraction applied to weft and warp
    pub fn subsidiary_waste_fraction(&self) -> f64 {
        self.waste_fraction * SUBSIDIARY_WASTE_RATIO
    }

    /// Pile calculator input for this run at a resolved dtex.
    pub fn pile_input(&self, dtex: f64) -> PileInput {
        PileInput {
            dtex,
            reed_per_m: self.reed_per_m,
            pick_per_m: self.pick_per_m,
            pile_height_mm: self.pile_height_mm,
            binding_mm: self.binding_mm,
            waste_fraction: self.waste_fraction,
            high_bulk_factor: self.high_bulk_factor,
        }
    }

    /// Pile-height sweep input for this run.
    pub fn optimization_input(&self, step_mm: f64, step_count: u32) -> CalcResult<OptimizationInput> {
        let count = self.linear_count()?;
        Ok(OptimizationInput {
            pile: self.pile_input(count.dtex),
            width_m: self.width_m,
            length_m: self.length_m,
            pile_price_per_kg: self.pile_price_per_kg,
            step_mm,
            step_count,
        })
    }
}

/// Everything derived from one [`ProductionInputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    /// Pile yarn count, dtex (2 decimals)
    pub dtex: f64,

    /// Pile yarn count, Nm (3 decimals)
    pub nm: f64,

    /// Weft yarn count converted to Nm (3 decimals)
    pub weft_nm: f64,

    /// Pile consumption (kg/m², 4 decimals)
    pub pile_kg_per_m2: f64,

    /// Pile yarn over the whole run (kg)
    pub total_pile_kg: f64,

    /// Weft yarn over the whole run (kg)
    pub total_weft_kg: f64,

    /// Warp yarn over the whole run (kg)
    pub total_warp_kg: f64,

    /// Pile + weft + warp (kg)
    pub total_yarn_kg: f64,

    /// Woven area (m²)
    pub area_m2: f64,

    pub time: TimeResult,

    pub creel: CreelPlan,

    pub cost: CostResult,
}

/// Share of each yarn in the combined mass, in percent (1 decimal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YarnShares {
    pub pile_pct: f64,
    pub weft_pct: f64,
    pub warp_pct: f64,
}

impl CalculationResults {
    /// Mass shares of pile, weft and warp; all zero when nothing is consumed.
    pub fn yarn_shares(&self) -> YarnShares {
        if self.total_yarn_kg <= 0.0 {
            return YarnShares {
                pile_pct: 0.0,
                weft_pct: 0.0,
                warp_pct: 0.0,
            };
        }
        let pct = |kg: f64| round_to(kg / self.total_yarn_kg * 100.0, 1);
        YarnShares {
            pile_pct: pct(self.total_pile_kg),
            weft_pct: pct(self.total_weft_kg),
            warp_pct: pct(self.total_warp_kg),
        }
    }
}

/// Run every calculation for one production run.
///
/// The first failing calculator's error is returned unchanged; no partial
/// result is produced.
pub fn orchestrate(inputs: &ProductionInputs) -> CalcResult<CalculationResults> {
    let span = tracing::debug_span!("orchestrate", width_m = inputs.width_m, length_m = inputs.length_m);
    let _guard = span.enter();

    if inputs.waste_fraction > WASTE_MAX {
        tracing::warn!(
            waste_fraction = inputs.waste_fraction,
            max = WASTE_MAX,
            "waste fraction above recommended maximum"
        );
    }

    let results = calculate_all(inputs)?;

    if results.creel.capacity_exceeded {
        tracing::warn!(
            total_bobbins = results.creel.total_bobbins,
            capacity = inputs.creel_capacity,
            "creel capacity exceeded"
        );
    }

    tracing::info!(
        total_yarn_kg = results.total_yarn_kg,
        cost_per_m2 = results.cost.cost_per_m2,
        hours = results.time.hours,
        "production plan calculated"
    );

    Ok(results)
}

fn calculate_all(inputs: &ProductionInputs) -> CalcResult<CalculationResults> {
    tracing::debug!("Step 1: resolve yarn counts");
    let count = inputs.linear_count()?;
    let weft_nm = ne_to_nm(inputs.weft_ne)?;
    let area_m2 = inputs.area_m2();
    let ground_waste = inputs.subsidiary_waste_fraction();

    tracing::debug!(dtex = count.dtex, "Step 2: pile consumption");
    let pile_kg_per_m2 = pile::calculate(&inputs.pile_input(count.dtex))?;
    let total_pile_kg = round_to(pile_kg_per_m2 * area_m2, 2);

    tracing::debug!(waste = ground_waste, "Step 3: weft and warp");
    let total_weft_kg = ground_yarn::calculate_weft(&GroundYarnInput {
        density_per_m: inputs.pick_per_m,
        width_m: inputs.width_m,
        length_m: inputs.length_m,
        count_nm: weft_nm,
        waste_fraction: ground_waste,
    })?;
    let total_warp_kg = ground_yarn::calculate_warp(&GroundYarnInput {
        density_per_m: inputs.reed_per_m,
        width_m: inputs.width_m,
        length_m: inputs.length_m,
        count_nm: inputs.warp_nm,
        waste_fraction: ground_waste,
    })?;
    let total_yarn_kg = round_to(total_pile_kg + total_weft_kg + total_warp_kg, 2);

    tracing::debug!("Step 4: time, creel and cost");
    let time = time::calculate(&TimeInput {
        length_m: inputs.length_m,
        pick_per_m: inputs.pick_per_m,
        speed_rpm: inputs.speed_rpm,
        efficiency_pct: inputs.efficiency_pct,
    })?;
    let creel = creel::calculate(&CreelInput {
        reed_per_m: inputs.reed_per_m,
        width_m: inputs.width_m,
        color_count: inputs.color_count,
        creel_capacity: inputs.creel_capacity,
    })?;
    let cost = cost::calculate(&CostInput {
        pile_kg: total_pile_kg,
        weft_kg: total_weft_kg,
        warp_kg: total_warp_kg,
        pile_price_per_kg: inputs.pile_price_per_kg,
        weft_price_per_kg: inputs.weft_price_per_kg,
        warp_price_per_kg: inputs.warp_price_per_kg,
        area_m2,
    })?;

    Ok(CalculationResults {
        dtex: round_to(count.dtex, 2),
        nm: round_to(count.nm, 3),
        weft_nm: round_to(weft_nm, 3),
        pile_kg_per_m2,
        total_pile_kg,
        total_weft_kg,
        total_warp_kg,
        total_yarn_kg,
        area_m2: round_to(area_m2, 2),
        time,
        creel,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::optimization;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use crate::errors::CalcError;

    #[test]
    fn test_reference_run() {
        let results = orchestrate(&ProductionInputs::default()).unwrap();

        assert_eq!(results.dtex, 1667.0);
        assert!((results.nm - 5.999).abs() < 1e-9);
        // 8 Ne × 1.6535 = 13.228 Nm
        assert!((results.weft_nm - 13.228).abs() < 1e-9);
        assert_eq!(results.area_m2, 20_000.0);

        assert_eq!(results.pile_kg_per_m2, 1.5095);
        assert!((results.total_pile_kg - 30_190.0).abs() < 1e-6);
        // 14e6 m / 13 228 × 1.05
        assert!((results.total_weft_kg - 1111.28).abs() < 0.01);
        // 12e6 m / 10 000 × 1.05
        assert!((results.total_warp_kg - 1260.0).abs() < 1e-6);
        let sum = results.total_pile_kg + results.total_weft_kg + results.total_warp_kg;
        assert!((results.total_yarn_kg - sum).abs() < 0.01);
    }

    #[test]
    fn test_sub_results_match_direct_calls() {
        let inputs = ProductionInputs::default();
        let results = orchestrate(&inputs).unwrap();

        let creel = creel::calculate(&CreelInput {
            reed_per_m: 600,
            width_m: 4.0,
            color_count: 8,
            creel_capacity: 8000,
        })
        .unwrap();
        assert_eq!(results.creel, creel);
        assert_eq!(results.creel.total_bobbins, 4800);

        let time = time::calculate(&TimeInput {
            length_m: 5000.0,
            pick_per_m: 700,
            speed_rpm: 300,
            efficiency_pct: 80.0,
        })
        .unwrap();
        assert_eq!(results.time, time);
    }

    #[test]
    fn test_cost_uses_rounded_totals() {
        let results = orchestrate(&ProductionInputs::default()).unwrap();
        let expected_pile = results.total_pile_kg * 85.0;
        assert!((results.cost.pile_cost - expected_pile).abs() < 0.01);
        let expected_total =
            expected_pile + results.total_weft_kg * 35.0 + results.total_warp_kg * 40.0;
        assert!((results.cost.total - expected_total).abs() < 0.01);
        assert!((results.cost.cost_per_m2 - expected_total / 20_000.0).abs() < 0.01);
    }

    #[test]
    fn test_ground_yarns_use_half_waste() {
        let inputs = ProductionInputs { waste_fraction: 0.20, ..Default::default() };
        let results = orchestrate(&inputs).unwrap();
        // warp: 1200 kg × (1 + 0.10)
        assert!((results.total_warp_kg - 1320.0).abs() < 1e-6);
        assert!((inputs.subsidiary_waste_fraction() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_nm_input_matches_dtex_input() {
        let by_dtex = orchestrate(&ProductionInputs {
            yarn_unit: YarnUnit::Dtex,
            yarn_value: 2000.0,
            ..Default::default()
        })
        .unwrap();
        let by_nm = orchestrate(&ProductionInputs {
            yarn_unit: YarnUnit::Nm,
            yarn_value: 5.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(by_dtex.pile_kg_per_m2, by_nm.pile_kg_per_m2);
        assert!((by_dtex.dtex * by_dtex.nm - 10_000.0).abs() < 1.0);
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let cases = [
            (ProductionInputs { yarn_value: 0.0, ..Default::default() }, "dtex"),
            (ProductionInputs { weft_ne: 0.0, ..Default::default() }, "ne"),
            (ProductionInputs { high_bulk_factor: 0.9, ..Default::default() }, "high_bulk_factor"),
            (ProductionInputs { warp_nm: -1.0, ..Default::default() }, "warp_nm"),
            (ProductionInputs { efficiency_pct: 0.0, ..Default::default() }, "efficiency_pct"),
            (ProductionInputs { speed_rpm: 0, ..Default::default() }, "speed_rpm"),
            (ProductionInputs { color_count: 0, ..Default::default() }, "color_count"),
            (ProductionInputs { creel_capacity: 0, ..Default::default() }, "creel_capacity"),
        ];
        for (inputs, field) in cases {
            let err = orchestrate(&inputs).unwrap_err();
            assert!(matches!(err, CalcError::InvalidArgument { .. }));
            assert_eq!(err.field(), field, "inputs: {:?}", inputs);
            assert!(inputs.validate().is_err());
        }
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = orchestrate(&ProductionInputs { width_m: 0.0, ..Default::default() }).unwrap_err();
        assert_eq!(err.field(), "width_m");
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let cases = [
            (ProductionInputs { width_m: f64::NAN, ..Default::default() }, "width_m"),
            (ProductionInputs { length_m: f64::INFINITY, ..Default::default() }, "length_m"),
            (ProductionInputs { yarn_value: f64::NAN, ..Default::default() }, "dtex"),
            (ProductionInputs { pile_height_mm: f64::NAN, ..Default::default() }, "pile_height_mm"),
            (ProductionInputs { waste_fraction: f64::NAN, ..Default::default() }, "waste_fraction"),
            (ProductionInputs { weft_ne: f64::INFINITY, ..Default::default() }, "ne"),
            (ProductionInputs { efficiency_pct: f64::NAN, ..Default::default() }, "efficiency_pct"),
        ];
        for (inputs, field) in cases {
            let err = orchestrate(&inputs).unwrap_err();
            assert_eq!(err.field(), field, "inputs: {:?}", inputs);
        }
    }

    /// Counts INFO, WARN and ERROR events.
    struct NoticeCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for NoticeCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() <= tracing::Level::INFO {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn test_validate_emits_no_warnings_or_summary() {
        let inputs = ProductionInputs {
            waste_fraction: 0.6,
            creel_capacity: 10,
            ..Default::default()
        };

        let count = Arc::new(AtomicUsize::new(0));
        tracing::subscriber::with_default(NoticeCounter(count.clone()), || {
            assert!(inputs.validate().is_ok());
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tracing::subscriber::with_default(NoticeCounter(count.clone()), || {
            assert!(orchestrate(&inputs).is_ok());
        });
        // waste warning, creel warning, summary
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_high_waste_is_advisory_only() {
        let inputs = ProductionInputs { waste_fraction: 0.6, ..Default::default() };
        assert!(orchestrate(&inputs).is_ok());
    }

    #[test]
    fn test_negative_price_is_clamped_end_to_end() {
        let inputs = ProductionInputs { warp_price_per_kg: -40.0, ..Default::default() };
        let results = orchestrate(&inputs).unwrap();
        assert_eq!(results.cost.warp_cost, 0.0);
    }

    #[test]
    fn test_yarn_shares() {
        let results = orchestrate(&ProductionInputs::default()).unwrap();
        let shares = results.yarn_shares();
        let sum = shares.pile_pct + shares.weft_pct + shares.warp_pct;
        assert!((sum - 100.0).abs() < 0.2);
        assert!(shares.pile_pct > shares.warp_pct);
        assert!(shares.warp_pct > shares.weft_pct);
    }

    #[test]
    fn test_optimization_input_from_run() {
        let inputs = ProductionInputs { yarn_unit: YarnUnit::Nm, yarn_value: 6.0, ..Default::default() };
        let opt = inputs.optimization_input(0.5, 4).unwrap();
        assert!((opt.pile.dtex - 1666.666_666).abs() < 1e-3);
        assert_eq!(opt.step_count, 4);

        let rows = optimization::simulate(&opt).unwrap();
        let results = orchestrate(&inputs).unwrap();
        assert_eq!(rows[0].kg_per_m2, results.pile_kg_per_m2);
    }

    #[test]
    fn test_inputs_json_roundtrip() {
        let inputs = ProductionInputs::default();
        let json = serde_json::to_string_pretty(&inputs).unwrap();
        assert!(json.contains("\"yarn_unit\": \"dtex\""));
        let roundtrip: ProductionInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, roundtrip);
    }

    #[test]
    fn test_results_serialization() {
        let results = orchestrate(&ProductionInputs::default()).unwrap();
        let json = serde_json::to_string_pretty(&results).unwrap();
        assert!(json.contains("pile_kg_per_m2"));
        assert!(json.contains("total_bobbins"));
        assert!(json.contains("cost_per_m2"));
        let roundtrip: CalculationResults = serde_json::from_str(&json).unwrap();
        assert!((results.total_yarn_kg - roundtrip.total_yarn_kg).abs() < 1e-9);
        assert_eq!(results.creel.total_bobbins, roundtrip.creel.total_bobbins);
    }
}
