//! Text and JSON rendering of one planning run.

use std::fmt;

use serde::Serialize;

use loom_core::calculations::{MarginResult, OptimizationRow};
use loom_core::{CalculationResults, ProductionInputs, YarnShares};

const RULE: &str = "═══════════════════════════════════════════════";

/// Everything the CLI prints for one run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub inputs: &'a ProductionInputs,
    pub results: &'a CalculationResults,
    pub yarn_shares: YarnShares,
    pub margin: &'a MarginResult,
    pub sweep: &'a [OptimizationRow],
}

impl<'a> Report<'a> {
    pub fn new(
        inputs: &'a ProductionInputs,
        results: &'a CalculationResults,
        margin: &'a MarginResult,
        sweep: &'a [OptimizationRow],
    ) -> Self {
        Report {
            inputs,
            results,
            yarn_shares: results.yarn_shares(),
            margin,
            sweep,
        }
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = self.inputs;
        let r = self.results;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "  CARPET PRODUCTION PLAN")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(f, "Input:")?;
        writeln!(f, "  Reed / Pick:  {} / {} per m", inputs.reed_per_m, inputs.pick_per_m)?;
        writeln!(f, "  Pile height:  {:.2} mm (binding {:.2} mm)", inputs.pile_height_mm, inputs.binding_mm)?;
        writeln!(f, "  Size:         {:.2} m x {:.2} m = {:.2} m²", inputs.width_m, inputs.length_m, r.area_m2)?;
        writeln!(f, "  Waste:        {:.1} %", inputs.waste_fraction * 100.0)?;
        writeln!(f)?;

        writeln!(f, "Yarn Counts:")?;
        writeln!(f, "  Pile:  {:.2} dtex = Nm {:.3}", r.dtex, r.nm)?;
        writeln!(f, "  Weft:  Ne {:.1} = Nm {:.3}", inputs.weft_ne, r.weft_nm)?;
        writeln!(f, "  Warp:  Nm {:.1}", inputs.warp_nm)?;
        writeln!(f)?;

        writeln!(f, "Consumption:")?;
        writeln!(f, "  Pile:   {:.4} kg/m²  ->  {:>10.2} kg ({:.1} %)", r.pile_kg_per_m2, r.total_pile_kg, self.yarn_shares.pile_pct)?;
        writeln!(f, "  Weft:                      {:>10.2} kg ({:.1} %)", r.total_weft_kg, self.yarn_shares.weft_pct)?;
        writeln!(f, "  Warp:                      {:>10.2} kg ({:.1} %)", r.total_warp_kg, self.yarn_shares.warp_pct)?;
        writeln!(f, "  Total:                     {:>10.2} kg", r.total_yarn_kg)?;
        writeln!(f)?;

        writeln!(f, "Time:")?;
        writeln!(f, "  Running:       {:.1} min = {:.2} h", r.time.minutes, r.time.hours)?;
        writeln!(f, "  Calendar days: {:.2}", r.time.days_24h)?;
        writeln!(f, "  8 h shifts:    {:.1}", r.time.shift_count)?;
        writeln!(f, "  3-shift days:  {:.2}", r.time.three_shift_days)?;
        writeln!(f)?;

        writeln!(f, "Creel:")?;
        writeln!(f, "  Total ends:     {}", r.creel.total_ends)?;
        writeln!(f, "  Colors:         {} x {:.1} ends", inputs.color_count, r.creel.ends_per_color_display())?;
        writeln!(f, "  Bobbins/color:  {}", r.creel.bobbins_per_color)?;
        writeln!(
            f,
            "  Bobbins:        {} / {} ({:.1} %) {}",
            r.creel.total_bobbins,
            r.creel.creel_capacity,
            r.creel.utilization * 100.0,
            status_icon(!r.creel.capacity_exceeded)
        )?;
        if r.creel.capacity_exceeded {
            writeln!(f, "  Creel capacity exceeded")?;
        } else {
            writeln!(f, "  Free positions: {}", r.creel.free_positions())?;
        }
        writeln!(f)?;

        writeln!(f, "Cost:")?;
        writeln!(f, "  Pile:   {:>12.2}", r.cost.pile_cost)?;
        writeln!(f, "  Weft:   {:>12.2}", r.cost.weft_cost)?;
        writeln!(f, "  Warp:   {:>12.2}", r.cost.warp_cost)?;
        writeln!(f, "  Total:  {:>12.2}  ({:.2} per m²)", r.cost.total, r.cost.cost_per_m2)?;
        writeln!(f)?;

        writeln!(f, "Margin at {:.2} per m²:", self.margin.sale_price_per_m2)?;
        writeln!(f, "  Revenue:  {:>12.2}", self.margin.revenue)?;
        writeln!(
            f,
            "  Profit:   {:>12.2}  ({:.1} %) {}",
            self.margin.profit,
            self.margin.margin_pct,
            status_icon(self.margin.profit >= 0.0)
        )?;
        writeln!(f)?;

        writeln!(f, "Pile Height Sweep:")?;
        writeln!(f, "  {:>8}  {:>9}  {:>12}  {:>10}  {:>12}", "mm", "kg/m²", "total kg", "saved kg", "saved")?;
        for row in self.sweep {
            writeln!(
                f,
                "  {:>8.2}  {:>9.4}  {:>12.2}  {:>10.2}  {:>12.2}",
                row.pile_height_mm, row.kg_per_m2, row.total_kg, row.savings_kg, row.savings_money
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", RULE)
    }
}
