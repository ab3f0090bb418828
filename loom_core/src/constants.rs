//! # Calibration Constants
//!
//! Named constants used by the calculators. Callers that need to show or
//! cross-check a coefficient should reference these rather than repeating
//! the literal.
//!
//! | Constant                 | Value      | Source                          |
//! |--------------------------|------------|---------------------------------|
//! | `NE_TO_NM_FACTOR`        | 1.6535     | ISO 7211-5 cotton count         |
//! | `DTEX_NM_BASE`           | 10 000     | dtex = g / 10 000 m             |
//! | `PILE_FORMULA_DIVISOR`   | 10 000 000 | dtex base × g→kg                |
//! | `SHIFT_HOURS`            | 8          | Standard shift length           |

/// English cotton count (Ne) to metric count (Nm) coefficient.
pub const NE_TO_NM_FACTOR: f64 = 1.6535;

/// dtex × Nm = 10 000 for any yarn.
pub const DTEX_NM_BASE: f64 = 10_000.0;

/// Divisor of the pile consumption formula.
///
/// dtex is grams per 10 000 m; per-metre densities times a loop length in
/// metres give g/m² ÷ 10 000, and ÷ 1000 converts grams to kilograms.
pub const PILE_FORMULA_DIVISOR: f64 = 10_000_000.0;

/// Length of one production shift in hours.
pub const SHIFT_HOURS: f64 = 8.0;

/// Shifts in a round-the-clock production day.
pub const SHIFTS_PER_DAY: u32 = 3;

/// Lower bound of the recommended waste fraction band.
pub const WASTE_MIN: f64 = 0.0;

/// Upper bound of the recommended waste fraction band (advisory only).
pub const WASTE_MAX: f64 = 0.50;

/// Weft and warp waste as a fraction of the pile waste fraction.
///
/// Non-pile yarns lose less material in processing than the face yarn.
pub const SUBSIDIARY_WASTE_RATIO: f64 = 0.5;

/// Round `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_divisor_is_dtex_base_times_grams_per_kg() {
        assert_eq!(PILE_FORMULA_DIVISOR, DTEX_NM_BASE * 1000.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.509_501_84, 4), 1.5095);
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(-0.004, 2), -0.0);
        assert_eq!(round_to(12.0, 2), 12.0);
    }

    #[test]
    fn test_shift_day_matches_calendar_day() {
        assert_eq!(SHIFT_HOURS * SHIFTS_PER_DAY as f64, 24.0);
    }
}
