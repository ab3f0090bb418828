//! # Production Time
//!
//! Loom running time for a production run. Each machine revolution inserts
//! one pick, so:
//!
//! ```text
//! effective_rpm = rpm × efficiency / 100
//! minutes       = length_m × pick_per_m / effective_rpm
//! ```
//!
//! Every other field is derived from the same duration.
//!
//! ## Workdays and shift count
//!
//! `workdays_8h` and `shift_count` are both `hours / 8` and always hold the
//! same value. This duplication is kept as-is; a shift count with a
//! different divisor would be a new field, not a change to this one.

use serde::{Deserialize, Serialize};

use crate::constants::{round_to, SHIFTS_PER_DAY, SHIFT_HOURS};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for production time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInput {
    /// Total length to weave (m)
    pub length_m: f64,

    /// Weft insertion density (picks/m)
    pub pick_per_m: u32,

    /// Machine speed (revolutions/minute)
    pub speed_rpm: u32,

    /// Expected efficiency in percent, (0, 100]
    pub efficiency_pct: f64,
}

impl TimeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.speed_rpm == 0 {
            return Err(CalcError::invalid_argument(
                "speed_rpm",
                "0",
                "Machine speed must be positive",
            ));
        }
        if !(self.efficiency_pct > 0.0 && self.efficiency_pct <= 100.0) {
            return Err(CalcError::invalid_argument(
                "efficiency_pct",
                self.efficiency_pct.to_string(),
                "Efficiency must be in (0, 100]",
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

    /// Picks actually inserted per minute
    pub fn effective_rpm(&self) -> f64 {
        f64::from(self.speed_rpm) * (self.efficiency_pct / 100.0)
    }
}

/// Production duration in several calendars.
///
/// ## JSON Example
///
/// ```json
/// {
///   "minutes": 14583.3,
///   "hours": 243.06,
///   "days_24h": 10.13,
///   "workdays_8h": 30.4,
///   "shift_count": 30.4,
///   "three_shift_days": 10.13
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeResult {
    /// Running time in minutes (1 decimal)
    pub minutes: f64,

    /// Running time in hours (2 decimals)
    pub hours: f64,

    /// Calendar days on a 24 h basis (2 decimals)
    pub days_24h: f64,

    /// Working days of one 8 h shift (1 decimal)
    pub workdays_8h: f64,

    /// Number of 8 h shifts (1 decimal), equal to `workdays_8h`
    pub shift_count: f64,

    /// Days when running three 8 h shifts around the clock (2 decimals)
    pub three_shift_days: f64,
}

/// Calculate production time.
pub fn calculate(input: &TimeInput) -> CalcResult<TimeResult> {
    input.validate()?;

    let minutes = input.length_m * f64::from(input.pick_per_m) / input.effective_rpm();
    let hours = minutes / 60.0;
    let days_24h = hours / 24.0;
    let shifts = hours / SHIFT_HOURS;
    let three_shift_days = hours / (SHIFT_HOURS * f64::from(SHIFTS_PER_DAY));

    Ok(TimeResult {
        minutes: round_to(minutes, 1),
        hours: round_to(hours, 2),
        days_24h: round_to(days_24h, 2),
        workdays_8h: round_to(shifts, 1),
        shift_count: round_to(shifts, 1),
        three_shift_days: round_to(three_shift_days, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> TimeInput {
        TimeInput {
            length_m: 5000.0,
            pick_per_m: 700,
            speed_rpm: 300,
            efficiency_pct: 80.0,
        }
    }

    #[test]
    fn test_reference_run() {
        // 5000 × 700 / 240 = 14 583.33 min
        let t = calculate(&reference_input()).unwrap();
        assert!((t.minutes - 14583.3).abs() < 1e-9);
        assert!((t.hours - 243.06).abs() < 1e-9);
        assert!((t.days_24h - 10.13).abs() < 1e-9);
        assert!((t.workdays_8h - 30.4).abs() < 1e-9);
    }

    #[test]
    fn test_hours_days_consistent() {
        let t = calculate(&reference_input()).unwrap();
        assert!((t.days_24h - t.hours / 24.0).abs() < 0.01);
        assert!((t.workdays_8h - t.minutes / 60.0 / 8.0).abs() < 0.1);
    }

    #[test]
    fn test_workdays_equal_shift_count() {
        // Known quirk: both fields are hours / 8, so they never differ
        for length_m in [10.0, 1234.5, 5000.0, 98_000.0] {
            let t = calculate(&TimeInput { length_m, ..reference_input() }).unwrap();
            assert_eq!(t.workdays_8h, t.shift_count);
        }
    }

    #[test]
    fn test_three_shift_days_match_calendar_days() {
        let t = calculate(&reference_input()).unwrap();
        assert_eq!(t.three_shift_days, t.days_24h);
    }

    #[test]
    fn test_length_scales_minutes_linearly() {
        let t1 = calculate(&TimeInput { length_m: 1000.0, ..reference_input() }).unwrap();
        let t2 = calculate(&TimeInput { length_m: 2000.0, ..reference_input() }).unwrap();
        assert!((t2.minutes / t1.minutes - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_efficiency_and_speed_shorten_run() {
        let slow = calculate(&TimeInput { efficiency_pct: 60.0, ..reference_input() }).unwrap();
        let fast = calculate(&TimeInput { efficiency_pct: 90.0, ..reference_input() }).unwrap();
        assert!(slow.minutes > fast.minutes);

        let low_rpm = calculate(&TimeInput { speed_rpm: 200, ..reference_input() }).unwrap();
        let high_rpm = calculate(&TimeInput { speed_rpm: 400, ..reference_input() }).unwrap();
        assert!(low_rpm.minutes > high_rpm.minutes);
    }

    #[test]
    fn test_efficiency_boundaries() {
        assert!(calculate(&TimeInput { efficiency_pct: 100.0, ..reference_input() }).is_ok());
        assert!(calculate(&TimeInput { efficiency_pct: 0.0, ..reference_input() }).is_err());
        assert!(calculate(&TimeInput { efficiency_pct: 100.1, ..reference_input() }).is_err());
        assert!(calculate(&TimeInput { efficiency_pct: -5.0, ..reference_input() }).is_err());
    }

    #[test]
    fn test_invalid_speed_and_length() {
        let err = calculate(&TimeInput { speed_rpm: 0, ..reference_input() }).unwrap_err();
        assert_eq!(err.field(), "speed_rpm");
        let err = calculate(&TimeInput { length_m: -10.0, ..reference_input() }).unwrap_err();
        assert_eq!(err.field(), "length_m");
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let err = calculate(&TimeInput { efficiency_pct: f64::NAN, ..reference_input() }).unwrap_err();
        assert_eq!(err.field(), "efficiency_pct");
        let err = calculate(&TimeInput { length_m: f64::NAN, ..reference_input() }).unwrap_err();
        assert_eq!(err.field(), "length_m");
        let err = calculate(&TimeInput { length_m: f64::INFINITY, ..reference_input() }).unwrap_err();
        assert_eq!(err.field(), "length_m");
    }
}
