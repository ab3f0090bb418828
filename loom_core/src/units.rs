//! # Yarn Count Units
//!
//! Conversions between the linear density systems used on the weaving floor:
//!
//! - **dtex**: grams per 10 000 m (direct system, heavier yarn = larger number)
//! - **Nm**: metres per gram (indirect metric count)
//! - **Ne**: English cotton count, used for cotton/jute weft yarns
//!
//! dtex and Nm are reciprocal around [`DTEX_NM_BASE`]; Ne maps to Nm through
//! the ISO 7211-5 coefficient [`NE_TO_NM_FACTOR`].
//!
//! ## Example
//!
//! ```rust
//! use loom_core::units::{dtex_to_nm, ne_to_nm, resolve_linear_count};
//!
//! let nm = dtex_to_nm(1667.0).unwrap();
//! assert!((nm - 5.9988).abs() < 1e-3);
//!
//! let weft_nm = ne_to_nm(10.0).unwrap();
//! assert!((weft_nm - 16.535).abs() < 1e-9);
//!
//! let count = resolve_linear_count("Nm", 6.0).unwrap();
//! assert!((count.dtex * count.nm - 10_000.0).abs() < 1e-6);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DTEX_NM_BASE, NE_TO_NM_FACTOR};
use crate::errors::{CalcError, CalcResult};

/// Convert dtex to metric count: `Nm = 10 000 / dtex`.
pub fn dtex_to_nm(dtex: f64) -> CalcResult<f64> {
    if !dtex.is_finite() || dtex <= 0.0 {
        return Err(CalcError::invalid_argument("dtex", dtex.to_string(), "dtex must be positive"));
    }
    Ok(DTEX_NM_BASE / dtex)
}

/// Convert metric count to dtex: `dtex = 10 000 / Nm`.
pub fn nm_to_dtex(nm: f64) -> CalcResult<f64> {
    if !nm.is_finite() || nm <= 0.0 {
        return Err(CalcError::invalid_argument("nm", nm.to_string(), "Nm must be positive"));
    }
    Ok(DTEX_NM_BASE / nm)
}

/// Convert English cotton count to metric count (ISO 7211-5).
pub fn ne_to_nm(ne: f64) -> CalcResult<f64> {
    if !ne.is_finite() || ne <= 0.0 {
        return Err(CalcError::invalid_argument("ne", ne.to_string(), "Ne must be positive"));
    }
    Ok(ne * NE_TO_NM_FACTOR)
}

/// Convert metric count to English cotton count (ISO 7211-5).
pub fn nm_to_ne(nm: f64) -> CalcResult<f64> {
    if !nm.is_finite() || nm <= 0.0 {
        return Err(CalcError::invalid_argument("nm", nm.to_string(), "Nm must be positive"));
    }
    Ok(nm / NE_TO_NM_FACTOR)
}

/// Unit in which the pile yarn count is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YarnUnit {
    /// Grams per 10 000 m
    #[default]
    #[serde(rename = "dtex")]
    Dtex,
    /// Metres per gram
    #[serde(rename = "Nm")]
    Nm,
}

impl YarnUnit {
    /// Tag used on input forms and in JSON
    pub fn as_str(self) -> &'static str {
        match self {
            YarnUnit::Dtex => "dtex",
            YarnUnit::Nm => "Nm",
        }
    }

    /// Resolve a value in this unit into both dtex and Nm.
    pub fn resolve(self, value: f64) -> CalcResult<LinearCount> {
        match self {
            YarnUnit::Dtex => Ok(LinearCount {
                dtex: value,
                nm: dtex_to_nm(value)?,
            }),
            YarnUnit::Nm => Ok(LinearCount {
                dtex: nm_to_dtex(value)?,
                nm: value,
            }),
        }
    }
}

impl fmt::Display for YarnUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YarnUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dtex" => Ok(YarnUnit::Dtex),
            "Nm" => Ok(YarnUnit::Nm),
            other => Err(CalcError::invalid_argument(
                "yarn_unit",
                other,
                "Unknown yarn unit, expected 'dtex' or 'Nm'",
            )),
        }
    }
}

/// A pile yarn count expressed in both direct and indirect systems.
///
/// Invariant: `dtex × nm ≈ 10 000`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCount {
    pub dtex: f64,
    pub nm: f64,
}

/// Resolve a unit tag and value into a consistent (dtex, Nm) pair.
///
/// Fails with `InvalidArgument` for any tag other than `dtex` or `Nm`, or
/// for a non-positive value.
pub fn resolve_linear_count(unit: &str, value: f64) -> CalcResult<LinearCount> {
    unit.parse::<YarnUnit>()?.resolve(value)
}
