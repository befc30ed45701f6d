//! # Ground Structure Formulas
//!
//! Step functions and derived lengths for the ground-mounted structure.
//! Every count here is a bucket lookup in [`crate::rules`]; the batten
//! formulas chain off each other.
//!
//! ## Notation
//!
//! - `L` = construction length (mm)
//! - `n` = module count
//! - `B` = batten count (multiples of 4, one set per 4200mm bay)
//! - `E` = extra batten count (0 or 4)

use crate::errors::CalcResult;
use crate::rules::{
    self, rafter_length_for_code, whole_batten_bays, BATTEN_BAY_MM, MIN_EXTRA_BATTEN_MM,
};

/// Front and back legs along the construction (each).
///
/// Two legs up to 4300mm, then one more roughly every 2900mm up to 32000mm.
pub fn leg_count(construction_length: f64) -> CalcResult<u32> {
    rules::table(&rules::LEG_COUNT)?.lookup(construction_length)
}

/// Connector ("ryšys") count by module count: 2 up to 32, 3 up to 36, 4 up to 54
pub fn connector_count(module_count: u32) -> CalcResult<u32> {
    rules::table(&rules::CONNECTOR_COUNT)?.lookup(f64::from(module_count))
}

/// Rafter code by module length
pub fn rafter_code(module_length: f64) -> CalcResult<&'static str> {
    rules::table(&rules::RAFTER_CODE)?.lookup(module_length)
}

/// Rafter stock length for the module length.
///
/// `None` when the code has no fixed stock length (ask the supplier).
pub fn rafter_length(module_length: f64) -> CalcResult<Option<f64>> {
    Ok(rafter_length_for_code(rafter_code(module_length)?))
}

/// Full-length battens: 4 per whole 4200mm bay
pub fn batten_count(construction_length: f64) -> CalcResult<u32> {
    let bays = whole_batten_bays(construction_length)?;
    rules::table(&rules::BATTEN_COUNT)?.lookup(bays)
}

/// Length of the extra batten covering what the full bays leave over.
///
/// ```text
/// r = L - (B / 4) * 4200
/// r == 0   -> 0
/// r < 300  -> 300
/// else     -> r
/// ```
pub fn extra_batten_length(construction_length: f64) -> CalcResult<f64> {
    let battens = f64::from(batten_count(construction_length)?);
    let remainder = construction_length - (battens / 4.0) * BATTEN_BAY_MM;

    if remainder == 0.0 {
        Ok(0.0)
    } else if remainder < MIN_EXTRA_BATTEN_MM {
        Ok(MIN_EXTRA_BATTEN_MM)
    } else {
        Ok(remainder)
    }
}

/// Extra battens: a set of 4 whenever there is a remainder
pub fn extra_batten_count(construction_length: f64) -> CalcResult<u32> {
    if extra_batten_length(construction_length)? == 0.0 {
        Ok(0)
    } else {
        Ok(4)
    }
}

/// Batten joints by total batten count `B + E`, one joint set per 4 battens
pub fn batten_joint_count(battens: u32, extra_battens: u32) -> CalcResult<u32> {
    rules::table(&rules::BATTEN_JOINT_COUNT)?.lookup(f64::from(battens + extra_battens))
}
