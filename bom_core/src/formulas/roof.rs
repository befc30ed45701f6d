//! # Roof Formulas
//!
//! Rail and fastener counts for pitched roofs, plus the auxiliary holder
//! rule shared by the flat-roof kits.
//!
//! Pitched-roof rails run along one module row. The row's span is
//!
//! ```text
//! span = m * n + 100 + (n - 1) * 20
//! ```
//!
//! where `m` is the module side lying along the rail (width for vertical
//! modules, length otherwise) and `n` the modules in the row.

use crate::input::{CalculatorInput, Orientation};

/// Flat-roof modules at least this long (mm) need auxiliary holders
pub const AUX_HOLDER_MIN_MODULE_LENGTH_MM: f64 = 2000.0;

/// End clamps per pitched-roof row
pub const PITCHED_END_CLAMPS: f64 = 4.0;

/// Square rail end caps per pitched-roof row
pub const SQUARE_RAIL_END_CAPS: f64 = 4.0;

/// Module side lying along the rail
pub fn module_side_along_rail(input: &CalculatorInput) -> f64 {
    match input.orientation {
        Some(Orientation::Vertical) => input.module_width,
        _ => input.module_length,
    }
}

/// Rail span of one row (mm)
pub fn rail_span(module_side: f64, module_count: u32) -> f64 {
    let n = f64::from(module_count);
    module_side * n + 100.0 + (n - 1.0) * 20.0
}

/// Square rails, 3300mm stock
pub fn square_rail_count(span: f64) -> f64 {
    (span / 3300.0).floor() + 1.0
}

/// Joints between square rails
pub fn square_rail_joint_count(rails: f64) -> f64 {
    (((rails / 2.0).floor() - 1.0) * 2.0).max(0.0)
}

/// Roof studs, one pair every 1200mm plus a pair at the end
pub fn stud_count(span: f64) -> f64 {
    2.0 * ((span - 1.0) / 1200.0 + 1.0).floor() + 2.0
}

/// M10 screws (and nuts): two per joint plus one per stud
pub fn m10_screw_count(span: f64) -> f64 {
    square_rail_joint_count(square_rail_count(span)) * 2.0 + stud_count(span)
}

/// EPDM mini rails, two per module gap
pub fn mini_rail_count(module_count: u32) -> f64 {
    (f64::from(module_count) + 1.0) * 2.0
}

/// EPDM 40 rails, 3150mm stock
pub fn epdm40_rail_count(span: f64) -> f64 {
    (span / 3150.0).floor() + 1.0
}

/// EPDM 80 rails, 3000mm stock
pub fn epdm80_rail_count(span: f64) -> f64 {
    (span / 3000.0).floor() + 1.0
}

/// Special screws for EPDM rails, one pair every 800mm plus a pair at the end
pub fn epdm_special_screw_count(span: f64) -> f64 {
    2.0 * ((span - 1.0) / 800.0 + 1.0).floor() + 2.0
}

/// Inner clamps of a pitched-roof row
pub fn pitched_inner_clamp_count(module_count: u32) -> f64 {
    (f64::from(module_count) - 1.0) * 2.0
}

/// Auxiliary holders for long flat-roof modules, one per module
pub fn auxiliary_holder_count(module_length: f64, module_count: u32, rows_count: u32) -> f64 {
    if module_length < AUX_HOLDER_MIN_MODULE_LENGTH_MM {
        0.0
    } else {
        f64::from(module_count) * f64::from(rows_count)
    }
}
