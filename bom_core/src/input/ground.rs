//! # Ground Layout
//!
//! Derives the ground construction from the three values a user chooses:
//! module count, module length and module thickness.
//!
//! Modules stand two high, so `rows = moduleCount / 2`, and the construction
//! length is
//!
//! ```text
//! L = ceil((1134 * rows + 2 * reserve + (rows - 1) * 20) / 100) * 100
//! ```
//!
//! with a 50mm reserve up to 24 modules and 100mm above.
//!
//! ## Example
//!
//! ```rust
//! use bom_core::input::{BatteryType, GroundLayout};
//!
//! let layout = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0).unwrap();
//! assert_eq!(layout.rows_count, 18);
//! assert_eq!(layout.construction_length, 21000.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{BatteryType, CalculatorInput, STANDARD_MODULE_WIDTH_MM};
use crate::errors::{CalcError, CalcResult};
use crate::rules::MAX_CONSTRUCTION_LENGTH_MM;

/// Gap between neighbouring module columns (mm)
pub const GROUND_GAP_MM: f64 = 20.0;

pub const MIN_GROUND_MODULES: u32 = 8;
pub const MAX_GROUND_MODULES: u32 = 54;
pub const MIN_GROUND_MODULE_LENGTH_MM: f64 = 1700.0;
pub const MAX_GROUND_MODULE_LENGTH_MM: f64 = 2400.0;

/// Reserve at each end: 50mm up to 24 modules, 100mm above
pub fn ground_reserve(module_count: u32) -> f64 {
    if module_count <= 24 {
        50.0
    } else {
        100.0
    }
}

/// Construction length rounded up to the next 100mm
pub fn construction_length(module_width: f64, rows_count: u32, reserve: f64, gap: f64) -> f64 {
    let rows = f64::from(rows_count);
    let raw = module_width * rows + reserve * 2.0 + (rows - 1.0) * gap;
    (raw / 100.0).ceil() * 100.0
}

/// Fully derived ground layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundLayout {
    pub battery_type: BatteryType,
    pub module_count: u32,
    pub module_length: f64,
    pub module_width: f64,
    pub module_thickness: f64,
    pub rows_count: u32,
    pub reserve: f64,
    pub gap: f64,
    pub construction_length: f64,
}

impl GroundLayout {
    /// Validate the user's choices and derive the rest.
    pub fn new(
        battery_type: BatteryType,
        module_count: u32,
        module_length: f64,
        module_thickness: f64,
    ) -> CalcResult<Self> {
        if !battery_type.is_ground() {
            return Err(CalcError::invalid_input(
                "batteryType",
                battery_type.display_name(),
                "Ground layout needs a ground battery type",
            ));
        }
        if module_count < MIN_GROUND_MODULES || module_count > MAX_GROUND_MODULES || module_count % 2 != 0 {
            return Err(CalcError::invalid_input(
                "moduleCount",
                module_count.to_string(),
                format!(
                    "Must be an even number between {} and {}",
                    MIN_GROUND_MODULES, MAX_GROUND_MODULES
                ),
            ));
        }
        if !(MIN_GROUND_MODULE_LENGTH_MM..=MAX_GROUND_MODULE_LENGTH_MM).contains(&module_length) {
            return Err(CalcError::invalid_input(
                "moduleLength",
                module_length.to_string(),
                format!(
                    "Must be between {} and {} mm",
                    MIN_GROUND_MODULE_LENGTH_MM, MAX_GROUND_MODULE_LENGTH_MM
                ),
            ));
        }
        if !module_thickness.is_finite() || module_thickness <= 0.0 {
            return Err(CalcError::invalid_input(
                "moduleThickness",
                module_thickness.to_string(),
                "Must be a positive number",
            ));
        }

        let rows_count = module_count / 2;
        let reserve = ground_reserve(module_count);
        let length = construction_length(STANDARD_MODULE_WIDTH_MM, rows_count, reserve, GROUND_GAP_MM);
        if length > MAX_CONSTRUCTION_LENGTH_MM {
            return Err(CalcError::range_exceeded(
                "leg_count",
                length,
                "construction length exceeds 32000mm",
            ));
        }

        tracing::debug!(module_count, rows_count, construction_length = length, "derived ground layout");

        Ok(GroundLayout {
            battery_type,
            module_count,
            module_length,
            module_width: STANDARD_MODULE_WIDTH_MM,
            module_thickness,
            rows_count,
            reserve,
            gap: GROUND_GAP_MM,
            construction_length: length,
        })
    }

    /// Calculator input for this layout
    pub fn to_input(&self) -> CalculatorInput {
        let mut input = CalculatorInput::new(self.battery_type)
            .with_modules(self.module_count, self.module_length)
            .with_module_width(self.module_width)
            .with_rows(self.rows_count)
            .with_construction_length(self.construction_length);
        input.module_thickness = self.module_thickness;
        input.reserve = self.reserve;
        input.clamp_gap = self.gap;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        // 18 * 1134 + 200 + 17 * 20 = 20952 -> 21000
        let layout = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0).unwrap();
        assert_eq!(layout.rows_count, 18);
        assert_eq!(layout.reserve, 100.0);
        assert_eq!(layout.construction_length, 21000.0);
    }

    #[test]
    fn test_small_layout_uses_short_reserve() {
        // 4 * 1134 + 100 + 60 = 4696 -> 4700
        let layout = GroundLayout::new(BatteryType::GroundPole, 8, 1800.0, 35.0).unwrap();
        assert_eq!(layout.reserve, 50.0);
        assert_eq!(layout.construction_length, 4700.0);
    }

    #[test]
    fn test_largest_layout_fits() {
        // 27 * 1134 + 200 + 26 * 20 = 31338 -> 31400
        let layout = GroundLayout::new(BatteryType::GroundFence, 54, 2400.0, 30.0).unwrap();
        assert_eq!(layout.construction_length, 31400.0);
    }

    #[test]
    fn test_rejects_odd_or_out_of_range_counts() {
        assert!(GroundLayout::new(BatteryType::GroundFence, 35, 2250.0, 30.0).is_err());
        assert!(GroundLayout::new(BatteryType::GroundFence, 6, 2250.0, 30.0).is_err());
        assert!(GroundLayout::new(BatteryType::GroundFence, 56, 2250.0, 30.0).is_err());
    }

    #[test]
    fn test_rejects_module_length() {
        let err = GroundLayout::new(BatteryType::GroundFence, 36, 1699.0, 30.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "moduleLength"));
        assert!(GroundLayout::new(BatteryType::GroundFence, 36, 2401.0, 30.0).is_err());
        assert!(GroundLayout::new(BatteryType::GroundFence, 36, 2400.0, 30.0).is_ok());
    }

    #[test]
    fn test_rejects_roof_battery() {
        assert!(GroundLayout::new(BatteryType::FlatRoof, 36, 2250.0, 30.0).is_err());
    }

    #[test]
    fn test_to_input_validates() {
        let layout = GroundLayout::new(BatteryType::GroundFence, 20, 2000.0, 30.0).unwrap();
        let input = layout.to_input();
        assert_eq!(input.rows_count, 10);
        assert_eq!(input.construction_length, layout.construction_length);
        input.validate().unwrap();
    }
}
