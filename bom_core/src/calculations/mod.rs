//! # BOM Calculations
//!
//! Every calculation follows the same pattern:
//!
//! - [`CalculatorInput`] - input parameters (JSON-serializable)
//! - `*Material` - resolved lines (JSON-serializable)
//! - `compute_*(input) -> CalcResult<Vec<_>>` - pure resolution function
//!
//! [`calculate`] runs both resolvers over one shared formula cache and
//! returns a [`BomReport`].
//!
//! ## Available Calculations
//!
//! - [`system`] - structure materials (ground, flat roof, pitched roof)
//! - [`furniture`] - loose hardware for ground structures
//!
//! ## Example
//!
//! ```rust
//! use bom_core::calculations::calculate;
//! use bom_core::input::{BatteryType, CalculatorInput, RoofSystem};
//!
//! let input = CalculatorInput::new(BatteryType::FlatRoof)
//!     .with_modules(20, 1722.0)
//!     .with_rows(2)
//!     .with_system(RoofSystem::Pt10);
//!
//! let report = calculate(&input).unwrap();
//! assert!(report.furniture.is_empty());
//! assert!(report.system.iter().any(|row| row.code == "PT10-1"));
//! ```

pub mod furniture;
pub mod system;

use serde::{Deserialize, Serialize};

pub use furniture::{compute_furniture_materials, CalculatedFurnitureMaterial};
pub use system::{compute_system_materials, compute_system_materials_with, CalculatedSystemMaterial, ResolveOptions};

use crate::errors::CalcResult;
use crate::formulas::FormulaEvaluator;
use crate::input::{BatteryType, CalculatorInput};

/// Complete BOM for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomReport {
    pub battery_type: BatteryType,
    pub system: Vec<CalculatedSystemMaterial>,
    /// Empty for roof installations
    pub furniture: Vec<CalculatedFurnitureMaterial>,
}

impl BomReport {
    /// Total number of lines across both lists
    pub fn line_count(&self) -> usize {
        self.system.len() + self.furniture.len()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Resolve system materials and, for ground structures, furniture.
///
/// # Errors
///
/// Whatever validation or resolution reports; no partial report is
/// returned.
pub fn calculate(input: &CalculatorInput) -> CalcResult<BomReport> {
    calculate_with(input, ResolveOptions::default())
}

/// [`calculate`] with explicit resolver options.
pub fn calculate_with(input: &CalculatorInput, options: ResolveOptions) -> CalcResult<BomReport> {
    input.validate()?;

    let mut eval = FormulaEvaluator::new(input);
    let system = system::resolve_system(&mut eval, options)?;
    let furniture = if input.battery_type.is_ground() {
        furniture::resolve_furniture(&mut eval)?
    } else {
        Vec::new()
    };

    tracing::info!(
        battery_type = input.battery_type.code(),
        system = system.len(),
        furniture = furniture.len(),
        "calculated BOM"
    );

    Ok(BomReport {
        battery_type: input.battery_type,
        system,
        furniture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GroundLayout;

    #[test]
    fn test_ground_report_has_both_lists() {
        let input = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0)
            .unwrap()
            .to_input();
        let report = calculate(&input).unwrap();
        assert_eq!(report.system.len(), 13);
        assert_eq!(report.furniture.len(), 14);
        assert_eq!(report.line_count(), 27);
    }

    #[test]
    fn test_report_matches_standalone_resolvers() {
        let input = GroundLayout::new(BatteryType::GroundPole, 30, 2000.0, 35.0)
            .unwrap()
            .to_input();
        let report = calculate(&input).unwrap();
        assert_eq!(report.system, compute_system_materials(&input).unwrap());
        assert_eq!(report.furniture, compute_furniture_materials(&input).unwrap());
    }

    #[test]
    fn test_report_json() {
        let input = GroundLayout::new(BatteryType::GroundFence, 8, 1722.0, 30.0)
            .unwrap()
            .to_input();
        let json = calculate(&input).unwrap().to_json().unwrap();
        assert!(json.contains("\"batteryType\": \"ezys\""));
        assert!(json.contains("\"furniture\""));
    }

    #[test]
    fn test_invalid_input_is_rejected_first() {
        let input = CalculatorInput::new(BatteryType::GroundFence).with_modules(0, 1722.0);
        assert!(calculate(&input).is_err());
    }
}
