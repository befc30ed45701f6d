//! # Calculator Input
//!
//! [`CalculatorInput`] is the single value threading through the engine. It is
//! built once per request (from JSON or with the `with_*` builders) and is
//! never mutated while a BOM is resolved.
//!
//! ## JSON Example (flat roof)
//!
//! ```json
//! {
//!   "batteryType": "ploksciasStogas",
//!   "moduleCount": 21,
//!   "moduleLength": 1722,
//!   "moduleWidth": 1134,
//!   "moduleThickness": 30,
//!   "rowsCount": 2,
//!   "system": "PT10",
//!   "moduleConstruction": "trumpoji",
//!   "holderPCount": 22,
//!   "holderGCount": 22
//! }
//! ```
//!
//! ## Builder Example
//!
//! ```rust
//! use bom_core::input::{BatteryType, CalculatorInput, RoofSystem};
//!
//! let input = CalculatorInput::new(BatteryType::FlatRoof)
//!     .with_modules(20, 1722.0)
//!     .with_rows(2)
//!     .with_system(RoofSystem::Pt10);
//! assert!(input.validate().is_ok());
//! ```

pub mod ground;
pub mod layout;
pub mod options;
pub mod roof;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rules::MAX_CONSTRUCTION_LENGTH_MM;

pub use ground::GroundLayout;
pub use layout::{even_or_override, LayoutOverrides, OverrideSlot};
pub use options::{BatteryType, ModuleConstruction, MountingMethod, Orientation, RoofMaterial, RoofSystem};
pub use roof::{allowed_constructions, validate_roof_selection, RoofSelection};

/// Width of the standard module the front end assumes (mm)
pub const STANDARD_MODULE_WIDTH_MM: f64 = 1134.0;

fn default_module_width() -> f64 {
    STANDARD_MODULE_WIDTH_MM
}

fn default_rows_count() -> u32 {
    1
}

/// All parameters of one BOM calculation. Dimensions in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    /// Installation type, selects the catalog
    pub battery_type: BatteryType,

    /// Number of PV modules (per row for flat roofs)
    pub module_count: u32,

    /// Module length (mm)
    pub module_length: f64,

    /// Module width (mm)
    #[serde(default = "default_module_width")]
    pub module_width: f64,

    /// Module thickness (mm)
    pub module_thickness: f64,

    /// Ground construction length (mm), derived from the module layout
    #[serde(default)]
    pub construction_length: f64,

    /// Number of module rows
    #[serde(default = "default_rows_count")]
    pub rows_count: u32,

    /// Reserve at each end of the construction (mm)
    #[serde(default)]
    pub reserve: f64,

    /// Gap left for clamps between modules (mm)
    #[serde(default)]
    pub clamp_gap: f64,

    /// Gap between flat-roof rows (mm)
    #[serde(default)]
    pub gap_between_rows: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Flat-roof mounting kit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<RoofSystem>,

    #[serde(default)]
    pub module_construction: ModuleConstruction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_material: Option<RoofMaterial>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_method: Option<MountingMethod>,

    /// Modules in each pitched-roof row, when rows differ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_module_counts: Option<Vec<u32>>,

    /// Frame colour, carried for the order only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_color: Option<String>,

    /// Counters from the interactive layout tool
    #[serde(flatten)]
    pub layout: LayoutOverrides,
}

impl CalculatorInput {
    /// Start an input with no modules and neutral defaults.
    pub fn new(battery_type: BatteryType) -> Self {
        CalculatorInput {
            battery_type,
            module_count: 0,
            module_length: 0.0,
            module_width: STANDARD_MODULE_WIDTH_MM,
            module_thickness: 30.0,
            construction_length: 0.0,
            rows_count: 1,
            reserve: 0.0,
            clamp_gap: 0.0,
            gap_between_rows: 0.0,
            orientation: None,
            system: None,
            module_construction: ModuleConstruction::Unspecified,
            roof_material: None,
            mounting_method: None,
            row_module_counts: None,
            module_color: None,
            layout: LayoutOverrides::default(),
        }
    }

    pub fn with_modules(mut self, count: u32, length_mm: f64) -> Self {
        self.module_count = count;
        self.module_length = length_mm;
        self
    }

    pub fn with_module_width(mut self, width_mm: f64) -> Self {
        self.module_width = width_mm;
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows_count = rows;
        self
    }

    pub fn with_construction_length(mut self, length_mm: f64) -> Self {
        self.construction_length = length_mm;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_system(mut self, system: RoofSystem) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_construction(mut self, construction: ModuleConstruction) -> Self {
        self.module_construction = construction;
        self
    }

    pub fn with_roof(mut self, material: RoofMaterial, method: MountingMethod) -> Self {
        self.roof_material = Some(material);
        self.mounting_method = Some(method);
        self
    }

    pub fn with_row_module_counts(mut self, counts: Vec<u32>) -> Self {
        self.row_module_counts = Some(counts);
        self
    }

    pub fn with_overrides(mut self, layout: LayoutOverrides) -> Self {
        self.layout = layout;
        self
    }

    /// Module count of each pitched-roof row.
    ///
    /// Falls back to a single row of `module_count` modules.
    pub fn pitched_rows(&self) -> Vec<u32> {
        match &self.row_module_counts {
            Some(counts) if !counts.is_empty() => counts.clone(),
            _ => vec![self.module_count],
        }
    }

    /// Parse an input from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the structural invariants every catalog relies on.
    ///
    /// Cross-field roof rules (material vs. mounting method, construction
    /// vs. system) are checked separately by [`validate_roof_selection`].
    pub fn validate(&self) -> CalcResult<()> {
        if self.module_count == 0 {
            return Err(CalcError::invalid_input(
                "moduleCount",
                self.module_count.to_string(),
                "At least one module is required",
            ));
        }
        if self.rows_count == 0 {
            return Err(CalcError::invalid_input(
                "rowsCount",
                self.rows_count.to_string(),
                "At least one row is required",
            ));
        }
        positive("moduleLength", self.module_length)?;
        positive("moduleWidth", self.module_width)?;
        positive("moduleThickness", self.module_thickness)?;
        non_negative("reserve", self.reserve)?;
        non_negative("clampGap", self.clamp_gap)?;
        non_negative("gapBetweenRows", self.gap_between_rows)?;

        if self.battery_type.is_ground() {
            positive("constructionLength", self.construction_length)?;
            if self.construction_length > MAX_CONSTRUCTION_LENGTH_MM {
                return Err(CalcError::range_exceeded(
                    "leg_count",
                    self.construction_length,
                    "construction length exceeds 32000mm",
                ));
            }
        }

        if let Some(counts) = &self.row_module_counts {
            if let Some(position) = counts.iter().position(|&count| count == 0) {
                return Err(CalcError::invalid_input(
                    format!("rowModuleCounts[{}]", position),
                    "0",
                    "Every row needs at least one module",
                ));
            }
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ground_state() {
        // Shape of the ground calculator's navigation state
        let json = r#"{
            "batteryType": "ezys",
            "moduleCount": 36,
            "moduleLength": 2250,
            "moduleThickness": 30,
            "constructionLength": 20800,
            "rowsCount": 18,
            "reserve": 100
        }"#;
        let input = CalculatorInput::from_json(json).unwrap();
        assert_eq!(input.battery_type, BatteryType::GroundFence);
        assert_eq!(input.module_width, STANDARD_MODULE_WIDTH_MM);
        assert!(input.layout.is_empty());
        input.validate().unwrap();
    }

    #[test]
    fn test_parse_roof_state_with_overrides() {
        let json = r#"{
            "batteryType": "ploksciasStogas",
            "moduleCount": 21,
            "moduleLength": 1722,
            "moduleWidth": 1134,
            "moduleThickness": 30,
            "rowsCount": 2,
            "orientation": "PT",
            "system": "PT10",
            "moduleConstruction": "trumpoji",
            "gapBetweenRows": 0,
            "holderPCount": 22,
            "clampVCount": 80
        }"#;
        let input = CalculatorInput::from_json(json).unwrap();
        assert_eq!(input.system, Some(RoofSystem::Pt10));
        assert_eq!(input.module_construction, ModuleConstruction::Short);
        assert_eq!(input.layout.holder_p, Some(22));
        assert_eq!(input.layout.clamp_v, Some(80));
    }

    #[test]
    fn test_overrides_serialize_flat() {
        let input = CalculatorInput::new(BatteryType::FlatRoof)
            .with_modules(21, 1722.0)
            .with_overrides(LayoutOverrides {
                holder_g: Some(4),
                ..Default::default()
            });
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["holderGCount"], 4);
        assert!(json.get("holderPCount").is_none());
    }

    #[test]
    fn test_invalid_enum_is_rejected() {
        let json = r#"{"batteryType": "balcony", "moduleCount": 2, "moduleLength": 1700, "moduleThickness": 30}"#;
        let err = CalculatorInput::from_json(json).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_validate_zero_modules() {
        let input = CalculatorInput::new(BatteryType::FlatRoof).with_modules(0, 1700.0);
        let err = input.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "moduleCount"));
    }

    #[test]
    fn test_validate_ground_length_limit() {
        let input = CalculatorInput::new(BatteryType::GroundFence)
            .with_modules(36, 2250.0)
            .with_construction_length(32001.0);
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "RANGE_EXCEEDED");

        let input = input.with_construction_length(32000.0);
        input.validate().unwrap();
    }

    #[test]
    fn test_validate_roof_ignores_construction_length() {
        let input = CalculatorInput::new(BatteryType::PitchedRoof).with_modules(10, 1722.0);
        input.validate().unwrap();
    }

    #[test]
    fn test_validate_empty_row() {
        let input = CalculatorInput::new(BatteryType::PitchedRoof)
            .with_modules(10, 1722.0)
            .with_row_module_counts(vec![5, 0]);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_pitched_rows_fallback() {
        let input = CalculatorInput::new(BatteryType::PitchedRoof).with_modules(7, 1722.0);
        assert_eq!(input.pitched_rows(), vec![7]);
        let input = input.with_row_module_counts(vec![]);
        assert_eq!(input.pitched_rows(), vec![7]);
        let input = input.with_row_module_counts(vec![4, 3]);
        assert_eq!(input.pitched_rows(), vec![4, 3]);
    }
}
