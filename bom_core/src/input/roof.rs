//! Roof selection rules.
//!
//! The quantity resolver trusts its input. These checks are what a front end
//! (or the CLI) runs before handing an input over: roof material vs. mounting
//! method, module construction vs. system and module length, and RV row
//! parity.

use serde::{Deserialize, Serialize};

use super::{BatteryType, CalculatorInput, ModuleConstruction, MountingMethod, Orientation, RoofSystem};
use crate::errors::{CalcError, CalcResult};

/// Modules above this length (mm) change the construction rules
pub const LONG_MODULE_THRESHOLD_MM: f64 = 2000.0;

/// Module constructions a flat-roof system supports for a module length.
///
/// An empty list means the combination is not stocked and has to be ordered
/// individually.
pub fn allowed_constructions(system: RoofSystem, module_length: f64) -> &'static [ModuleConstruction] {
    let long_module = module_length > LONG_MODULE_THRESHOLD_MM;
    match system {
        RoofSystem::Rv10 if long_module => &[ModuleConstruction::Both],
        RoofSystem::Rv10 => &[ModuleConstruction::Short],
        RoofSystem::Rv10Z => &[ModuleConstruction::Short],
        RoofSystem::Pt15L if long_module => &[ModuleConstruction::Long],
        RoofSystem::Pt15L => &[ModuleConstruction::Short, ModuleConstruction::Long],
        _ if !long_module => &[ModuleConstruction::Short],
        RoofSystem::Pt5 | RoofSystem::Pt20 => &[],
        RoofSystem::Pt10 | RoofSystem::Pt15 => &[ModuleConstruction::Both],
    }
}

/// What the selection checks found out about a valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofSelection {
    pub allowed_constructions: Vec<ModuleConstruction>,
    pub allowed_mounting_methods: Vec<MountingMethod>,
    /// Odd flat-roof layouts need counters from the interactive layout tool
    pub needs_layout_tool: bool,
    /// Long modules on PT5/PT20 are ordered individually
    pub individual_order: bool,
}

/// Check the cross-field rules for the input's battery type.
///
/// Ground inputs pass through with an empty selection.
pub fn validate_roof_selection(input: &CalculatorInput) -> CalcResult<RoofSelection> {
    match input.battery_type {
        BatteryType::GroundFence | BatteryType::GroundPole => Ok(RoofSelection {
            allowed_constructions: Vec::new(),
            allowed_mounting_methods: Vec::new(),
            needs_layout_tool: false,
            individual_order: false,
        }),
        BatteryType::FlatRoof => validate_flat_roof(input),
        BatteryType::PitchedRoof => validate_pitched_roof(input),
    }
}

fn validate_flat_roof(input: &CalculatorInput) -> CalcResult<RoofSelection> {
    let system = input.system.ok_or_else(|| CalcError::missing_field("system"))?;

    if let Some(orientation) = input.orientation {
        let expected = if system.is_rv() { Orientation::Rv } else { Orientation::Pt };
        if orientation != expected {
            return Err(CalcError::invalid_input(
                "orientation",
                format!("{:?}", orientation),
                format!("System {} needs {:?} orientation", system.code(), expected),
            ));
        }
    }

    if system.is_rv() && input.rows_count % 2 != 0 {
        return Err(CalcError::invalid_input(
            "rowsCount",
            input.rows_count.to_string(),
            "RV systems need an even number of rows",
        ));
    }

    let allowed = allowed_constructions(system, input.module_length);
    let individual_order = allowed.is_empty();
    let construction_ok = if individual_order {
        input.module_construction == ModuleConstruction::Unspecified
    } else {
        allowed.contains(&input.module_construction)
    };
    if !construction_ok {
        return Err(CalcError::invalid_input(
            "moduleConstruction",
            input.module_construction.code(),
            format!(
                "{} with {}mm modules allows {:?}",
                system.code(),
                input.module_length,
                allowed.iter().map(|c| c.code()).collect::<Vec<_>>()
            ),
        ));
    }

    Ok(RoofSelection {
        allowed_constructions: allowed.to_vec(),
        allowed_mounting_methods: Vec::new(),
        needs_layout_tool: input.module_count % 2 != 0,
        individual_order,
    })
}

fn validate_pitched_roof(input: &CalculatorInput) -> CalcResult<RoofSelection> {
    let material = input
        .roof_material
        .ok_or_else(|| CalcError::missing_field("roofMaterial"))?;
    let method = input
        .mounting_method
        .ok_or_else(|| CalcError::missing_field("mountingMethod"))?;

    let allowed = material.allowed_mounting_methods();
    if !allowed.contains(&method) {
        return Err(CalcError::invalid_input(
            "mountingMethod",
            format!("{:?}", method),
            format!("Not available for {:?} roofs", material),
        ));
    }

    if let Some(orientation @ (Orientation::Pt | Orientation::Rv)) = input.orientation {
        return Err(CalcError::invalid_input(
            "orientation",
            format!("{:?}", orientation),
            "Pitched roofs are laid out vertical or horizontal",
        ));
    }

    Ok(RoofSelection {
        allowed_constructions: Vec::new(),
        allowed_mounting_methods: allowed.to_vec(),
        needs_layout_tool: false,
        individual_order: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RoofMaterial;

    fn flat(system: RoofSystem, modules: u32, length: f64) -> CalculatorInput {
        CalculatorInput::new(BatteryType::FlatRoof)
            .with_modules(modules, length)
            .with_rows(2)
            .with_system(system)
    }

    #[test]
    fn test_construction_table() {
        assert_eq!(allowed_constructions(RoofSystem::Rv10, 2000.0), &[ModuleConstruction::Short]);
        assert_eq!(allowed_constructions(RoofSystem::Rv10, 2001.0), &[ModuleConstruction::Both]);
        assert_eq!(allowed_constructions(RoofSystem::Rv10Z, 2300.0), &[ModuleConstruction::Short]);
        assert_eq!(allowed_constructions(RoofSystem::Pt15L, 2300.0), &[ModuleConstruction::Long]);
        assert_eq!(allowed_constructions(RoofSystem::Pt15L, 1700.0).len(), 2);
        assert!(allowed_constructions(RoofSystem::Pt5, 2300.0).is_empty());
        assert!(allowed_constructions(RoofSystem::Pt20, 2300.0).is_empty());
        assert_eq!(allowed_constructions(RoofSystem::Pt10, 2300.0), &[ModuleConstruction::Both]);
        assert_eq!(allowed_constructions(RoofSystem::Pt20, 1800.0), &[ModuleConstruction::Short]);
    }

    #[test]
    fn test_flat_roof_needs_system() {
        let input = CalculatorInput::new(BatteryType::FlatRoof).with_modules(10, 1700.0);
        let err = validate_roof_selection(&input).unwrap_err();
        assert_eq!(err, CalcError::missing_field("system"));
    }

    #[test]
    fn test_valid_flat_selection() {
        let input = flat(RoofSystem::Pt10, 21, 1722.0).with_construction(ModuleConstruction::Short);
        let selection = validate_roof_selection(&input).unwrap();
        assert!(selection.needs_layout_tool);
        assert!(!selection.individual_order);
    }

    #[test]
    fn test_wrong_construction_rejected() {
        let input = flat(RoofSystem::Rv10, 20, 1722.0).with_construction(ModuleConstruction::Both);
        assert!(validate_roof_selection(&input).is_err());
    }

    #[test]
    fn test_individual_order() {
        let input = flat(RoofSystem::Pt5, 20, 2300.0);
        let selection = validate_roof_selection(&input).unwrap();
        assert!(selection.individual_order);
        assert!(selection.allowed_constructions.is_empty());
    }

    #[test]
    fn test_rv_needs_even_rows() {
        let input = flat(RoofSystem::Rv10Z, 20, 1722.0)
            .with_rows(3)
            .with_construction(ModuleConstruction::Short);
        let err = validate_roof_selection(&input).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "rowsCount"));
    }

    #[test]
    fn test_orientation_must_match_system() {
        let input = flat(RoofSystem::Pt10, 20, 1722.0)
            .with_construction(ModuleConstruction::Short)
            .with_orientation(Orientation::Rv);
        assert!(validate_roof_selection(&input).is_err());
    }

    #[test]
    fn test_pitched_roof_method_constraint() {
        let ok = CalculatorInput::new(BatteryType::PitchedRoof)
            .with_modules(10, 1722.0)
            .with_roof(RoofMaterial::Bitumen, MountingMethod::Studs);
        validate_roof_selection(&ok).unwrap();

        let bad = CalculatorInput::new(BatteryType::PitchedRoof)
            .with_modules(10, 1722.0)
            .with_roof(RoofMaterial::Tile, MountingMethod::Studs);
        assert!(validate_roof_selection(&bad).is_err());

        let missing = CalculatorInput::new(BatteryType::PitchedRoof).with_modules(10, 1722.0);
        assert_eq!(
            validate_roof_selection(&missing).unwrap_err(),
            CalcError::missing_field("roofMaterial")
        );
    }
}
