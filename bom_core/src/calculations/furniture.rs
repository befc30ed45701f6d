//! # Furniture Resolver
//!
//! Loose hardware for ground structures, one line per furniture catalog
//! entry. Zero quantities are kept so the list always has the same shape.

use serde::{Deserialize, Serialize};

use crate::catalog::FURNITURE_CATALOG;
use crate::errors::{CalcError, CalcResult};
use crate::formulas::FormulaEvaluator;
use crate::input::CalculatorInput;

/// One resolved furniture line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedFurnitureMaterial {
    pub name: String,
    pub quantity: f64,
    pub note: String,
}

/// Resolve the furniture list of a ground structure.
///
/// # Errors
///
/// `InvalidInput` for roof battery types, which have no furniture list.
pub fn compute_furniture_materials(input: &CalculatorInput) -> CalcResult<Vec<CalculatedFurnitureMaterial>> {
    input.validate()?;
    let mut eval = FormulaEvaluator::new(input);
    resolve_furniture(&mut eval)
}

pub(crate) fn resolve_furniture(eval: &mut FormulaEvaluator<'_>) -> CalcResult<Vec<CalculatedFurnitureMaterial>> {
    let battery_type = eval.input().battery_type;
    if !battery_type.is_ground() {
        return Err(CalcError::invalid_input(
            "batteryType",
            battery_type.code(),
            "Furniture is only listed for ground structures",
        ));
    }

    let rows = FURNITURE_CATALOG
        .iter()
        .map(|row| {
            Ok(CalculatedFurnitureMaterial {
                name: row.name.to_string(),
                quantity: eval.number(row.quantity)?,
                note: row.note.unwrap_or_default().to_string(),
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    tracing::debug!(?battery_type, rows = rows.len(), "resolved furniture");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BatteryType, GroundLayout};

    fn quantity(rows: &[CalculatedFurnitureMaterial], name: &str) -> f64 {
        rows.iter().find(|row| row.name == name).unwrap().quantity
    }

    #[test]
    fn test_fence_furniture() {
        let input = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0)
            .unwrap()
            .to_input();
        let rows = compute_furniture_materials(&input).unwrap();
        assert_eq!(rows.len(), 14);
        assert_eq!(quantity(&rows, "M8 varžtas"), 76.0);
        assert_eq!(quantity(&rows, "Prispaudėjas galinis"), 8.0);
        assert_eq!(quantity(&rows, "Prispaudėjas vidinis"), 68.0);
        assert_eq!(quantity(&rows, "M10 poveržlės"), 192.0);
        assert_eq!(quantity(&rows, "M12 poveržlė"), 64.0);
    }

    #[test]
    fn test_names_follow_catalog_order() {
        let input = GroundLayout::new(BatteryType::GroundPole, 20, 1800.0, 30.0)
            .unwrap()
            .to_input();
        let rows = compute_furniture_materials(&input).unwrap();
        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        let expected: Vec<&str> = FURNITURE_CATALOG.iter().map(|row| row.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_roofs_have_no_furniture() {
        let input = CalculatorInput::new(BatteryType::FlatRoof).with_modules(20, 1722.0);
        let err = compute_furniture_materials(&input).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "batteryType"));
    }
}
