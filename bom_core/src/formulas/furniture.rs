//! Furniture formulas: loose hardware derived from the ground structure's
//! clamp and bolt-set quantities.
//!
//! Every clamp of either kind takes one M8 bolt, one spring washer, one
//! aluminium plate and one rhombic nut with its lock. M10 and M12 hardware
//! follows the bolt sets, with fence and pole structures counting M10 parts
//! differently.

use serde::{Deserialize, Serialize};

use super::registry::{Formula, FormulaCategory, FormulaEvaluator, FormulaMetadata, FormulaValue};
use crate::errors::CalcResult;
use crate::input::BatteryType;

/// Furniture formulas, one per furniture catalog line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureFormula {
    M8Bolt,
    M8SpringWasher,
    EndClamp,
    MidClamp,
    AluPlate,
    RhombicLock,
    RhombicNut,
    M10Bolt,
    M10Washer,
    M10FlangeNut,
    M12Bolt,
    M12Washer,
    M12SpringWasher,
    M12Nut,
}

pub static ALL_FURNITURE_FORMULAS: &[FurnitureFormula] = &[
    FurnitureFormula::M8Bolt,
    FurnitureFormula::M8SpringWasher,
    FurnitureFormula::EndClamp,
    FurnitureFormula::MidClamp,
    FurnitureFormula::AluPlate,
    FurnitureFormula::RhombicLock,
    FurnitureFormula::RhombicNut,
    FurnitureFormula::M10Bolt,
    FurnitureFormula::M10Washer,
    FurnitureFormula::M10FlangeNut,
    FurnitureFormula::M12Bolt,
    FurnitureFormula::M12Washer,
    FurnitureFormula::M12SpringWasher,
    FurnitureFormula::M12Nut,
];

impl FurnitureFormula {
    pub fn key(&self) -> &'static str {
        match self {
            FurnitureFormula::M8Bolt => "furniture_m8_bolt",
            FurnitureFormula::M8SpringWasher => "furniture_m8_spring_washer",
            FurnitureFormula::EndClamp => "furniture_end_clamp",
            FurnitureFormula::MidClamp => "furniture_mid_clamp",
            FurnitureFormula::AluPlate => "furniture_alu_plate",
            FurnitureFormula::RhombicLock => "furniture_rhombic_lock",
            FurnitureFormula::RhombicNut => "furniture_rhombic_nut",
            FurnitureFormula::M10Bolt => "furniture_m10_bolt",
            FurnitureFormula::M10Washer => "furniture_m10_washer",
            FurnitureFormula::M10FlangeNut => "furniture_m10_flange_nut",
            FurnitureFormula::M12Bolt => "furniture_m12_bolt",
            FurnitureFormula::M12Washer => "furniture_m12_washer",
            FurnitureFormula::M12SpringWasher => "furniture_m12_spring_washer",
            FurnitureFormula::M12Nut => "furniture_m12_nut",
        }
    }

    pub fn from_key(key: &str) -> Option<FurnitureFormula> {
        ALL_FURNITURE_FORMULAS.iter().copied().find(|formula| formula.key() == key)
    }

    pub(crate) fn compute(self, eval: &mut FormulaEvaluator<'_>) -> CalcResult<FormulaValue> {
        let fence = eval.input().battery_type == BatteryType::GroundFence;

        let value = match self {
            FurnitureFormula::EndClamp => eval.number(Formula::EndClampCount)?,
            FurnitureFormula::MidClamp => eval.number(Formula::InnerClampCount)?,
            FurnitureFormula::M8Bolt
            | FurnitureFormula::M8SpringWasher
            | FurnitureFormula::AluPlate
            | FurnitureFormula::RhombicLock
            | FurnitureFormula::RhombicNut => {
                eval.number(FurnitureFormula::EndClamp)? + eval.number(FurnitureFormula::MidClamp)?
            }
            FurnitureFormula::M10Bolt => {
                let first = eval.number(Formula::M10BoltSetsFirst)?;
                if fence {
                    first
                } else {
                    first + eval.number(Formula::M10BoltSetsSecond)?
                }
            }
            FurnitureFormula::M10Washer => {
                if fence {
                    eval.number(FurnitureFormula::M10Bolt)? * 2.0
                } else {
                    eval.number(Formula::M10BoltSetsFirst)? * 2.0 + eval.number(Formula::M10BoltSetsSecond)?
                }
            }
            FurnitureFormula::M10FlangeNut => eval.number(FurnitureFormula::M10Bolt)?,
            FurnitureFormula::M12Bolt | FurnitureFormula::M12SpringWasher | FurnitureFormula::M12Nut => {
                eval.number(Formula::M12BoltSets)?
            }
            FurnitureFormula::M12Washer => eval.number(Formula::M12BoltSets)? * 2.0,
        };
        Ok(FormulaValue::Number(value))
    }

    pub fn metadata(&self) -> FormulaMetadata {
        let (name, description, formula_plain) = match self {
            FurnitureFormula::M8Bolt => ("M8 Bolts", "One per clamp", "endClamps + innerClamps"),
            FurnitureFormula::M8SpringWasher => ("M8 Spring Washers", "One per clamp", "endClamps + innerClamps"),
            FurnitureFormula::EndClamp => ("End Clamps", "End clamps of the structure", "end_clamp_count"),
            FurnitureFormula::MidClamp => ("Inner Clamps", "Inner clamps of the structure", "inner_clamp_count"),
            FurnitureFormula::AluPlate => ("Aluminium Plates", "One per clamp", "endClamps + innerClamps"),
            FurnitureFormula::RhombicLock => ("Rhombic Nut Locks", "One per clamp", "endClamps + innerClamps"),
            FurnitureFormula::RhombicNut => ("Rhombic Nuts", "One per clamp", "endClamps + innerClamps"),
            FurnitureFormula::M10Bolt => (
                "M10 Bolts",
                "Bolts of the M10 bolt sets",
                "ezys: m10First, poline: m10First + m10Second",
            ),
            FurnitureFormula::M10Washer => (
                "M10 Washers",
                "Washers of the M10 bolt sets",
                "ezys: m10Bolts * 2, poline: m10First * 2 + m10Second",
            ),
            FurnitureFormula::M10FlangeNut => ("M10 Flange Nuts", "One per M10 bolt", "m10Bolts"),
            FurnitureFormula::M12Bolt => ("M12 Bolts", "One per M12 bolt set", "m12Sets"),
            FurnitureFormula::M12Washer => ("M12 Washers", "Two per M12 bolt set", "m12Sets * 2"),
            FurnitureFormula::M12SpringWasher => ("M12 Spring Washers", "One per M12 bolt set", "m12Sets"),
            FurnitureFormula::M12Nut => ("M12 Nuts", "One per M12 bolt set", "m12Sets"),
        };
        FormulaMetadata {
            name,
            description,
            formula_plain,
            category: FormulaCategory::Furniture,
            source_module: "formulas/furniture.rs",
            source_function: "FurnitureFormula::compute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CalculatorInput;

    fn eval_all(battery_type: BatteryType) -> Vec<f64> {
        let input = CalculatorInput::new(battery_type)
            .with_modules(36, 2250.0)
            .with_construction_length(21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        ALL_FURNITURE_FORMULAS
            .iter()
            .map(|formula| eval.number(*formula).unwrap())
            .collect()
    }

    #[test]
    fn test_fence_furniture() {
        // clamps 8 + 68, m10 first 96, second 6, m12 32
        let values = eval_all(BatteryType::GroundFence);
        assert_eq!(
            values,
            vec![76.0, 76.0, 8.0, 68.0, 76.0, 76.0, 76.0, 96.0, 192.0, 96.0, 32.0, 64.0, 32.0, 32.0]
        );
    }

    #[test]
    fn test_pole_furniture() {
        // m10 first 96, second 6 + 16, m12 16
        let values = eval_all(BatteryType::GroundPole);
        assert_eq!(values[7], 96.0 + 22.0);
        assert_eq!(values[8], 96.0 * 2.0 + 22.0);
        assert_eq!(values[9], 118.0);
        assert_eq!(values[10], 16.0);
        assert_eq!(values[11], 32.0);
    }

    #[test]
    fn test_keys_are_unique() {
        for formula in ALL_FURNITURE_FORMULAS {
            assert_eq!(FurnitureFormula::from_key(formula.key()), Some(*formula));
            assert!(Formula::from_key(formula.key()).is_none());
        }
    }
}
