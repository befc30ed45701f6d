//! Furniture catalog for ground structures.

use once_cell::sync::Lazy;

use crate::formulas::FurnitureFormula;

/// One furniture line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnitureDefinition {
    pub name: &'static str,
    pub quantity: FurnitureFormula,
    pub note: Option<&'static str>,
}

impl FurnitureDefinition {
    pub const fn new(name: &'static str, quantity: FurnitureFormula) -> Self {
        Self { name, quantity, note: None }
    }
}

pub static FURNITURE_CATALOG: Lazy<Vec<FurnitureDefinition>> = Lazy::new(|| {
    use FurnitureFormula::*;

    vec![
        FurnitureDefinition::new("M8 varžtas", M8Bolt),
        FurnitureDefinition::new("M8 spyruoklinė poveržlė", M8SpringWasher),
        FurnitureDefinition::new("Prispaudėjas galinis", EndClamp),
        FurnitureDefinition::new("Prispaudėjas vidinis", MidClamp),
        FurnitureDefinition::new("Aliuminio plokštelė", AluPlate),
        FurnitureDefinition::new("Rombinės veržlės fiksatorius", RhombicLock),
        FurnitureDefinition::new("Rombinė veržlė", RhombicNut),
        FurnitureDefinition::new("M10 varžtas", M10Bolt),
        FurnitureDefinition::new("M10 poveržlės", M10Washer),
        FurnitureDefinition::new("M10 veržlė su sijonėliu", M10FlangeNut),
        FurnitureDefinition::new("M12 varžtas", M12Bolt),
        FurnitureDefinition::new("M12 poveržlė", M12Washer),
        FurnitureDefinition::new("M12 spyruoklinė poveržlė", M12SpringWasher),
        FurnitureDefinition::new("M12 veržlė", M12Nut),
    ]
});
