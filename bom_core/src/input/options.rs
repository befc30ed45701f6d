//! Selector enums for [`CalculatorInput`](super::CalculatorInput).
//!
//! JSON spellings follow the calculator front end (`"ezys"`, `"ploksciasStogas"`,
//! `"screwsEPDM40"`, ...). English aliases are accepted on input.

use serde::{Deserialize, Serialize};

/// Installation type. Selects which catalog applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryType {
    /// Fence-style ground structure
    #[serde(rename = "ezys", alias = "ground-fence")]
    GroundFence,
    /// Pole-style ground structure (no rods or straps)
    #[serde(rename = "poline", alias = "ground-pole")]
    GroundPole,
    /// Ballasted flat-roof kit
    #[serde(rename = "ploksciasStogas", alias = "flat-roof")]
    FlatRoof,
    /// Rail system fastened into a pitched roof
    #[serde(rename = "slaitinisStogas", alias = "pitched-roof")]
    PitchedRoof,
}

impl BatteryType {
    pub const ALL: [BatteryType; 4] = [
        BatteryType::GroundFence,
        BatteryType::GroundPole,
        BatteryType::FlatRoof,
        BatteryType::PitchedRoof,
    ];

    pub fn is_ground(&self) -> bool {
        matches!(self, BatteryType::GroundFence | BatteryType::GroundPole)
    }

    /// JSON spelling
    pub fn code(&self) -> &'static str {
        match self {
            BatteryType::GroundFence => "ezys",
            BatteryType::GroundPole => "poline",
            BatteryType::FlatRoof => "ploksciasStogas",
            BatteryType::PitchedRoof => "slaitinisStogas",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BatteryType::GroundFence => "Ground (fence)",
            BatteryType::GroundPole => "Ground (pole)",
            BatteryType::FlatRoof => "Flat roof",
            BatteryType::PitchedRoof => "Pitched roof",
        }
    }
}

/// Panel orientation. Ground and flat-roof kits use PT/RV, pitched roofs use vertical/horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "PT")]
    Pt,
    #[serde(rename = "RV")]
    Rv,
    #[serde(rename = "vertical")]
    Vertical,
    #[serde(rename = "horizontal")]
    Horizontal,
}

/// Named flat-roof mounting kits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofSystem {
    #[serde(rename = "PT5")]
    Pt5,
    #[serde(rename = "PT10")]
    Pt10,
    #[serde(rename = "PT15")]
    Pt15,
    #[serde(rename = "PT20")]
    Pt20,
    #[serde(rename = "PT15-L")]
    Pt15L,
    #[serde(rename = "RV10")]
    Rv10,
    #[serde(rename = "RV10-Z")]
    Rv10Z,
}

impl RoofSystem {
    pub const ALL: [RoofSystem; 7] = [
        RoofSystem::Pt5,
        RoofSystem::Pt10,
        RoofSystem::Pt15,
        RoofSystem::Pt20,
        RoofSystem::Pt15L,
        RoofSystem::Rv10,
        RoofSystem::Rv10Z,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RoofSystem::Pt5 => "PT5",
            RoofSystem::Pt10 => "PT10",
            RoofSystem::Pt15 => "PT15",
            RoofSystem::Pt20 => "PT20",
            RoofSystem::Pt15L => "PT15-L",
            RoofSystem::Rv10 => "RV10",
            RoofSystem::Rv10Z => "RV10-Z",
        }
    }

    /// RV kits mount east-west in paired rows
    pub fn is_rv(&self) -> bool {
        matches!(self, RoofSystem::Rv10 | RoofSystem::Rv10Z)
    }
}

/// Which module side the clamps hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModuleConstruction {
    #[serde(rename = "ilgoji", alias = "long")]
    Long,
    #[serde(rename = "trumpoji", alias = "short")]
    Short,
    #[serde(rename = "abi", alias = "both")]
    Both,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl ModuleConstruction {
    pub fn code(&self) -> &'static str {
        match self {
            ModuleConstruction::Long => "ilgoji",
            ModuleConstruction::Short => "trumpoji",
            ModuleConstruction::Both => "abi",
            ModuleConstruction::Unspecified => "",
        }
    }
}

/// Pitched-roof covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofMaterial {
    #[serde(rename = "cement")]
    Cement,
    #[serde(rename = "valcuota", alias = "corrugated")]
    Corrugated,
    #[serde(rename = "cerpiu", alias = "tile")]
    Tile,
    #[serde(rename = "bitumine", alias = "bitumen")]
    Bitumen,
    #[serde(rename = "skarda", alias = "sheet-metal")]
    SheetMetal,
}

impl RoofMaterial {
    pub const ALL: [RoofMaterial; 5] = [
        RoofMaterial::Cement,
        RoofMaterial::Corrugated,
        RoofMaterial::Tile,
        RoofMaterial::Bitumen,
        RoofMaterial::SheetMetal,
    ];

    /// Fastening methods the covering supports
    pub fn allowed_mounting_methods(&self) -> &'static [MountingMethod] {
        match self {
            RoofMaterial::Cement => &[MountingMethod::Studs],
            RoofMaterial::Corrugated => &[MountingMethod::Clamps],
            RoofMaterial::Tile => &[MountingMethod::Hooks],
            RoofMaterial::Bitumen => &[MountingMethod::ScrewsR, MountingMethod::Studs],
            RoofMaterial::SheetMetal => &[
                MountingMethod::ScrewsR,
                MountingMethod::ScrewsEpdm40,
                MountingMethod::ScrewsEpdm80,
            ],
        }
    }

    /// The only method when there is no choice to make
    pub fn forced_mounting_method(&self) -> Option<MountingMethod> {
        match self.allowed_mounting_methods() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Pitched-roof fastening method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MountingMethod {
    #[serde(rename = "studs")]
    Studs,
    #[serde(rename = "clamps")]
    Clamps,
    #[serde(rename = "hooks")]
    Hooks,
    #[serde(rename = "screwsR")]
    ScrewsR,
    #[serde(rename = "screwsEPDM40")]
    ScrewsEpdm40,
    #[serde(rename = "screwsEPDM80")]
    ScrewsEpdm80,
}

impl MountingMethod {
    pub const ALL: [MountingMethod; 6] = [
        MountingMethod::Studs,
        MountingMethod::Clamps,
        MountingMethod::Hooks,
        MountingMethod::ScrewsR,
        MountingMethod::ScrewsEpdm40,
        MountingMethod::ScrewsEpdm80,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_spellings() {
        let t: BatteryType = serde_json::from_str("\"poline\"").unwrap();
        assert_eq!(t, BatteryType::GroundPole);
        let s: RoofSystem = serde_json::from_str("\"PT15-L\"").unwrap();
        assert_eq!(s, RoofSystem::Pt15L);
        let m: MountingMethod = serde_json::from_str("\"screwsEPDM80\"").unwrap();
        assert_eq!(m, MountingMethod::ScrewsEpdm80);
        let c: ModuleConstruction = serde_json::from_str("\"\"").unwrap();
        assert_eq!(c, ModuleConstruction::Unspecified);
    }

    #[test]
    fn test_english_aliases() {
        let t: BatteryType = serde_json::from_str("\"flat-roof\"").unwrap();
        assert_eq!(t, BatteryType::FlatRoof);
        let r: RoofMaterial = serde_json::from_str("\"sheet-metal\"").unwrap();
        assert_eq!(r, RoofMaterial::SheetMetal);
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"skarda\"");
    }

    #[test]
    fn test_roof_material_mounting_constraint() {
        assert_eq!(RoofMaterial::Cement.forced_mounting_method(), Some(MountingMethod::Studs));
        assert_eq!(RoofMaterial::Corrugated.forced_mounting_method(), Some(MountingMethod::Clamps));
        assert_eq!(RoofMaterial::Tile.forced_mounting_method(), Some(MountingMethod::Hooks));
        assert_eq!(RoofMaterial::Bitumen.forced_mounting_method(), None);
        assert!(RoofMaterial::SheetMetal
            .allowed_mounting_methods()
            .contains(&MountingMethod::ScrewsEpdm40));
        assert!(!RoofMaterial::SheetMetal
            .allowed_mounting_methods()
            .contains(&MountingMethod::Studs));
    }
}
