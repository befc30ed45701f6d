//! # Roof Catalog
//!
//! Flat-roof kit rows (PT5, PT10, PT15, PT20, PT15-L, RV10, RV10-Z) followed
//! by pitched-roof rail rows. Quantities are computed per row from the input.
//!
//! ## Flat roofs
//!
//! `n` = module count, `r` = rows. Holder and clamp rows pair modules across
//! columns, so their closed forms hold for even `n` only; odd layouts read the
//! layout tool's counter instead (see [`even_or_override`]).
//!
//! | Counter | Rows |
//! |---------|------|
//! | `holderPCount` | front holders (PT) |
//! | `holderGCount` | back holders (PT), RV10 front/back holders, RV10-Z and PT15-L holders |
//! | `holderVCount` | middle holders (PT) |
//! | `holderVACount` | RV10 high middle holders |
//! | `holderVZCount` | RV10 low middle holders |
//! | `clampGCount` | end clamps |
//! | `clampVCount` | inner clamps |
//!
//! M8x30 bolts follow the clamps, so they sum the two clamp counters.
//!
//! ## Pitched roofs
//!
//! Rows are named by resource key (`materials.squareRail`, ...). The
//! resolver evaluates them once per module row.

use once_cell::sync::Lazy;

use super::MaterialDefinition;
use crate::formulas::roof::{
    auxiliary_holder_count, epdm40_rail_count, epdm80_rail_count, epdm_special_screw_count, m10_screw_count,
    mini_rail_count, module_side_along_rail, pitched_inner_clamp_count, rail_span, square_rail_count,
    square_rail_joint_count, stud_count, PITCHED_END_CLAMPS, SQUARE_RAIL_END_CAPS,
};
use crate::input::{
    even_or_override, CalculatorInput, LayoutOverrides, ModuleConstruction, MountingMethod, OverrideSlot, RoofSystem,
};

/// Code of rows that have to be ordered individually
pub const INDIVIDUAL_ORDER_CODE: &str = "Užsakyti individualiai";

const PT_SYSTEMS: &[RoofSystem] = &[RoofSystem::Pt5, RoofSystem::Pt10, RoofSystem::Pt15, RoofSystem::Pt20];
const RV_SYSTEMS: &[RoofSystem] = &[RoofSystem::Rv10, RoofSystem::Rv10Z];

const RAIL_METHODS: &[MountingMethod] = &[MountingMethod::Studs, MountingMethod::Clamps, MountingMethod::Hooks];
const EPDM_METHODS: &[MountingMethod] = &[MountingMethod::ScrewsEpdm40, MountingMethod::ScrewsEpdm80];

fn n(input: &CalculatorInput) -> f64 {
    f64::from(input.module_count)
}

fn r(input: &CalculatorInput) -> f64 {
    f64::from(input.rows_count)
}

fn span(input: &CalculatorInput) -> f64 {
    rail_span(module_side_along_rail(input), input.module_count)
}

// ============================================================================
// Flat-roof quantities
// ============================================================================

fn holder(input: &CalculatorInput, overrides: &LayoutOverrides, closed_form: f64, slot: OverrideSlot) -> f64 {
    even_or_override(input.module_count, closed_form, overrides, slot)
}

fn end_clamps(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    even_or_override(input.module_count, r(input) * 2.0 * 2.0, overrides, OverrideSlot::ClampG)
}

fn inner_clamps(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    even_or_override(
        input.module_count,
        (n(input) - 1.0) * (r(input) * 2.0),
        overrides,
        OverrideSlot::ClampV,
    )
}

fn clamp_bolts(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    end_clamps(input, overrides) + inner_clamps(input, overrides)
}

fn front_holders(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    holder(input, overrides, n(input) + 1.0, OverrideSlot::HolderP)
}

fn back_holders(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    holder(input, overrides, n(input) + 1.0, OverrideSlot::HolderG)
}

fn middle_holders(input: &CalculatorInput, overrides: &LayoutOverrides) -> f64 {
    holder(input, overrides, (n(input) + 1.0) * (r(input) - 1.0), OverrideSlot::HolderV)
}

fn auxiliary_holders(input: &CalculatorInput, _: &LayoutOverrides) -> f64 {
    auxiliary_holder_count(input.module_length, input.module_count, input.rows_count)
}

fn ballast_boards(input: &CalculatorInput, _: &LayoutOverrides) -> f64 {
    n(input) * r(input)
}

fn ballast_board_screws(input: &CalculatorInput, _: &LayoutOverrides) -> f64 {
    (n(input) + 1.0) * 2.0 * (r(input) - 1.0)
}

fn flat_rows() -> Vec<MaterialDefinition> {
    use RoofSystem::*;

    vec![
        // RV10 / RV10-Z
        MaterialDefinition::flat(&[Rv10], "RV10-1", "Priekinis/galinis laikiklis", |i, o| {
            holder(i, o, (n(i) + 1.0) * 2.0, OverrideSlot::HolderG)
        }),
        MaterialDefinition::flat(&[Rv10], "RV10-2", "Vidurinis (jungiamasis) laikiklis aukštas", |i, o| {
            holder(i, o, (n(i) + 1.0) * (r(i) / 2.0), OverrideSlot::HolderVa)
        }),
        MaterialDefinition::flat(&[Rv10], "RV10-4", "Vidurinis (jungiamasis) laikiklis žemas", |i, o| {
            holder(i, o, (n(i) + 1.0) * (r(i) / 2.0 - 1.0), OverrideSlot::HolderVz)
        }),
        MaterialDefinition::flat(&[Rv10], "RV10-1(P)", "Pagalbinis priekinis laikiklis", auxiliary_holders),
        MaterialDefinition::flat(
            &[Rv10],
            "RV10-2(P)",
            "Pagalbinis vidurinis (jungiamasis) laikiklis aukštas",
            |i, o| auxiliary_holders(i, o) / 2.0,
        ),
        MaterialDefinition::flat(RV_SYSTEMS, "", "Prispaudėjas galinis", end_clamps),
        MaterialDefinition::flat(RV_SYSTEMS, "", "Prispaudėjas vidinis", inner_clamps),
        MaterialDefinition::flat(RV_SYSTEMS, "", "M8x30 varžtas", clamp_bolts),
        MaterialDefinition::flat(&[Rv10Z], "RV10-Z", "Dvigubo greito montavimo laikiklis", |i, o| {
            holder(i, o, (n(i) + 1.0) * r(i) / 2.0, OverrideSlot::HolderG)
        }),
        // PT10
        MaterialDefinition::flat(&[Pt10], "PT10-1", "Priekinis laikiklis", front_holders),
        MaterialDefinition::flat(&[Pt10], "PT10-4", "Galinis laikiklis", back_holders),
        MaterialDefinition::flat(&[Pt10], "PT10-2", "Vidurinis (jungiamasis) laikiklis", middle_holders),
        MaterialDefinition::flat(&[Pt10], "PT10-1(P)", "Pagalbinis priekinis laikiklis", auxiliary_holders),
        MaterialDefinition::flat(&[Pt10], "PT10-4(P)", "Pagalbinis galinis laikiklis", auxiliary_holders),
        // PT15
        MaterialDefinition::flat(&[Pt15], "PT15-1", "Priekinis laikiklis", front_holders),
        MaterialDefinition::flat(&[Pt15], "PT15-3", "Galinis laikiklis", back_holders),
        MaterialDefinition::flat(&[Pt15], "PT15-4", "Vidurinis (jungiamasis) laikiklis", middle_holders),
        MaterialDefinition::flat(&[Pt15], "PT15-1(P)", "Pagalbinis priekinis laikiklis", auxiliary_holders),
        MaterialDefinition::flat(&[Pt15], "PT15-3(P)", "Pagalbinis galinis laikiklis", auxiliary_holders),
        // PT20
        MaterialDefinition::flat(&[Pt20], "PT20-1", "Priekinis laikiklis", front_holders),
        MaterialDefinition::flat(&[Pt20], "PT20-3", "Galinis laikiklis", back_holders),
        MaterialDefinition::flat(&[Pt20], "PT20-2", "Vidurinis (jungiamasis) laikiklis", middle_holders),
        // PT15-L, long side
        MaterialDefinition::flat(&[Pt15L], "PT15-L", "Viengubo montavimo laikiklis", |i, o| {
            holder(i, o, n(i) * r(i) * 2.0, OverrideSlot::HolderG)
        })
        .with_construction(&[ModuleConstruction::Long]),
        MaterialDefinition::flat(&[Pt15L], "", "Vejalentė", ballast_boards)
            .with_construction(&[ModuleConstruction::Long]),
        MaterialDefinition::flat(&[Pt15L], "", "Savisriegiai varžtai vejalentėm", |i, _| n(i) * r(i) * 4.0)
            .with_construction(&[ModuleConstruction::Long]),
        MaterialDefinition::flat(&[Pt15L], "", "Prispaudėjas galinis", |i, o| {
            even_or_override(i.module_count, n(i) * 2.0 * (r(i) * 2.0), o, OverrideSlot::ClampG)
        })
        .with_construction(&[ModuleConstruction::Long]),
        MaterialDefinition::flat(&[Pt15L], "", "M8x30 varžtas", |i, o| {
            even_or_override(i.module_count, n(i) * 2.0 * (r(i) * 2.0), o, OverrideSlot::ClampG)
        })
        .with_construction(&[ModuleConstruction::Long]),
        // PT15-L, short side
        MaterialDefinition::flat(&[Pt15L], "PT15-L", "Viengubo montavimo laikiklis", |i, o| {
            holder(i, o, (n(i) + 1.0) * r(i), OverrideSlot::HolderG)
        })
        .with_construction(&[ModuleConstruction::Short]),
        MaterialDefinition::flat(&[Pt15L], "", "Vejalentė", ballast_boards)
            .with_construction(&[ModuleConstruction::Short]),
        MaterialDefinition::flat(&[Pt15L], "", "Savisriegiai varžtai vejalentėm", ballast_board_screws)
            .with_construction(&[ModuleConstruction::Short]),
        MaterialDefinition::flat(&[Pt15L], "", "Prispaudėjas galinis", end_clamps)
            .with_construction(&[ModuleConstruction::Short]),
        MaterialDefinition::flat(&[Pt15L], "", "Prispaudėjas vidinis", inner_clamps)
            .with_construction(&[ModuleConstruction::Short]),
        MaterialDefinition::flat(&[Pt15L], "", "M8x30 varžtas", clamp_bolts)
            .with_construction(&[ModuleConstruction::Short]),
        // PT5
        MaterialDefinition::flat(&[Pt5], "PT5-1", "Priekinis laikiklis", front_holders),
        MaterialDefinition::flat(&[Pt5], "PT5-3", "Galinis laikiklis", back_holders),
        MaterialDefinition::flat(&[Pt5], "PT5-2", "Vidurinis (jungiamasis) laikiklis", middle_holders),
        // PT5 / PT20 auxiliary holders are not stocked
        MaterialDefinition::flat(&[Pt5, Pt20], INDIVIDUAL_ORDER_CODE, "Pagalbinis priekinis laikiklis", auxiliary_holders),
        MaterialDefinition::flat(&[Pt5, Pt20], INDIVIDUAL_ORDER_CODE, "Pagalbinis galinis laikiklis", auxiliary_holders),
        // Shared by the PT kits
        MaterialDefinition::flat(PT_SYSTEMS, "", "Vejalentė", ballast_boards),
        MaterialDefinition::flat(PT_SYSTEMS, "", "Savisriegiai varžtai vejalentėm", ballast_board_screws),
        MaterialDefinition::flat(PT_SYSTEMS, "", "Prispaudėjas galinis", end_clamps),
        MaterialDefinition::flat(PT_SYSTEMS, "", "Prispaudėjas vidinis", inner_clamps),
        MaterialDefinition::flat(PT_SYSTEMS, "", "M8x30 varžtas", clamp_bolts),
    ]
}

// ============================================================================
// Pitched-roof quantities
// ============================================================================

fn pitched_rows() -> Vec<MaterialDefinition> {
    use MountingMethod::*;

    vec![
        MaterialDefinition::pitched(RAIL_METHODS, "materials.squareRail", |i, _| square_rail_count(span(i))),
        MaterialDefinition::pitched(RAIL_METHODS, "materials.squareRailJoint", |i, _| {
            square_rail_joint_count(square_rail_count(span(i)))
        }),
        MaterialDefinition::pitched(RAIL_METHODS, "materials.squareRailFinish", |_, _| SQUARE_RAIL_END_CAPS),
        MaterialDefinition::pitched(RAIL_METHODS, "materials.m10Screw", |i, _| m10_screw_count(span(i))),
        MaterialDefinition::pitched(RAIL_METHODS, "materials.m10Nut", |i, _| m10_screw_count(span(i))),
        MaterialDefinition::pitched(RAIL_METHODS, "materials.studs", |i, _| stud_count(span(i))),
        MaterialDefinition::pitched(&[ScrewsR], "materials.railEDPMMini", |i, _| mini_rail_count(i.module_count)),
        MaterialDefinition::pitched(&[ScrewsR], "materials.specScrew", |i, _| {
            mini_rail_count(i.module_count) * 4.0
        }),
        MaterialDefinition::pitched(&[ScrewsEpdm40], "materials.railEDPM40", |i, _| epdm40_rail_count(span(i))),
        MaterialDefinition::pitched(&[ScrewsEpdm80], "materials.railEDPM80", |i, _| epdm80_rail_count(span(i))),
        MaterialDefinition::pitched(EPDM_METHODS, "materials.specScrew", |i, _| epdm_special_screw_count(span(i))),
        MaterialDefinition::pitched(&MountingMethod::ALL, "materials.clampG", |_, _| PITCHED_END_CLAMPS),
        MaterialDefinition::pitched(&MountingMethod::ALL, "materials.m8Screw20", |_, _| PITCHED_END_CLAMPS),
        MaterialDefinition::pitched(&MountingMethod::ALL, "materials.clampV", |i, _| {
            pitched_inner_clamp_count(i.module_count)
        }),
        MaterialDefinition::pitched(&MountingMethod::ALL, "materials.m8Screw", |i, _| {
            pitched_inner_clamp_count(i.module_count)
        }),
        MaterialDefinition::pitched(&MountingMethod::ALL, "materials.m8Nut", |i, _| {
            pitched_inner_clamp_count(i.module_count) + 4.0
        }),
    ]
}

pub static ROOF_CATALOG: Lazy<Vec<MaterialDefinition>> = Lazy::new(|| {
    let mut rows = flat_rows();
    rows.extend(pitched_rows());
    rows
});
