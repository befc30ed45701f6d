//! End-to-end properties of the BOM engine, exercised through the public API.

use bom_core::calculations::{calculate, compute_system_materials, compute_system_materials_with, ResolveOptions};
use bom_core::formulas::{Formula, FormulaEvaluator};
use bom_core::input::{BatteryType, CalculatorInput, LayoutOverrides, RoofSystem};
use bom_core::CalcError;

fn ground(battery_type: BatteryType, modules: u32, construction_length: f64) -> CalculatorInput {
    CalculatorInput::new(battery_type)
        .with_modules(modules, 1722.0)
        .with_construction_length(construction_length)
}

fn flat(system: RoofSystem, modules: u32) -> CalculatorInput {
    CalculatorInput::new(BatteryType::FlatRoof)
        .with_modules(modules, 1722.0)
        .with_rows(2)
        .with_system(system)
}

fn legs(construction_length: f64) -> Result<f64, CalcError> {
    let input = ground(BatteryType::GroundFence, 20, construction_length);
    FormulaEvaluator::new(&input).number(Formula::LegCount)
}

#[test]
fn test_leg_lookup_takes_first_matching_bucket() {
    assert_eq!(legs(4300.0).unwrap(), 2.0);
    assert_eq!(legs(4301.0).unwrap(), 3.0);
}

#[test]
fn test_leg_lookup_upper_bound() {
    assert_eq!(legs(32000.0).unwrap(), 12.0);
    assert!(matches!(legs(32001.0), Err(CalcError::RangeExceeded { .. })));

    let over = ground(BatteryType::GroundFence, 54, 32001.0);
    assert!(matches!(calculate(&over), Err(CalcError::RangeExceeded { .. })));
}

#[test]
fn test_extra_batten_length_clamp() {
    let extra = |length: f64| {
        let input = ground(BatteryType::GroundFence, 20, length);
        FormulaEvaluator::new(&input).number(Formula::ExtraBattenLength).unwrap()
    };
    assert_eq!(extra(4200.0), 0.0);
    assert_eq!(extra(4250.0), 300.0);
    assert_eq!(extra(4600.0), 400.0);
}

#[test]
fn test_pole_structures_have_no_rods() {
    for length in [4300.0, 12000.0, 21000.0, 32000.0] {
        let input = ground(BatteryType::GroundPole, 36, length);
        assert_eq!(FormulaEvaluator::new(&input).number(Formula::RodCount).unwrap(), 0.0);

        let rows = compute_system_materials(&input).unwrap();
        assert!(rows.iter().all(|row| row.name != "Strypai"));
    }

    let fence = ground(BatteryType::GroundFence, 36, 21000.0);
    let rows = compute_system_materials(&fence).unwrap();
    assert!(rows.iter().any(|row| row.name == "Strypai"));
}

#[test]
fn test_calculation_is_idempotent() {
    let inputs = [
        ground(BatteryType::GroundFence, 36, 21000.0),
        flat(RoofSystem::Pt10, 21),
        flat(RoofSystem::Rv10, 20),
    ];
    for input in &inputs {
        let first = calculate(input).unwrap().to_json().unwrap();
        let second = calculate(input).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_pt5_rows_exclude_other_kits() {
    let input = CalculatorInput::new(BatteryType::FlatRoof)
        .with_modules(20, 2100.0)
        .with_rows(2)
        .with_system(RoofSystem::Pt5);
    let rows = compute_system_materials(&input).unwrap();

    assert!(rows.iter().all(|row| !row.code.starts_with("PT10")));
    assert!(rows.iter().any(|row| row.code == "PT5-1"));
    // PT5 / PT20 shared rows
    assert_eq!(
        rows.iter().filter(|row| row.code == "Užsakyti individualiai").count(),
        2
    );
}

#[test]
fn test_even_layout_ignores_overrides() {
    let overrides = LayoutOverrides {
        holder_p: Some(99),
        ..Default::default()
    };
    let input = flat(RoofSystem::Pt10, 20).with_overrides(overrides);
    let rows = compute_system_materials(&input).unwrap();
    let front = rows.iter().find(|row| row.code == "PT10-1").unwrap();
    assert_eq!(front.quantity, 21.0);
}

#[test]
fn test_odd_layout_uses_overrides() {
    let overrides = LayoutOverrides {
        holder_p: Some(12),
        ..Default::default()
    };
    let input = flat(RoofSystem::Pt10, 21).with_overrides(overrides);
    let rows = compute_system_materials(&input).unwrap();
    let front = rows.iter().find(|row| row.code == "PT10-1").unwrap();
    assert_eq!(front.quantity, 12.0);
}

#[test]
fn test_odd_layout_without_overrides_yields_zero() {
    let input = flat(RoofSystem::Pt10, 21);

    let dropped = compute_system_materials(&input).unwrap();
    assert!(dropped.iter().all(|row| row.code != "PT10-1"));

    let options = ResolveOptions {
        drop_zero_quantities: false,
    };
    let kept = compute_system_materials_with(&input, options).unwrap();
    let front = kept.iter().find(|row| row.code == "PT10-1").unwrap();
    assert_eq!(front.quantity, 0.0);
}

#[test]
fn test_ground_clamp_counts() {
    for modules in [2, 8, 20, 36, 54] {
        let input = ground(BatteryType::GroundFence, modules, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        assert_eq!(eval.number(Formula::EndClampCount).unwrap(), 8.0);

        let inner = eval.number(Formula::InnerClampCount).unwrap();
        assert_eq!(inner, (f64::from(modules) - 2.0) * 2.0);
        assert!(inner >= 0.0);
    }
}

#[test]
fn test_single_module_inner_clamps_go_negative() {
    let input = ground(BatteryType::GroundFence, 1, 4700.0);
    let inner = FormulaEvaluator::new(&input).number(Formula::InnerClampCount).unwrap();
    assert_eq!(inner, -2.0);
}
