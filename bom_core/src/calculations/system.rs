//! # Quantity Resolver
//!
//! Turns a [`CalculatorInput`] into the structure's BOM lines.
//!
//! ## Selection
//!
//! - **Ground** (`ezys`, `poline`): every row of the ground catalog, quantities
//!   from the formula registry.
//! - **Flat roof**: roof rows whose `systems` name the selected system and whose
//!   `orientation` / `construction` predicates (where declared) match.
//! - **Pitched roof**: roof rows whose `mounting_methods` name the selected
//!   method; flat-roof kit rows never apply. Each row is evaluated once per
//!   module row (`rowModuleCounts`) and summed.
//!
//! ## Resolution
//!
//! - Derived codes that evaluate to nothing become an empty code.
//! - Derived lengths that are not finite numbers become "no length".
//! - A quantity that is not a finite number fails the whole calculation,
//!   naming the formula or row.
//! - Rows with quantity exactly 0 are dropped unless
//!   [`ResolveOptions::drop_zero_quantities`] is off.
//!
//! ## Example
//!
//! ```rust
//! use bom_core::calculations::system::compute_system_materials;
//! use bom_core::input::{BatteryType, GroundLayout};
//!
//! let input = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0)
//!     .unwrap()
//!     .to_input();
//! let rows = compute_system_materials(&input).unwrap();
//!
//! let front_legs = rows.iter().find(|row| row.name == "Priekinė koja").unwrap();
//! assert_eq!(front_legs.code, "K-1E");
//! assert_eq!(front_legs.quantity, 8.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{CodeSpec, LengthSpec, MaterialDefinition, QuantitySpec, GROUND_CATALOG, ROOF_CATALOG};
use crate::errors::{CalcError, CalcResult};
use crate::formulas::FormulaEvaluator;
use crate::input::{BatteryType, CalculatorInput, LayoutOverrides};

/// Resolver switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Leave zero-quantity rows out of the BOM
    pub drop_zero_quantities: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            drop_zero_quantities: true,
        }
    }
}

/// One resolved BOM line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedSystemMaterial {
    pub code: String,
    pub name: String,
    pub quantity: f64,
    /// Stock length (mm), `None` when not applicable or unknown
    pub length: Option<f64>,
    pub note: String,
}

/// Resolve the structure's BOM with default options.
pub fn compute_system_materials(input: &CalculatorInput) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    compute_system_materials_with(input, ResolveOptions::default())
}

/// Resolve the structure's BOM.
pub fn compute_system_materials_with(
    input: &CalculatorInput,
    options: ResolveOptions,
) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    input.validate()?;
    let mut eval = FormulaEvaluator::new(input);
    resolve_system(&mut eval, options)
}

/// Resolve with an existing evaluator, sharing its cached formulas.
pub(crate) fn resolve_system(
    eval: &mut FormulaEvaluator<'_>,
    options: ResolveOptions,
) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    let input = eval.input();
    let rows = match input.battery_type {
        BatteryType::GroundFence | BatteryType::GroundPole => resolve_ground(eval)?,
        BatteryType::FlatRoof => resolve_flat_roof(eval)?,
        BatteryType::PitchedRoof => resolve_pitched_roof(eval)?,
    };

    let resolved = rows.len();
    let rows: Vec<_> = if options.drop_zero_quantities {
        rows.into_iter().filter(|row| row.quantity != 0.0).collect()
    } else {
        rows
    };

    tracing::debug!(
        battery_type = ?input.battery_type,
        resolved,
        kept = rows.len(),
        "resolved system materials"
    );
    Ok(rows)
}

fn resolve_ground(eval: &mut FormulaEvaluator<'_>) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    let input = eval.input();
    GROUND_CATALOG
        .iter()
        .map(|row| {
            let quantity = row_quantity(row, eval, input, &input.layout)?;
            finish_row(row, eval, quantity)
        })
        .collect()
}

fn resolve_flat_roof(eval: &mut FormulaEvaluator<'_>) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    let input = eval.input();
    let system = input.system.ok_or_else(|| CalcError::missing_field("system"))?;

    ROOF_CATALOG
        .iter()
        .filter(|row| row.applies_to_flat_roof(system, input.orientation, input.module_construction))
        .map(|row| {
            let quantity = row_quantity(row, eval, input, &input.layout)?;
            finish_row(row, eval, quantity)
        })
        .collect()
}

fn resolve_pitched_roof(eval: &mut FormulaEvaluator<'_>) -> CalcResult<Vec<CalculatedSystemMaterial>> {
    let input = eval.input();
    let method = input
        .mounting_method
        .ok_or_else(|| CalcError::missing_field("mountingMethod"))?;

    // One input per module row; rows may hold different module counts
    let row_inputs: Vec<CalculatorInput> = input
        .pitched_rows()
        .into_iter()
        .map(|count| {
            let mut row_input = input.clone();
            row_input.module_count = count;
            row_input
        })
        .collect();

    ROOF_CATALOG
        .iter()
        .filter(|row| row.applies_to_pitched_roof(method))
        .map(|row| {
            let quantity = match row.quantity {
                QuantitySpec::Registry(_) => row_quantity(row, eval, input, &input.layout)?,
                QuantitySpec::Inline(_) => row_inputs.iter().try_fold(0.0, |sum, row_input| {
                    Ok::<f64, CalcError>(sum + row_quantity(row, eval, row_input, &input.layout)?)
                })?,
            };
            finish_row(row, eval, quantity)
        })
        .collect()
}

/// Quantity of one row for one input, rejecting anything but a finite number.
fn row_quantity(
    row: &MaterialDefinition,
    eval: &mut FormulaEvaluator<'_>,
    input: &CalculatorInput,
    overrides: &LayoutOverrides,
) -> CalcResult<f64> {
    match row.quantity {
        QuantitySpec::Registry(formula) => eval.number(formula),
        QuantitySpec::Inline(quantity) => {
            let value = quantity(input, overrides);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(CalcError::non_finite(row.label(), value.to_string()))
            }
        }
    }
}

fn finish_row(
    row: &MaterialDefinition,
    eval: &mut FormulaEvaluator<'_>,
    quantity: f64,
) -> CalcResult<CalculatedSystemMaterial> {
    let code = match row.code {
        CodeSpec::Literal(code) => code.to_string(),
        CodeSpec::Derived(formula) => eval.evaluate(formula)?.to_code(),
    };
    let length = match row.length {
        LengthSpec::Fixed(length) => Some(length),
        LengthSpec::NotApplicable => None,
        LengthSpec::Derived(formula) => eval.evaluate(formula)?.to_length(),
    };

    if quantity < 0.0 {
        tracing::warn!(row = row.label(), quantity, "negative quantity");
    }
    tracing::debug!(code = %code, name = row.name, quantity, length = ?length, "resolved row");

    Ok(CalculatedSystemMaterial {
        code,
        name: row.name.to_string(),
        quantity,
        length,
        note: row.note.unwrap_or_default().to_string(),
    })
}
