//! # Formula Registry
//!
//! Every derived value of the ground structure (leg codes, counts, batten
//! lengths, bolt sets) and of the furniture list is a named formula. Catalog
//! rows refer to formulas by [`FormulaId`] and a [`FormulaEvaluator`]
//! computes them for one input.
//!
//! ## Architecture
//!
//! - [`Formula`] / [`FurnitureFormula`] identify formulas; each has a stable
//!   snake_case key for the string-keyed interface.
//! - Formulas may depend on other formulas. The evaluator memoizes every
//!   value for the lifetime of one input and keeps a stack of formulas still
//!   being computed; re-entering one of them is a [`CalcError::FormulaCycle`].
//! - [`FormulaId::metadata`] documents each formula, and
//!   [`generate_formulas_markdown`] renders the whole registry.
//!
//! ## Usage
//!
//! ```rust
//! use bom_core::formulas::{Formula, FormulaEvaluator};
//! use bom_core::input::{BatteryType, CalculatorInput};
//!
//! let input = CalculatorInput::new(BatteryType::GroundFence)
//!     .with_modules(36, 2250.0)
//!     .with_construction_length(21000.0);
//!
//! let mut eval = FormulaEvaluator::new(&input);
//! assert_eq!(eval.number(Formula::LegCount).unwrap(), 8.0);
//! assert_eq!(eval.evaluate_key("front_leg_code").unwrap().to_code(), "K-1E");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::furniture::{FurnitureFormula, ALL_FURNITURE_FORMULAS};
use super::ground;
use crate::errors::{CalcError, CalcResult};
use crate::input::{BatteryType, CalculatorInput};

/// Fixed number of end clamp sets on a ground structure
pub const GROUND_END_CLAMPS: f64 = 8.0;

// ============================================================================
// Formula Values
// ============================================================================

/// Result of one formula: a number, a text code, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormulaValue {
    Number(f64),
    Text(String),
    Null,
}

impl FormulaValue {
    /// Finite numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Value rendered as a product code. `Null` becomes an empty code.
    pub fn to_code(&self) -> String {
        match self {
            FormulaValue::Number(value) => value.to_string(),
            FormulaValue::Text(text) => text.clone(),
            FormulaValue::Null => String::new(),
        }
    }

    /// Value as a length. Anything that is not a finite number means
    /// "not applicable".
    pub fn to_length(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(value) if value.is_finite() => Some(*value),
            FormulaValue::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaValue::Number(value) => write!(f, "{}", value),
            FormulaValue::Text(text) => write!(f, "\"{}\"", text),
            FormulaValue::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for FormulaValue {
    fn from(value: f64) -> Self {
        FormulaValue::Number(value)
    }
}

impl From<u32> for FormulaValue {
    fn from(value: u32) -> Self {
        FormulaValue::Number(f64::from(value))
    }
}

impl From<&str> for FormulaValue {
    fn from(value: &str) -> Self {
        FormulaValue::Text(value.to_string())
    }
}

impl From<Option<f64>> for FormulaValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FormulaValue::Null, FormulaValue::Number)
    }
}

// ============================================================================
// Formula Categories
// ============================================================================

/// Groups for the formula reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Leg codes, lengths and counts
    Legs,
    /// Connectors and rods
    Bracing,
    /// Rafter code and length
    Rafters,
    /// Battens, extra battens and joints
    Battens,
    /// Bolt sets
    Bolts,
    /// Module clamps
    Clamps,
    /// Loose hardware derived from the system quantities
    Furniture,
}

impl FormulaCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Legs => "Legs",
            FormulaCategory::Bracing => "Bracing",
            FormulaCategory::Rafters => "Rafters",
            FormulaCategory::Battens => "Battens",
            FormulaCategory::Bolts => "Bolt Sets",
            FormulaCategory::Clamps => "Clamps",
            FormulaCategory::Furniture => "Furniture",
        }
    }

    /// Sort order for the reference (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::Legs => 1,
            FormulaCategory::Bracing => 2,
            FormulaCategory::Rafters => 3,
            FormulaCategory::Battens => 4,
            FormulaCategory::Bolts => 5,
            FormulaCategory::Clamps => 6,
            FormulaCategory::Furniture => 7,
        }
    }

    pub fn all() -> Vec<FormulaCategory> {
        use FormulaCategory::*;
        let mut categories = vec![Legs, Bracing, Rafters, Battens, Bolts, Clamps, Furniture];
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Documentation of one formula.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the value is used for
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub category: FormulaCategory,
    /// Source module where the formula lives
    pub source_module: &'static str,
    /// Function implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// System Formulas
// ============================================================================

/// Ground structure formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    FrontLegCode,
    RearLegCode,
    FrontLegLength,
    RearLegLength,
    LegCount,
    ConnectorCount,
    RafterCode,
    RafterLength,
    BattenCount,
    ExtraBattenLength,
    ExtraBattenCount,
    BattenJointCount,
    RodCount,
    ConnectorR2Count,
    M10BoltSetsFirst,
    M10BoltSetsSecond,
    M12BoltSets,
    EndClampCount,
    InnerClampCount,
}

/// All ground formulas, in reference order
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::FrontLegCode,
    Formula::RearLegCode,
    Formula::FrontLegLength,
    Formula::RearLegLength,
    Formula::LegCount,
    Formula::ConnectorCount,
    Formula::RodCount,
    Formula::ConnectorR2Count,
    Formula::RafterCode,
    Formula::RafterLength,
    Formula::BattenCount,
    Formula::ExtraBattenLength,
    Formula::ExtraBattenCount,
    Formula::BattenJointCount,
    Formula::M10BoltSetsFirst,
    Formula::M10BoltSetsSecond,
    Formula::M12BoltSets,
    Formula::EndClampCount,
    Formula::InnerClampCount,
];

impl Formula {
    /// Stable registry key
    pub fn key(&self) -> &'static str {
        match self {
            Formula::FrontLegCode => "front_leg_code",
            Formula::RearLegCode => "rear_leg_code",
            Formula::FrontLegLength => "front_leg_length",
            Formula::RearLegLength => "rear_leg_length",
            Formula::LegCount => "leg_count",
            Formula::ConnectorCount => "connector_count",
            Formula::RafterCode => "rafter_code",
            Formula::RafterLength => "rafter_length",
            Formula::BattenCount => "batten_count",
            Formula::ExtraBattenLength => "extra_batten_length",
            Formula::ExtraBattenCount => "extra_batten_count",
            Formula::BattenJointCount => "batten_joint_count",
            Formula::RodCount => "rod_count",
            Formula::ConnectorR2Count => "connector_r2_count",
            Formula::M10BoltSetsFirst => "m10_bolt_sets_first",
            Formula::M10BoltSetsSecond => "m10_bolt_sets_second",
            Formula::M12BoltSets => "m12_bolt_sets",
            Formula::EndClampCount => "end_clamp_count",
            Formula::InnerClampCount => "inner_clamp_count",
        }
    }

    pub fn from_key(key: &str) -> Option<Formula> {
        ALL_FORMULAS.iter().copied().find(|formula| formula.key() == key)
    }

    fn compute(self, eval: &mut FormulaEvaluator<'_>) -> CalcResult<FormulaValue> {
        let input = eval.input;
        let fence = input.battery_type == BatteryType::GroundFence;
        let pole = input.battery_type == BatteryType::GroundPole;

        let value = match self {
            Formula::FrontLegCode => FormulaValue::from(if fence { "K-1E" } else { "K-1" }),
            Formula::RearLegCode => FormulaValue::from(if fence { "K-2E" } else { "K-2" }),
            Formula::FrontLegLength => FormulaValue::from(if fence { 1200.0 } else { 2700.0 }),
            Formula::RearLegLength => FormulaValue::from(if fence { 2400.0 } else { 3900.0 }),
            Formula::LegCount => ground::leg_count(input.construction_length)?.into(),
            Formula::ConnectorCount => ground::connector_count(input.module_count)?.into(),
            Formula::RafterCode => ground::rafter_code(input.module_length)?.into(),
            Formula::RafterLength => ground::rafter_length(input.module_length)?.into(),
            Formula::BattenCount => ground::batten_count(input.construction_length)?.into(),
            Formula::ExtraBattenLength => ground::extra_batten_length(input.construction_length)?.into(),
            Formula::ExtraBattenCount => {
                let extra_length = eval.number(Formula::ExtraBattenLength)?;
                FormulaValue::from(if extra_length == 0.0 { 0.0 } else { 4.0 })
            }
            Formula::BattenJointCount => {
                let battens = eval.number(Formula::BattenCount)?;
                let extra = eval.number(Formula::ExtraBattenCount)?;
                ground::batten_joint_count(battens as u32, extra as u32)?.into()
            }
            Formula::RodCount => {
                if pole {
                    FormulaValue::from(0.0)
                } else {
                    let front = eval.number(Formula::LegCount)?;
                    let rear = front;
                    FormulaValue::from((front + rear) * 4.0)
                }
            }
            Formula::ConnectorR2Count => eval.number(Formula::LegCount)?.into(),
            Formula::M10BoltSetsFirst => {
                let legs = eval.number(Formula::LegCount)?;
                let joints = eval.number(Formula::BattenJointCount)?;
                FormulaValue::from(legs * 4.0 + joints * 4.0)
            }
            Formula::M10BoltSetsSecond => {
                let connectors = eval.number(Formula::ConnectorCount)?;
                if pole {
                    let legs = eval.number(Formula::LegCount)?;
                    FormulaValue::from(connectors * 2.0 + legs * 2.0)
                } else {
                    FormulaValue::from(connectors * 2.0)
                }
            }
            Formula::M12BoltSets => {
                let legs = eval.number(Formula::LegCount)?;
                FormulaValue::from(if pole { legs * 2.0 } else { legs * 4.0 })
            }
            Formula::EndClampCount => FormulaValue::from(GROUND_END_CLAMPS),
            Formula::InnerClampCount => FormulaValue::from((f64::from(input.module_count) - 2.0) * 2.0),
        };
        Ok(value)
    }

    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::FrontLegCode => FormulaMetadata {
                name: "Front Leg Code",
                description: "Product code of the front leg",
                formula_plain: "ezys: K-1E, poline: K-1",
                category: FormulaCategory::Legs,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::RearLegCode => FormulaMetadata {
                name: "Rear Leg Code",
                description: "Product code of the rear leg",
                formula_plain: "ezys: K-2E, poline: K-2",
                category: FormulaCategory::Legs,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::FrontLegLength => FormulaMetadata {
                name: "Front Leg Length",
                description: "Stock length of the front leg (mm)",
                formula_plain: "ezys: 1200, poline: 2700",
                category: FormulaCategory::Legs,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::RearLegLength => FormulaMetadata {
                name: "Rear Leg Length",
                description: "Stock length of the rear leg (mm)",
                formula_plain: "ezys: 2400, poline: 3900",
                category: FormulaCategory::Legs,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::LegCount => FormulaMetadata {
                name: "Leg Count",
                description: "Front legs (and rear legs) along the construction",
                formula_plain: "lookup(L): <=4300 -> 2, <=7200 -> 3, ... <=32000 -> 12",
                category: FormulaCategory::Legs,
                source_module: "formulas/ground.rs",
                source_function: "leg_count",
            },
            Formula::ConnectorCount => FormulaMetadata {
                name: "Connector Count (R-1)",
                description: "Long connectors by module count",
                formula_plain: "lookup(n): <=32 -> 2, <=36 -> 3, <=54 -> 4",
                category: FormulaCategory::Bracing,
                source_module: "formulas/ground.rs",
                source_function: "connector_count",
            },
            Formula::RafterCode => FormulaMetadata {
                name: "Rafter Code",
                description: "Rafter product code by module length",
                formula_plain: "lookup(moduleLength): <=1850 -> GG-0, <=2200 -> GG-1, <=2400 -> GG-2",
                category: FormulaCategory::Rafters,
                source_module: "formulas/ground.rs",
                source_function: "rafter_code",
            },
            Formula::RafterLength => FormulaMetadata {
                name: "Rafter Length",
                description: "Stock length of the rafter code, blank when unknown",
                formula_plain: "GG-0 -> 3025, GG-1 -> 3600, GG-2 -> 3750",
                category: FormulaCategory::Rafters,
                source_module: "formulas/ground.rs",
                source_function: "rafter_length",
            },
            Formula::BattenCount => FormulaMetadata {
                name: "Batten Count (Gb-1)",
                description: "Full 4200mm battens, four per whole bay",
                formula_plain: "B = 4 * floor(L / 4200), at most 28",
                category: FormulaCategory::Battens,
                source_module: "formulas/ground.rs",
                source_function: "batten_count",
            },
            Formula::ExtraBattenLength => FormulaMetadata {
                name: "Extra Batten Length (Gb-1*)",
                description: "Length of the batten covering the last partial bay",
                formula_plain: "r = L - (B/4) * 4200; r == 0 -> 0, r < 300 -> 300, else r",
                category: FormulaCategory::Battens,
                source_module: "formulas/ground.rs",
                source_function: "extra_batten_length",
            },
            Formula::ExtraBattenCount => FormulaMetadata {
                name: "Extra Batten Count",
                description: "Extra battens, a set of four when a partial bay remains",
                formula_plain: "E = extraLength == 0 ? 0 : 4",
                category: FormulaCategory::Battens,
                source_module: "formulas/ground.rs",
                source_function: "extra_batten_count",
            },
            Formula::BattenJointCount => FormulaMetadata {
                name: "Batten Joint Count (Gbj)",
                description: "Batten joints by total batten count",
                formula_plain: "lookup(B + E): <=4 -> 0, <=8 -> 4, ... <=32 -> 28",
                category: FormulaCategory::Battens,
                source_module: "formulas/ground.rs",
                source_function: "batten_joint_count",
            },
            Formula::RodCount => FormulaMetadata {
                name: "Rod Count",
                description: "Bracing rods; pole structures have none",
                formula_plain: "poline: 0, else (legs + legs) * 4",
                category: FormulaCategory::Bracing,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::ConnectorR2Count => FormulaMetadata {
                name: "Connector Count (R-2)",
                description: "Short connectors, one per leg",
                formula_plain: "legs",
                category: FormulaCategory::Bracing,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::M10BoltSetsFirst => FormulaMetadata {
                name: "M10 Bolt Sets (1st)",
                description: "M10 bolt sets for legs and batten joints",
                formula_plain: "legs * 4 + joints * 4",
                category: FormulaCategory::Bolts,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::M10BoltSetsSecond => FormulaMetadata {
                name: "M10 Bolt Sets (2nd)",
                description: "M10 bolt sets for connectors (and legs on pole structures)",
                formula_plain: "poline: connectors * 2 + legs * 2, else connectors * 2",
                category: FormulaCategory::Bolts,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::M12BoltSets => FormulaMetadata {
                name: "M12 Bolt Sets",
                description: "M12 bolt sets for the leg joints",
                formula_plain: "poline: legs * 2, else legs * 4",
                category: FormulaCategory::Bolts,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::EndClampCount => FormulaMetadata {
                name: "End Clamp Sets",
                description: "End clamp sets, fixed for every structure",
                formula_plain: "8",
                category: FormulaCategory::Clamps,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
            Formula::InnerClampCount => FormulaMetadata {
                name: "Inner Clamp Sets",
                description: "Inner clamp sets between neighbouring modules (negative below 2 modules)",
                formula_plain: "(n - 2) * 2",
                category: FormulaCategory::Clamps,
                source_module: "formulas/registry.rs",
                source_function: "Formula::compute",
            },
        }
    }
}

// ============================================================================
// Formula Identifiers
// ============================================================================

/// Any formula the evaluator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormulaId {
    System(Formula),
    Furniture(FurnitureFormula),
}

impl FormulaId {
    pub fn key(&self) -> &'static str {
        match self {
            FormulaId::System(formula) => formula.key(),
            FormulaId::Furniture(formula) => formula.key(),
        }
    }

    /// Look up a formula by registry key
    pub fn from_key(key: &str) -> Option<FormulaId> {
        Formula::from_key(key)
            .map(FormulaId::System)
            .or_else(|| FurnitureFormula::from_key(key).map(FormulaId::Furniture))
    }

    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            FormulaId::System(formula) => formula.metadata(),
            FormulaId::Furniture(formula) => formula.metadata(),
        }
    }

    /// Every formula, ground first
    pub fn all() -> Vec<FormulaId> {
        ALL_FORMULAS
            .iter()
            .copied()
            .map(FormulaId::System)
            .chain(ALL_FURNITURE_FORMULAS.iter().copied().map(FormulaId::Furniture))
            .collect()
    }

    pub fn in_category(category: FormulaCategory) -> Vec<FormulaId> {
        FormulaId::all()
            .into_iter()
            .filter(|id| id.metadata().category == category)
            .collect()
    }
}

impl From<Formula> for FormulaId {
    fn from(formula: Formula) -> Self {
        FormulaId::System(formula)
    }
}

impl From<FurnitureFormula> for FormulaId {
    fn from(formula: FurnitureFormula) -> Self {
        FormulaId::Furniture(formula)
    }
}

impl fmt::Display for FormulaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Memoizing formula evaluator bound to one input.
///
/// Create one per resolution pass; nothing is shared between inputs.
#[derive(Debug)]
pub struct FormulaEvaluator<'a> {
    input: &'a CalculatorInput,
    cache: HashMap<FormulaId, FormulaValue>,
    in_progress: Vec<FormulaId>,
}

impl<'a> FormulaEvaluator<'a> {
    pub fn new(input: &'a CalculatorInput) -> Self {
        Self {
            input,
            cache: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn input(&self) -> &'a CalculatorInput {
        self.input
    }

    /// Evaluate a formula, reusing earlier results for this input.
    pub fn evaluate(&mut self, id: impl Into<FormulaId>) -> CalcResult<FormulaValue> {
        let id = id.into();
        if let Some(value) = self.cache.get(&id) {
            return Ok(value.clone());
        }

        if self.in_progress.contains(&id) {
            let mut chain: Vec<&str> = self.in_progress.iter().map(|f| f.key()).collect();
            chain.push(id.key());
            return Err(CalcError::formula_cycle(&chain));
        }

        tracing::trace!(formula = id.key(), "evaluating formula");
        self.in_progress.push(id);
        let result = match id {
            FormulaId::System(formula) => formula.compute(self),
            FormulaId::Furniture(formula) => formula.compute(self),
        };
        self.in_progress.pop();

        let value = result?;
        self.cache.insert(id, value.clone());
        Ok(value)
    }

    /// Evaluate a formula that must produce a finite number.
    pub fn number(&mut self, id: impl Into<FormulaId>) -> CalcResult<f64> {
        let id = id.into();
        let value = self.evaluate(id)?;
        value
            .as_number()
            .ok_or_else(|| CalcError::non_finite(id.key(), value.to_string()))
    }

    /// String-keyed entry point. Unknown keys fail like a formula that
    /// returned nothing.
    pub fn evaluate_key(&mut self, key: &str) -> CalcResult<FormulaValue> {
        let id = FormulaId::from_key(key).ok_or_else(|| CalcError::non_finite(key, "missing registry entry"))?;
        self.evaluate(id)
    }
}

// ============================================================================
// Markdown Generation for FORMULAS.md
// ============================================================================

/// Generate the formula reference document.
///
/// # Example
///
/// ```rust
/// use bom_core::formulas::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("Formula Reference"));
/// assert!(markdown.contains("## Battens"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Solar Mounting BOM Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

This document lists every derived value of the ground structure and the
furniture list. Roof catalog rows compute their quantities inline and are
not listed here.

## Notation

| Symbol | Meaning |
|--------|---------|
| L | Construction length (mm) |
| n | Module count |
| B | Full batten count |
| E | Extra batten count |

---

"#,
    );

    let categories = FormulaCategory::all();

    for category in &categories {
        let formulas = FormulaId::in_category(*category);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for id in formulas {
            let meta = id.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Key:** `{}`\n\n", id.key()));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));
            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len() + ALL_FURNITURE_FORMULAS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ground(battery_type: BatteryType, length: f64) -> CalculatorInput {
        CalculatorInput::new(battery_type)
            .with_modules(36, 2250.0)
            .with_construction_length(length)
    }

    #[test]
    fn test_keys_round_trip() {
        for formula in ALL_FORMULAS {
            assert_eq!(Formula::from_key(formula.key()), Some(*formula));
        }
        for id in FormulaId::all() {
            assert_eq!(FormulaId::from_key(id.key()), Some(id));
        }
        assert_eq!(Formula::from_key("legCount"), None);
    }

    #[test]
    fn test_leg_codes_by_type() {
        let fence = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&fence);
        assert_eq!(eval.evaluate(Formula::FrontLegCode).unwrap(), FormulaValue::from("K-1E"));
        assert_eq!(eval.number(Formula::RearLegLength).unwrap(), 2400.0);

        let pole = ground(BatteryType::GroundPole, 21000.0);
        let mut eval = FormulaEvaluator::new(&pole);
        assert_eq!(eval.evaluate(Formula::RearLegCode).unwrap(), FormulaValue::from("K-2"));
        assert_eq!(eval.number(Formula::FrontLegLength).unwrap(), 2700.0);
    }

    #[test]
    fn test_fence_bolt_sets() {
        // L = 21000: 8 legs, 20 battens, remainder 0, joints lookup(20) = 16
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        assert_eq!(eval.number(Formula::LegCount).unwrap(), 8.0);
        assert_eq!(eval.number(Formula::BattenCount).unwrap(), 20.0);
        assert_eq!(eval.number(Formula::ExtraBattenCount).unwrap(), 0.0);
        assert_eq!(eval.number(Formula::BattenJointCount).unwrap(), 16.0);
        assert_eq!(eval.number(Formula::RodCount).unwrap(), 64.0);
        assert_eq!(eval.number(Formula::M10BoltSetsFirst).unwrap(), 96.0);
        assert_eq!(eval.number(Formula::M10BoltSetsSecond).unwrap(), 6.0);
        assert_eq!(eval.number(Formula::M12BoltSets).unwrap(), 32.0);
    }

    #[test]
    fn test_pole_bolt_sets() {
        let input = ground(BatteryType::GroundPole, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        assert_eq!(eval.number(Formula::RodCount).unwrap(), 0.0);
        assert_eq!(eval.number(Formula::M10BoltSetsSecond).unwrap(), 6.0 + 16.0);
        assert_eq!(eval.number(Formula::M12BoltSets).unwrap(), 16.0);
    }

    #[test]
    fn test_clamps() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        assert_eq!(eval.number(Formula::EndClampCount).unwrap(), 8.0);
        assert_eq!(eval.number(Formula::InnerClampCount).unwrap(), 68.0);
    }

    #[test]
    fn test_rafter_values() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        assert_eq!(eval.evaluate(Formula::RafterCode).unwrap().to_code(), "GG-2");
        assert_eq!(eval.evaluate(Formula::RafterLength).unwrap().to_length(), Some(3750.0));
    }

    #[test]
    fn test_text_is_not_a_number() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        let err = eval.number(Formula::FrontLegCode).unwrap_err();
        assert_eq!(err, CalcError::non_finite("front_leg_code", "\"K-1E\""));
    }

    #[test]
    fn test_range_error_propagates_through_dependents() {
        let input = ground(BatteryType::GroundFence, 32001.0);
        let mut eval = FormulaEvaluator::new(&input);
        let err = eval.number(Formula::M12BoltSets).unwrap_err();
        assert_eq!(err.error_code(), "RANGE_EXCEEDED");
    }

    #[test]
    fn test_unknown_key() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        let err = eval.evaluate_key("nope").unwrap_err();
        assert!(matches!(err, CalcError::NonFiniteResult { ref formula, .. } if formula == "nope"));
    }

    #[test]
    fn test_reentry_is_a_cycle() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        eval.in_progress.push(FormulaId::System(Formula::BattenJointCount));
        eval.in_progress.push(FormulaId::System(Formula::LegCount));
        let err = eval.evaluate(Formula::LegCount).unwrap_err();
        assert_eq!(
            err,
            CalcError::FormulaCycle {
                chain: "batten_joint_count -> leg_count -> leg_count".to_string()
            }
        );
    }

    #[test]
    fn test_evaluation_is_memoized() {
        let input = ground(BatteryType::GroundFence, 21000.0);
        let mut eval = FormulaEvaluator::new(&input);
        eval.number(Formula::M10BoltSetsFirst).unwrap();
        assert!(eval.cache.contains_key(&FormulaId::System(Formula::LegCount)));
        assert!(eval.cache.contains_key(&FormulaId::System(Formula::BattenJointCount)));
        assert!(eval.in_progress.is_empty());
    }

    #[test]
    fn test_formula_value_conversions() {
        assert_eq!(FormulaValue::Null.to_code(), "");
        assert_eq!(FormulaValue::Null.to_length(), None);
        assert_eq!(FormulaValue::Number(f64::NAN).to_length(), None);
        assert_eq!(FormulaValue::from("3025").to_length(), Some(3025.0));
        assert_eq!(FormulaValue::from("").to_length(), None);
    }

    #[test]
    fn test_every_formula_has_metadata() {
        for id in FormulaId::all() {
            let meta = id.metadata();
            assert!(!meta.name.is_empty(), "{:?} missing name", id);
            assert!(!meta.formula_plain.is_empty(), "{:?} missing formula", id);
            assert!(!meta.source_module.is_empty(), "{:?} missing source", id);
        }
    }

    #[test]
    fn test_generate_formulas_markdown() {
        let markdown = generate_formulas_markdown();
        assert!(markdown.contains("# Solar Mounting BOM Formula Reference"));
        assert!(markdown.contains("Auto-generated from source code"));
        for category in FormulaCategory::all() {
            assert!(
                markdown.contains(&format!("## {}", category.display_name())),
                "Missing {:?}",
                category
            );
        }
        assert!(markdown.contains("`leg_count`"));
        assert!(markdown.contains("**Total Formulas:** 33"));
        assert!(markdown.contains("**Categories:** 7"));
    }
}
