//! # Formulas
//!
//! Every derived quantity of the BOM in one place.
//!
//! ## Modules
//!
//! - [`ground`] - Ground structure step functions (legs, rafters, battens)
//! - [`roof`] - Pitched-roof rail and fastener counts, flat-roof auxiliary holders
//! - [`registry`] - Named formulas, the memoizing evaluator and the reference generator
//! - [`furniture`] - Loose hardware derived from ground quantities
//!
//! ## Units
//!
//! Lengths are millimetres. Counts are returned as `u32` by the step
//! functions and as `f64` once they enter the registry, since BOM quantities
//! are plain numbers.

pub mod furniture;
pub mod ground;
pub mod registry;
pub mod roof;

pub use furniture::{FurnitureFormula, ALL_FURNITURE_FORMULAS};

pub use ground::{
    batten_count,
    batten_joint_count,
    connector_count,
    extra_batten_count,
    extra_batten_length,
    leg_count,
    rafter_code,
    rafter_length,
};

pub use registry::{
    Formula,
    FormulaCategory,
    FormulaEvaluator,
    FormulaId,
    FormulaMetadata,
    FormulaValue,
    ALL_FORMULAS,
    generate_formulas_markdown,
};
