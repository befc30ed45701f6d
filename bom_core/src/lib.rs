//! # bom_core - Solar Mounting BOM Engine
//!
//! `bom_core` turns a solar installation's parameters into a bill of
//! materials: product codes, stock lengths and quantities for the mounting
//! structure, plus loose hardware for ground structures. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from input to BOM
//! - **Declarative**: catalogs are data, quantities come from named formulas
//! - **Rich Errors**: structured error types, never a partial BOM
//!
//! ## Quick Start
//!
//! ```rust
//! use bom_core::calculations::calculate;
//! use bom_core::input::{BatteryType, GroundLayout};
//!
//! let input = GroundLayout::new(BatteryType::GroundFence, 36, 2250.0, 30.0)
//!     .unwrap()
//!     .to_input();
//! let report = calculate(&input).unwrap();
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("Priekinė koja"));
//! ```
//!
//! ## Modules
//!
//! - [`input`] - calculator input, selectors and layout helpers
//! - [`range_lookup`] - ordered range tables
//! - [`rules`] - the range tables the formulas read
//! - [`formulas`] - named formula registry and evaluator
//! - [`catalog`] - ground, roof and furniture catalogs
//! - [`calculations`] - quantity and furniture resolvers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod formulas;
pub mod input;
pub mod range_lookup;
pub mod rules;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with, BomReport, ResolveOptions};
pub use errors::{CalcError, CalcResult};
pub use input::{BatteryType, CalculatorInput, GroundLayout};
