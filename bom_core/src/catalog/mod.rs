//! # Material Catalogs
//!
//! Declarative BOM rows. A [`MaterialDefinition`] says how to get a row's
//! code, length and quantity, and which inputs it applies to. The catalogs
//! themselves are process-wide, read-only and built on first use.
//!
//! | Catalog | Rows | Quantities |
//! |---------|------|------------|
//! | [`GROUND_CATALOG`] | 14 | formula registry |
//! | [`ROOF_CATALOG`] | flat-roof kits + pitched-roof rails | inline per row |
//! | [`FURNITURE_CATALOG`] | 14 | furniture formulas |
//!
//! ## Applicability
//!
//! Roof rows carry optional predicates (`systems`, `orientation`,
//! `construction`, `mounting_methods`). A row applies only when the input
//! matches every predicate the row declares; an absent predicate does not
//! constrain.

pub mod furniture;
pub mod ground;
pub mod roof;

pub use furniture::{FurnitureDefinition, FURNITURE_CATALOG};
pub use ground::GROUND_CATALOG;
pub use roof::ROOF_CATALOG;

use crate::formulas::Formula;
use crate::input::{CalculatorInput, LayoutOverrides, ModuleConstruction, MountingMethod, Orientation, RoofSystem};

/// Where a row's product code comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeSpec {
    Literal(&'static str),
    Derived(Formula),
}

/// Where a row's stock length comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthSpec {
    Fixed(f64),
    /// Sold by piece, no length
    NotApplicable,
    Derived(Formula),
}

/// Inline quantity of a roof row.
pub type RowQuantityFn = fn(&CalculatorInput, &LayoutOverrides) -> f64;

/// Where a row's quantity comes from.
#[derive(Clone, Copy)]
pub enum QuantitySpec {
    /// A number-valued registry formula
    Registry(Formula),
    /// A function of the input and the layout tool's counters
    Inline(RowQuantityFn),
}

impl std::fmt::Debug for QuantitySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantitySpec::Registry(formula) => f.debug_tuple("Registry").field(formula).finish(),
            QuantitySpec::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

/// One potential BOM line.
#[derive(Debug, Clone)]
pub struct MaterialDefinition {
    pub code: CodeSpec,
    /// Display name, or a resource key for pitched-roof rows
    pub name: &'static str,
    pub length: LengthSpec,
    pub quantity: QuantitySpec,
    pub note: Option<&'static str>,
    pub systems: Option<&'static [RoofSystem]>,
    pub orientation: Option<&'static [Orientation]>,
    pub construction: Option<&'static [ModuleConstruction]>,
    pub mounting_methods: Option<&'static [MountingMethod]>,
}

impl MaterialDefinition {
    /// A row with no predicates
    pub fn new(code: CodeSpec, name: &'static str, length: LengthSpec, quantity: QuantitySpec) -> Self {
        Self {
            code,
            name,
            length,
            quantity,
            note: None,
            systems: None,
            orientation: None,
            construction: None,
            mounting_methods: None,
        }
    }

    /// A flat-roof kit row, sold by piece
    pub fn flat(systems: &'static [RoofSystem], code: &'static str, name: &'static str, quantity: RowQuantityFn) -> Self {
        Self {
            systems: Some(systems),
            ..Self::new(CodeSpec::Literal(code), name, LengthSpec::NotApplicable, QuantitySpec::Inline(quantity))
        }
    }

    /// A pitched-roof row, sold by piece
    pub fn pitched(methods: &'static [MountingMethod], name: &'static str, quantity: RowQuantityFn) -> Self {
        Self {
            mounting_methods: Some(methods),
            ..Self::new(CodeSpec::Literal(""), name, LengthSpec::NotApplicable, QuantitySpec::Inline(quantity))
        }
    }

    pub fn with_construction(mut self, construction: &'static [ModuleConstruction]) -> Self {
        self.construction = Some(construction);
        self
    }

    pub fn with_orientation(mut self, orientation: &'static [Orientation]) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Flat-roof applicability: the row must name the system, and match
    /// orientation and construction where it declares them.
    pub fn applies_to_flat_roof(
        &self,
        system: RoofSystem,
        orientation: Option<Orientation>,
        construction: ModuleConstruction,
    ) -> bool {
        let system_ok = self.systems.is_some_and(|systems| systems.contains(&system));
        let orientation_ok = match self.orientation {
            None => true,
            Some(allowed) => orientation.is_some_and(|o| allowed.contains(&o)),
        };
        let construction_ok = self.construction.map_or(true, |allowed| allowed.contains(&construction));
        system_ok && orientation_ok && construction_ok
    }

    /// Pitched-roof applicability: the row must name the method and must not
    /// belong to a flat-roof kit.
    pub fn applies_to_pitched_roof(&self, method: MountingMethod) -> bool {
        self.systems.is_none() && self.mounting_methods.is_some_and(|methods| methods.contains(&method))
    }

    /// Identifies the row in errors and logs
    pub fn label(&self) -> &'static str {
        match self.code {
            CodeSpec::Literal(code) if !code.is_empty() => code,
            _ => self.name,
        }
    }
}
