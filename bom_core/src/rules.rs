//! # Ground Structure Rule Tables
//!
//! Bucket tables for the ground-mounted structure. All lengths in mm.
//!
//! | Table | Keyed on | Buckets |
//! |-------|----------|---------|
//! | [`LEG_COUNT`] | construction length | 11 (4300..32000) |
//! | [`CONNECTOR_COUNT`] | module count | 3 (32/36/54) |
//! | [`RAFTER_CODE`] | module length | 3 (1850/2200/2400) |
//! | [`BATTEN_COUNT`] | whole 4200mm bays | 8 (0..7) |
//! | [`BATTEN_JOINT_COUNT`] | battens incl. extra | 8 (4..32) |
//!
//! Tables are checked for ascending order the first time they are used;
//! call [`verify_tables`] to force the check at startup.

use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};
use crate::range_lookup::{RangeRule, RangeTable};

/// Maximum ground construction length (mm)
pub const MAX_CONSTRUCTION_LENGTH_MM: f64 = 32000.0;

/// Length of one batten bay (mm)
pub const BATTEN_BAY_MM: f64 = 4200.0;

/// Shortest extra batten that can be manufactured (mm)
pub const MIN_EXTRA_BATTEN_MM: f64 = 300.0;

static LEG_COUNT_RULES: &[RangeRule<u32>] = &[
    RangeRule::new(4300.0, 2),
    RangeRule::new(7200.0, 3),
    RangeRule::new(10100.0, 4),
    RangeRule::new(13000.0, 5),
    RangeRule::new(15900.0, 6),
    RangeRule::new(18800.0, 7),
    RangeRule::new(21700.0, 8),
    RangeRule::new(24600.0, 9),
    RangeRule::new(27500.0, 10),
    RangeRule::new(30400.0, 11),
    RangeRule::new(32000.0, 12),
];

static CONNECTOR_COUNT_RULES: &[RangeRule<u32>] = &[
    RangeRule::new(32.0, 2),
    RangeRule::new(36.0, 3),
    RangeRule::new(54.0, 4),
];

static RAFTER_CODE_RULES: &[RangeRule<&str>] = &[
    RangeRule::new(1850.0, "GG-0"),
    RangeRule::new(2200.0, "GG-1"),
    RangeRule::new(2400.0, "GG-2"),
];

/// Rafter stock length by code
static RAFTER_LENGTHS: &[(&str, f64)] = &[("GG-0", 3025.0), ("GG-1", 3600.0), ("GG-2", 3750.0)];

// Keyed on floor(constructionLength / 4200): n whole bays means ratio < n + 1
static BATTEN_COUNT_RULES: &[RangeRule<u32>] = &[
    RangeRule::new(0.0, 0),
    RangeRule::new(1.0, 4),
    RangeRule::new(2.0, 8),
    RangeRule::new(3.0, 12),
    RangeRule::new(4.0, 16),
    RangeRule::new(5.0, 20),
    RangeRule::new(6.0, 24),
    RangeRule::new(7.0, 28),
];

static BATTEN_JOINT_COUNT_RULES: &[RangeRule<u32>] = &[
    RangeRule::new(4.0, 0),
    RangeRule::new(8.0, 4),
    RangeRule::new(12.0, 8),
    RangeRule::new(16.0, 12),
    RangeRule::new(20.0, 16),
    RangeRule::new(24.0, 20),
    RangeRule::new(28.0, 24),
    RangeRule::new(32.0, 28),
];

pub static LEG_COUNT: Lazy<CalcResult<RangeTable<u32>>> = Lazy::new(|| {
    RangeTable::new("leg_count", LEG_COUNT_RULES, "construction length exceeds 32000mm")
});

pub static CONNECTOR_COUNT: Lazy<CalcResult<RangeTable<u32>>> = Lazy::new(|| {
    RangeTable::new("connector_count", CONNECTOR_COUNT_RULES, "invalid module count")
});

pub static RAFTER_CODE: Lazy<CalcResult<RangeTable<&'static str>>> = Lazy::new(|| {
    RangeTable::new("rafter_code", RAFTER_CODE_RULES, "invalid module length")
});

pub static BATTEN_COUNT: Lazy<CalcResult<RangeTable<u32>>> = Lazy::new(|| {
    RangeTable::new("batten_count", BATTEN_COUNT_RULES, "construction length too long for battens")
});

pub static BATTEN_JOINT_COUNT: Lazy<CalcResult<RangeTable<u32>>> = Lazy::new(|| {
    RangeTable::new("batten_joint_count", BATTEN_JOINT_COUNT_RULES, "too many battens")
});

/// Borrow a validated table, surfacing its construction error on every use.
pub fn table<T: Copy>(table: &'static Lazy<CalcResult<RangeTable<T>>>) -> CalcResult<&'static RangeTable<T>> {
    Lazy::force(table).as_ref().map_err(Clone::clone)
}

/// Rafter stock length for a rafter code, `None` when the code has no fixed length
pub fn rafter_length_for_code(code: &str) -> Option<f64> {
    RAFTER_LENGTHS
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, length)| *length)
}

/// Force the ordering check of every table.
pub fn verify_tables() -> CalcResult<()> {
    table(&LEG_COUNT)?;
    table(&CONNECTOR_COUNT)?;
    table(&RAFTER_CODE)?;
    table(&BATTEN_COUNT)?;
    table(&BATTEN_JOINT_COUNT)?;
    if RAFTER_CODE_RULES
        .iter()
        .any(|rule| rafter_length_for_code(rule.value).is_none())
    {
        tracing::warn!("rafter code without stock length, length will be left blank");
    }
    Ok(())
}

/// Whole-bay count used to index [`BATTEN_COUNT`]
pub fn whole_batten_bays(construction_length_mm: f64) -> CalcResult<f64> {
    if !construction_length_mm.is_finite() {
        return Err(CalcError::non_finite("batten_count", construction_length_mm.to_string()));
    }
    Ok((construction_length_mm / BATTEN_BAY_MM).floor())
}
