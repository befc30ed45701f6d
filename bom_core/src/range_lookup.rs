//! # Range Lookup
//!
//! Step-function lookup used by every bucketed rule: leg counts by
//! construction length, connector counts by module count, rafter codes by
//! module length, batten and batten-joint ladders.
//!
//! A table is an ordered list of `{max, value}` rules. Looking up `x` returns
//! the value of the first rule with `x <= max`; a value above every bound is a
//! [`CalcError::RangeExceeded`], never clamped to the last bucket.
//!
//! ## Example
//!
//! ```rust
//! use bom_core::range_lookup::{RangeRule, RangeTable};
//!
//! static RULES: &[RangeRule<u32>] = &[
//!     RangeRule::new(32.0, 2),
//!     RangeRule::new(36.0, 3),
//!     RangeRule::new(54.0, 4),
//! ];
//!
//! let table = RangeTable::new("connectors", RULES, "invalid module count").unwrap();
//! assert_eq!(table.lookup(32.0).unwrap(), 2);
//! assert_eq!(table.lookup(33.0).unwrap(), 3);
//! assert!(table.lookup(55.0).is_err());
//! ```

use crate::errors::{CalcError, CalcResult};

/// One bucket of a range table: every `x <= max` not claimed by an earlier bucket maps to `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule<T> {
    /// Inclusive upper bound of the bucket
    pub max: f64,
    /// Value returned for this bucket
    pub value: T,
}

impl<T> RangeRule<T> {
    pub const fn new(max: f64, value: T) -> Self {
        Self { max, value }
    }
}

/// Scan `rules` in order and return the value of the first rule with `x <= max`.
///
/// The rules are trusted to be sorted ascending; use [`RangeTable`] to have
/// that checked once up front.
pub fn range_lookup<T: Copy>(x: f64, rules: &[RangeRule<T>], table: &str, error_message: &str) -> CalcResult<T> {
    rules
        .iter()
        .find(|rule| x <= rule.max)
        .map(|rule| rule.value)
        .ok_or_else(|| CalcError::range_exceeded(table, x, error_message))
}

/// A named, order-validated range table.
#[derive(Debug, Clone)]
pub struct RangeTable<T: 'static> {
    name: &'static str,
    rules: &'static [RangeRule<T>],
    error_message: &'static str,
}

impl<T: Copy + 'static> RangeTable<T> {
    /// Build a table, rejecting rules whose bounds are not strictly ascending.
    pub fn new(name: &'static str, rules: &'static [RangeRule<T>], error_message: &'static str) -> CalcResult<Self> {
        if let Some(index) = rules
            .windows(2)
            .position(|pair| !(pair[0].max < pair[1].max))
        {
            return Err(CalcError::UnsortedRangeTable {
                table: name.to_string(),
                index: index + 1,
            });
        }
        if rules.is_empty() {
            return Err(CalcError::Internal {
                message: format!("Range table '{}' has no rules", name),
            });
        }
        Ok(Self { name, rules, error_message })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &'static [RangeRule<T>] {
        self.rules
    }

    /// Largest value accepted by this table
    pub fn upper_bound(&self) -> f64 {
        self.rules.last().map(|rule| rule.max).unwrap_or(f64::NEG_INFINITY)
    }

    pub fn lookup(&self, x: f64) -> CalcResult<T> {
        range_lookup(x, self.rules, self.name, self.error_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LADDER: &[RangeRule<u32>] = &[
        RangeRule::new(4300.0, 2),
        RangeRule::new(7200.0, 3),
        RangeRule::new(10100.0, 4),
    ];

    #[test]
    fn test_boundary_selects_lower_bucket() {
        let table = RangeTable::new("legs", LADDER, "too long").unwrap();
        assert_eq!(table.lookup(4300.0).unwrap(), 2);
        assert_eq!(table.lookup(4301.0).unwrap(), 3);
        assert_eq!(table.lookup(0.0).unwrap(), 2);
        assert_eq!(table.lookup(10100.0).unwrap(), 4);
    }

    #[test]
    fn test_exceeding_every_bucket_fails() {
        let table = RangeTable::new("legs", LADDER, "too long").unwrap();
        let err = table.lookup(10100.5).unwrap_err();
        match err {
            CalcError::RangeExceeded { table, value, message } => {
                assert_eq!(table, "legs");
                assert_eq!(value, 10100.5);
                assert_eq!(message, "too long");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_nan_never_matches() {
        let table = RangeTable::new("legs", LADDER, "too long").unwrap();
        assert!(table.lookup(f64::NAN).is_err());
    }

    #[test]
    fn test_unsorted_table_rejected() {
        static UNSORTED: &[RangeRule<u32>] = &[
            RangeRule::new(10.0, 1),
            RangeRule::new(5.0, 2),
            RangeRule::new(20.0, 3),
        ];
        let err = RangeTable::new("bad", UNSORTED, "x").unwrap_err();
        assert_eq!(err, CalcError::UnsortedRangeTable { table: "bad".to_string(), index: 1 });
    }

    #[test]
    fn test_duplicate_bounds_rejected() {
        static DUPLICATE: &[RangeRule<u32>] = &[RangeRule::new(10.0, 1), RangeRule::new(10.0, 2)];
        assert!(RangeTable::new("dup", DUPLICATE, "x").is_err());
    }

    #[test]
    fn test_unchecked_lookup_trusts_order() {
        // Out-of-order rules silently pick the first match
        let rules = [RangeRule::new(10.0, "wide"), RangeRule::new(5.0, "narrow")];
        assert_eq!(range_lookup(3.0, &rules, "t", "x").unwrap(), "wide");
    }

    #[test]
    fn test_upper_bound() {
        let table = RangeTable::new("legs", LADDER, "too long").unwrap();
        assert_eq!(table.upper_bound(), 10100.0);
    }
}
