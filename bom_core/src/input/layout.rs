//! Counters produced by the interactive layout tool.
//!
//! Closed-form holder and clamp formulas only hold for an even number of
//! modules per row. For odd layouts the front end lets the user place the
//! modules on a grid and counts the hardware directly; those counts arrive
//! here. On the wire they sit flat on the calculator input (`clampGCount`,
//! `holderPCount`, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOverrides {
    /// End clamps (Clamp G)
    #[serde(default, rename = "clampGCount", skip_serializing_if = "Option::is_none")]
    pub clamp_g: Option<u32>,
    /// Inner clamps (Clamp V)
    #[serde(default, rename = "clampVCount", skip_serializing_if = "Option::is_none")]
    pub clamp_v: Option<u32>,
    /// Back holders (G); also the single-mount holders of PT15-L and RV10-Z
    #[serde(default, rename = "holderGCount", skip_serializing_if = "Option::is_none")]
    pub holder_g: Option<u32>,
    /// Middle holders (V)
    #[serde(default, rename = "holderVCount", skip_serializing_if = "Option::is_none")]
    pub holder_v: Option<u32>,
    /// Front holders (P)
    #[serde(default, rename = "holderPCount", skip_serializing_if = "Option::is_none")]
    pub holder_p: Option<u32>,
    /// RV10 high middle holders
    #[serde(default, rename = "holderVACount", skip_serializing_if = "Option::is_none")]
    pub holder_va: Option<u32>,
    /// RV10 low middle holders
    #[serde(default, rename = "holderVZCount", skip_serializing_if = "Option::is_none")]
    pub holder_vz: Option<u32>,
}

impl LayoutOverrides {
    pub fn is_empty(&self) -> bool {
        *self == LayoutOverrides::default()
    }
}

/// Which override counter a catalog row falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideSlot {
    ClampG,
    ClampV,
    HolderG,
    HolderV,
    HolderP,
    HolderVa,
    HolderVz,
}

impl OverrideSlot {
    /// JSON field name carrying this counter
    pub fn field_name(&self) -> &'static str {
        match self {
            OverrideSlot::ClampG => "clampGCount",
            OverrideSlot::ClampV => "clampVCount",
            OverrideSlot::HolderG => "holderGCount",
            OverrideSlot::HolderV => "holderVCount",
            OverrideSlot::HolderP => "holderPCount",
            OverrideSlot::HolderVa => "holderVACount",
            OverrideSlot::HolderVz => "holderVZCount",
        }
    }

    pub fn read(&self, overrides: &LayoutOverrides) -> Option<u32> {
        match self {
            OverrideSlot::ClampG => overrides.clamp_g,
            OverrideSlot::ClampV => overrides.clamp_v,
            OverrideSlot::HolderG => overrides.holder_g,
            OverrideSlot::HolderV => overrides.holder_v,
            OverrideSlot::HolderP => overrides.holder_p,
            OverrideSlot::HolderVa => overrides.holder_va,
            OverrideSlot::HolderVz => overrides.holder_vz,
        }
    }
}

/// Closed form for even module counts, the layout tool's counter for odd ones.
///
/// A missing counter on an odd layout yields 0 rather than an error. That zero
/// is an obviously wrong BOM line, so it is logged loudly.
pub fn even_or_override(module_count: u32, closed_form: f64, overrides: &LayoutOverrides, slot: OverrideSlot) -> f64 {
    if module_count % 2 == 0 {
        return closed_form;
    }
    match slot.read(overrides) {
        Some(count) => f64::from(count),
        None => {
            tracing::warn!(
                module_count,
                field = slot.field_name(),
                "odd module count without layout counter, using 0"
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_wire_names() {
        let json = r#"{"clampGCount": 6, "holderPCount": 11, "holderVACount": 3}"#;
        let overrides: LayoutOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.clamp_g, Some(6));
        assert_eq!(overrides.holder_p, Some(11));
        assert_eq!(overrides.holder_va, Some(3));
        assert_eq!(overrides.clamp_v, None);
    }

    #[test]
    fn test_even_ignores_override() {
        let overrides = LayoutOverrides {
            holder_p: Some(99),
            ..Default::default()
        };
        assert_eq!(even_or_override(20, 21.0, &overrides, OverrideSlot::HolderP), 21.0);
    }

    #[test]
    fn test_odd_uses_override_or_zero() {
        let overrides = LayoutOverrides {
            holder_p: Some(13),
            ..Default::default()
        };
        assert_eq!(even_or_override(21, 22.0, &overrides, OverrideSlot::HolderP), 13.0);
        assert_eq!(even_or_override(21, 22.0, &overrides, OverrideSlot::HolderG), 0.0);
    }
}
