//! Derived mold constants.
//!
//! Maps a [`ProductSpec`] to the fixed margins and pitch thresholds used by the
//! layout search. The lid override is already applied by
//! [`ProductSpec::convex`], so every value here sees the effective offset.

use crate::product::ProductSpec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Height at and above which the tall-product margins apply.
pub const TALL_PRODUCT_HEIGHT: f64 = 50.0;

/// Plate-margin thickness for products lower than [`TALL_PRODUCT_HEIGHT`].
pub const MARGIN_LOW: u32 = 13;

/// Plate-margin thickness for tall products.
pub const MARGIN_TALL: u32 = 20;

/// Lower clamp for the base pitch.
pub const MIN_BASE_PITCH: u32 = 12;

/// Base pitch forced for tall products.
pub const TALL_BASE_PITCH: u32 = 20;

/// Extra pitch margin for products with an inner/outer lid.
pub const LID_ADDITIONAL_MARGIN: u32 = 5;

/// Constants derived from a product specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedConstants {
    /// Plate-margin thickness `mt`.
    pub mt: u32,
    /// Base pitch `wpz` used for the reference counts.
    pub wpz: u32,
    /// Minimum allowed pitch `t = floor(convex) + 1`, the smallest integer
    /// pitch strictly larger than the effective cut-to-edge offset.
    pub t: u32,
    /// Additional lid margin.
    pub additional_margin: u32,
}

impl DerivedConstants {
    /// Derives the constants for `spec`.
    pub fn derive(spec: &ProductSpec) -> Self {
        let tall = spec.z() >= TALL_PRODUCT_HEIGHT;
        let convex = spec.convex();

        let mt = if tall { MARGIN_TALL } else { MARGIN_LOW };

        let wpz = if tall {
            TALL_BASE_PITCH
        } else {
            let raw = ((20.0 + (convex - 20.0) / 2.0) * 0.9).floor();
            (raw.max(0.0) as u32).max(MIN_BASE_PITCH)
        };

        let t = convex.max(0.0).floor() as u32 + 1;

        let additional_margin = if spec.has_inner_outer_lid() {
            LID_ADDITIONAL_MARGIN
        } else {
            0
        };

        Self {
            mt,
            wpz,
            t,
            additional_margin,
        }
    }

    /// `mt` as a length.
    pub fn margin(&self) -> f64 {
        f64::from(self.mt)
    }

    /// `wpz` as a length.
    pub fn base_pitch(&self) -> f64 {
        f64::from(self.wpz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_product() {
        let spec = ProductSpec::new(175.0, 175.0, 5.0, 3.0, 50.0);
        let k = DerivedConstants::derive(&spec);
        assert_eq!(k.mt, 20);
        assert_eq!(k.wpz, 20);
        assert_eq!(k.t, 4);
        assert_eq!(k.additional_margin, 0);
    }

    #[test]
    fn test_low_product_clamps_base_pitch() {
        // floor((20 + (3 - 20) / 2) * 0.9) = floor(10.35) = 10 -> clamped to 12
        let spec = ProductSpec::new(120.0, 160.0, 4.0, 3.0, 30.0);
        let k = DerivedConstants::derive(&spec);
        assert_eq!(k.mt, 13);
        assert_eq!(k.wpz, 12);
    }

    #[test]
    fn test_low_product_large_convex() {
        // floor((20 + (40 - 20) / 2) * 0.9) = 27
        let spec = ProductSpec::new(120.0, 160.0, 4.0, 40.0, 49.9);
        let k = DerivedConstants::derive(&spec);
        assert_eq!(k.mt, 13);
        assert_eq!(k.wpz, 27);
        assert_eq!(k.t, 41);
    }

    #[test]
    fn test_minimum_pitch_clears_offset() {
        for (convex, t) in [(0.0, 1), (2.5, 3), (3.0, 4), (7.99, 8)] {
            let spec = ProductSpec::new(120.0, 160.0, 4.0, convex, 30.0);
            assert_eq!(DerivedConstants::derive(&spec).t, t);
        }
    }

    #[test]
    fn test_lid_override_feeds_derived_values() {
        let spec = ProductSpec::new(120.0, 160.0, 4.0, 40.0, 30.0).with_inner_outer_lid(true);
        let k = DerivedConstants::derive(&spec);
        // convex forced to 8: floor((20 - 6) * 0.9) = 12
        assert_eq!(k.wpz, 12);
        assert_eq!(k.t, 9);
        assert_eq!(k.additional_margin, 5);
    }
}
