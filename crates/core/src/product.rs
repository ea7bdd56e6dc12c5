//! Product footprint specification.

use crate::{LayoutError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `convex` value forced when the product has an inner/outer fitting lid.
pub const LID_CONVEX: f64 = 8.0;

/// Planar footprint and mold-relevant attributes of a single product.
///
/// Lengths are in millimetres. The local frame used by the fillet solver puts
/// `x` along the long side `d` and `y` along the short side `w`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductSpec {
    /// Short-side length.
    w: f64,

    /// Long-side length.
    d: f64,

    /// Fillet (corner) radius.
    c: f64,

    /// Cut-to-edge offset as entered. Only readable through [`ProductSpec::convex`].
    convex: f64,

    /// Overall height.
    z: f64,

    /// Whether the product has an inner/outer fitting lid.
    has_inner_outer_lid: bool,

    /// Curvature radius `R` of the edges spanning `d`. `None` = straight.
    outer_radius: Option<f64>,

    /// Curvature radius `r` of the edges spanning `w`. `None` = straight.
    side_radius: Option<f64>,
}

impl ProductSpec {
    /// Creates a straight-edged product specification.
    pub fn new(w: f64, d: f64, c: f64, convex: f64, z: f64) -> Self {
        Self {
            w,
            d,
            c,
            convex,
            z,
            has_inner_outer_lid: false,
            outer_radius: None,
            side_radius: None,
        }
    }

    /// Sets the inner/outer lid flag.
    pub fn with_inner_outer_lid(mut self, has_lid: bool) -> Self {
        self.has_inner_outer_lid = has_lid;
        self
    }

    /// Sets the curvature radius `R` of the `d`-spanning edges.
    pub fn with_outer_radius(mut self, radius: f64) -> Self {
        self.outer_radius = Some(radius);
        self
    }

    /// Sets the curvature radius `r` of the `w`-spanning edges.
    pub fn with_side_radius(mut self, radius: f64) -> Self {
        self.side_radius = Some(radius);
        self
    }

    /// Sets both optional radii at once.
    pub fn with_radii(mut self, outer: Option<f64>, side: Option<f64>) -> Self {
        self.outer_radius = outer;
        self.side_radius = side;
        self
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Effective cut-to-edge offset.
    ///
    /// Returns [`LID_CONVEX`] when the lid flag is set, regardless of the
    /// entered value.
    pub fn convex(&self) -> f64 {
        if self.has_inner_outer_lid {
            LID_CONVEX
        } else {
            self.convex
        }
    }

    pub fn has_inner_outer_lid(&self) -> bool {
        self.has_inner_outer_lid
    }

    pub fn outer_radius(&self) -> Option<f64> {
        self.outer_radius
    }

    pub fn side_radius(&self) -> Option<f64> {
        self.side_radius
    }

    /// Returns the same product turned by 90 degrees: `w`/`d` and `R`/`r` swap.
    pub fn rotated(&self) -> Self {
        Self {
            w: self.d,
            d: self.w,
            outer_radius: self.side_radius,
            side_radius: self.outer_radius,
            ..self.clone()
        }
    }

    /// Validates lengths and radii.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("w", self.w), ("d", self.d), ("c", self.c), ("z", self.z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidSpec(format!(
                    "{} must be a positive finite length, got {}",
                    name, value
                )));
            }
        }

        if !self.convex.is_finite() || self.convex < 0.0 {
            return Err(LayoutError::InvalidSpec(format!(
                "convex must be a non-negative finite length, got {}",
                self.convex
            )));
        }

        for (name, radius) in [("R", self.outer_radius), ("r", self.side_radius)] {
            if let Some(radius) = radius {
                if !radius.is_finite() || radius <= self.c {
                    return Err(LayoutError::InvalidSpec(format!(
                        "{} = {} must exceed the fillet radius c = {}",
                        name, radius, self.c
                    )));
                }
            }
        }

        Ok(())
    }
}
