//! Cavity grid layout record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A feasible cavity grid on the mold plate.
///
/// `a` columns of pitch `wc` run across the plate width; `b` rows of pitch
/// `dc` run along the plate length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CavityLayout {
    /// Pitch increment added to `w`.
    pub wp: u32,
    /// Pitch increment added to `d`.
    pub dp: u32,
    /// Cavity count across the width.
    pub a: u32,
    /// Cavity count along the length.
    pub b: u32,
    /// Cavity pitch across the width (`w + wp`).
    pub wc: f64,
    /// Cavity pitch along the length (`d + dp`).
    pub dc: f64,
    /// Feed dimension (`2·mt + dc·b`).
    pub ds: f64,
    /// Clearance `L` between the fillet centre and the pitch reference point.
    pub clearance: f64,
    /// Total cavity count (`a·b`).
    pub score: u64,
}

impl CavityLayout {
    /// Total cavity count.
    pub fn cavity_count(&self) -> u64 {
        self.score
    }

    /// Width consumed by the columns (`a·wc`).
    pub fn width_used(&self) -> f64 {
        f64::from(self.a) * self.wc
    }

    /// True if `self` ranks strictly above `other`: more cavities, or the same
    /// count with a shorter feed dimension.
    pub fn outranks(&self, other: &CavityLayout) -> bool {
        self.score > other.score || (self.score == other.score && self.ds < other.ds)
    }
}
