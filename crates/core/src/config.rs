//! Plate limits and search policy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::DerivedConstants;
use crate::{LayoutError, Result};

/// Lower bound policy for the pitch increments `wp` / `dp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PitchFloor {
    /// Any pitch of at least 1 mm.
    #[default]
    Unit,
    /// Pitch of at least `t`.
    Clearance,
    /// Pitch of at least `t + additional_margin`.
    ClearanceWithLid,
}

impl PitchFloor {
    /// Smallest pitch increment allowed under this policy.
    pub fn min_pitch(self, derived: &DerivedConstants) -> u32 {
        match self {
            Self::Unit => 1,
            Self::Clearance => derived.t.max(1),
            Self::ClearanceWithLid => (derived.t + derived.additional_margin).max(1),
        }
    }
}

/// Plate limits and layout search parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlateConfig {
    /// Usable plate width across the columns (`a` axis).
    pub max_plate_width: f64,

    /// Plate length along the rows (`b` axis), including both margins.
    pub max_plate_length: f64,

    /// Lower bound policy for pitch increments.
    pub pitch_floor: PitchFloor,

    /// Optional upper bound on `wp` and `dp`, applied on top of the plate-derived bound.
    pub pitch_cap: Option<u32>,

    /// Fixed standoff subtracted from the fillet-to-reference distance.
    pub standoff: f64,

    /// Clearance `L` must strictly exceed this value.
    pub clearance_threshold: f64,

    /// Retry with `a0 - 1` / `b0 - 1` when the primary search is empty.
    pub relax: bool,

    /// Also search the rotated orientation.
    pub check_rotation: bool,

    /// Wall-clock guard in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            max_plate_width: 975.0,
            max_plate_length: 1100.0,
            pitch_floor: PitchFloor::default(),
            pitch_cap: None,
            standoff: 7.0,
            clearance_threshold: 8.0,
            relax: true,
            check_rotation: true,
            time_limit_ms: 0,
        }
    }
}

impl PlateConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum plate width.
    pub fn with_max_plate_width(mut self, width: f64) -> Self {
        self.max_plate_width = width;
        self
    }

    /// Sets the maximum plate length.
    pub fn with_max_plate_length(mut self, length: f64) -> Self {
        self.max_plate_length = length;
        self
    }

    /// Sets the pitch floor policy.
    pub fn with_pitch_floor(mut self, floor: PitchFloor) -> Self {
        self.pitch_floor = floor;
        self
    }

    /// Caps both pitch increments.
    pub fn with_pitch_cap(mut self, cap: u32) -> Self {
        self.pitch_cap = Some(cap);
        self
    }

    /// Sets the fillet standoff.
    pub fn with_standoff(mut self, standoff: f64) -> Self {
        self.standoff = standoff;
        self
    }

    /// Sets the clearance threshold.
    pub fn with_clearance_threshold(mut self, threshold: f64) -> Self {
        self.clearance_threshold = threshold;
        self
    }

    /// Enables or disables the relaxation fallback.
    pub fn with_relaxation(mut self, enabled: bool) -> Self {
        self.relax = enabled;
        self
    }

    /// Enables or disables the rotated-orientation check.
    pub fn with_rotation_check(mut self, enabled: bool) -> Self {
        self.check_rotation = enabled;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Length available to the rows once both margins are removed.
    pub fn usable_length(&self, derived: &DerivedConstants) -> f64 {
        self.max_plate_length - 2.0 * derived.margin()
    }

    /// Validates the plate limits.
    pub fn validate(&self) -> Result<()> {
        if !self.max_plate_width.is_finite() || self.max_plate_width <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "max_plate_width must be positive, got {}",
                self.max_plate_width
            )));
        }
        if !self.max_plate_length.is_finite() || self.max_plate_length <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "max_plate_length must be positive, got {}",
                self.max_plate_length
            )));
        }
        if !self.standoff.is_finite() || !self.clearance_threshold.is_finite() {
            return Err(LayoutError::InvalidConfig(
                "standoff and clearance_threshold must be finite".into(),
            ));
        }
        if self.pitch_cap == Some(0) {
            return Err(LayoutError::InvalidConfig(
                "pitch_cap must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlateConfig::default();
        assert_eq!(config.max_plate_width, 975.0);
        assert_eq!(config.max_plate_length, 1100.0);
        assert_eq!(config.pitch_floor, PitchFloor::Unit);
        assert_eq!(config.pitch_cap, None);
        assert!(config.relax);
        assert!(config.check_rotation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PlateConfig::new()
            .with_max_plate_width(960.0)
            .with_pitch_floor(PitchFloor::ClearanceWithLid)
            .with_pitch_cap(40)
            .with_relaxation(false);

        assert_eq!(config.max_plate_width, 960.0);
        assert_eq!(config.pitch_floor, PitchFloor::ClearanceWithLid);
        assert_eq!(config.pitch_cap, Some(40));
        assert!(!config.relax);
    }

    #[test]
    fn test_pitch_floor_policies() {
        let derived = DerivedConstants {
            mt: 13,
            wpz: 12,
            t: 9,
            additional_margin: 5,
        };
        assert_eq!(PitchFloor::Unit.min_pitch(&derived), 1);
        assert_eq!(PitchFloor::Clearance.min_pitch(&derived), 9);
        assert_eq!(PitchFloor::ClearanceWithLid.min_pitch(&derived), 14);
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        assert!(PlateConfig::new().with_max_plate_width(0.0).validate().is_err());
        assert!(PlateConfig::new()
            .with_max_plate_length(f64::INFINITY)
            .validate()
            .is_err());
        assert!(PlateConfig::new().with_pitch_cap(0).validate().is_err());
    }
}
