//! Layout plan representation.

use crate::fillet::FilletCenter;
use crate::layout::CavityLayout;
use crate::params::DerivedConstants;
use crate::search::{ReferenceCounts, Relaxation, SearchOutcome, SearchStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of planning one product: the primary layout and, when searched,
/// the layout of the rotated orientation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutPlan {
    /// Best layout in the given orientation.
    pub primary: CavityLayout,

    /// Search that produced the primary layout.
    pub relaxation: Relaxation,

    /// Reference counts of the primary orientation.
    pub reference: ReferenceCounts,

    /// Derived constants used by the search.
    pub derived: DerivedConstants,

    /// Fillet centre of the primary orientation.
    pub fillet_center: FilletCenter,

    /// Best layout with `w`/`d` swapped, if the rotated search succeeded.
    pub rotated: Option<CavityLayout>,

    /// Statistics of the primary search.
    pub stats: SearchStats,

    /// Total computation time in milliseconds (both orientations).
    pub computation_time_ms: u64,
}

impl LayoutPlan {
    /// Creates a plan from the primary search outcome.
    pub fn new(
        outcome: SearchOutcome,
        derived: DerivedConstants,
        fillet_center: FilletCenter,
    ) -> Self {
        Self {
            primary: outcome.layout,
            relaxation: outcome.relaxation,
            reference: outcome.reference,
            derived,
            fillet_center,
            rotated: None,
            stats: outcome.stats,
            computation_time_ms: outcome.stats.elapsed_ms,
        }
    }

    /// Attaches the rotated-orientation layout.
    pub fn with_rotated(mut self, rotated: CavityLayout) -> Self {
        self.rotated = Some(rotated);
        self
    }

    /// True if the rotated orientation yields strictly more cavities.
    ///
    /// The primary layout stays the answer; this is advisory only.
    pub fn rotated_advisory(&self) -> bool {
        self.rotated
            .as_ref()
            .is_some_and(|r| r.score > self.primary.score)
    }

    /// True if the primary layout needed the relaxation fallback.
    pub fn is_relaxed(&self) -> bool {
        self.relaxation != Relaxation::None
    }
}

/// Flat summary of a plan for reports.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSummary {
    /// Cavity grid as `a x b`.
    pub grid: String,
    /// Total cavities.
    pub cavities: u64,
    /// Feed dimension.
    pub feed: f64,
    /// Cavity pitches `(wc, dc)`.
    pub pitch: (f64, f64),
    /// Clearance `L`.
    pub clearance: f64,
    /// Cavities of the rotated orientation, if searched successfully.
    pub rotated_cavities: Option<u64>,
    /// Whether the rotated orientation is better.
    pub rotated_advisory: bool,
    /// Relaxation used, as text.
    pub relaxation: String,
}

impl From<&LayoutPlan> for PlanSummary {
    fn from(plan: &LayoutPlan) -> Self {
        Self {
            grid: format!("{} x {}", plan.primary.a, plan.primary.b),
            cavities: plan.primary.score,
            feed: plan.primary.ds,
            pitch: (plan.primary.wc, plan.primary.dc),
            clearance: plan.primary.clearance,
            rotated_cavities: plan.rotated.map(|r| r.score),
            rotated_advisory: plan.rotated_advisory(),
            relaxation: format!("{:?}", plan.relaxation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fillet::CornerProfile;

    fn layout(a: u32, b: u32) -> CavityLayout {
        CavityLayout {
            wp: 12,
            dp: 14,
            a,
            b,
            wc: 132.0,
            dc: 174.0,
            ds: 26.0 + 174.0 * f64::from(b),
            clearance: 10.5,
            score: u64::from(a) * u64::from(b),
        }
    }

    fn plan(primary: CavityLayout) -> LayoutPlan {
        let outcome = SearchOutcome {
            layout: primary,
            relaxation: Relaxation::None,
            reference: ReferenceCounts { a0: 6, b0: 5 },
            stats: SearchStats {
                evaluated: 400,
                accepted: 120,
                elapsed_ms: 1,
            },
        };
        let derived = DerivedConstants {
            mt: 13,
            wpz: 12,
            t: 4,
            additional_margin: 0,
        };
        let center = FilletCenter {
            mx: 76.0,
            my: 56.0,
            profile: CornerProfile::StraightStraight,
        };
        LayoutPlan::new(outcome, derived, center)
    }

    #[test]
    fn test_plan_without_rotation() {
        let plan = plan(layout(6, 5));
        assert!(plan.rotated.is_none());
        assert!(!plan.rotated_advisory());
        assert!(!plan.is_relaxed());
        assert_eq!(plan.computation_time_ms, 1);
    }

    #[test]
    fn test_rotated_advisory_keeps_primary() {
        let plan = plan(layout(6, 5)).with_rotated(layout(8, 4));
        assert!(plan.rotated_advisory());
        assert_eq!(plan.primary.score, 30);
    }

    #[test]
    fn test_rotated_equal_score_is_not_advisory() {
        let plan = plan(layout(6, 5)).with_rotated(layout(5, 6));
        assert!(!plan.rotated_advisory());
    }

    #[test]
    fn test_summary() {
        let plan = plan(layout(6, 5)).with_rotated(layout(8, 4));
        let summary = PlanSummary::from(&plan);
        assert_eq!(summary.grid, "6 x 5");
        assert_eq!(summary.cavities, 30);
        assert_eq!(summary.rotated_cavities, Some(32));
        assert!(summary.rotated_advisory);
        assert_eq!(summary.relaxation, "None");
    }
}
