//! Planning entry points.
//!
//! Wires parameter derivation, the fillet solver and the layout search
//! together. Every call is a pure function of its inputs.

use instant::Instant;
use rayon::prelude::*;

use crate::config::PlateConfig;
use crate::fillet::{CornerProfile, FilletCenter};
use crate::layout::CavityLayout;
use crate::params::DerivedConstants;
use crate::product::ProductSpec;
use crate::result::LayoutPlan;
use crate::search::{LayoutSearch, SearchOutcome};
use crate::Result;

/// Cavity layout planner for a fixed plate configuration.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    search: LayoutSearch,
}

impl Planner {
    /// Creates a planner with the given plate configuration.
    pub fn new(config: PlateConfig) -> Self {
        Self {
            search: LayoutSearch::new(config),
        }
    }

    /// Creates a planner with the default plate configuration.
    pub fn default_config() -> Self {
        Self::new(PlateConfig::default())
    }

    /// Returns the plate configuration.
    pub fn config(&self) -> &PlateConfig {
        self.search.config()
    }

    /// Best layout in the given orientation only.
    pub fn solve(&self, spec: &ProductSpec) -> Result<CavityLayout> {
        let (outcome, _, _) = self.solve_orientation(spec)?;
        Ok(outcome.layout)
    }

    /// Full plan: primary layout plus the rotated-orientation comparison.
    pub fn plan(&self, spec: &ProductSpec) -> Result<LayoutPlan> {
        let start = Instant::now();
        let (outcome, derived, center) = self.solve_orientation(spec)?;
        let mut plan = LayoutPlan::new(outcome, derived, center);

        if self.config().check_rotation {
            match self.solve_orientation(&spec.rotated()) {
                Ok((rotated, _, _)) => plan = plan.with_rotated(rotated.layout),
                Err(e) => log::warn!("rotated orientation has no layout: {}", e),
            }
        }

        if plan.rotated_advisory() {
            log::info!(
                "rotated orientation yields {} cavities against {} (primary kept)",
                plan.rotated.map_or(0, |r| r.score),
                plan.primary.score
            );
        }

        plan.computation_time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "plan {} x {} = {} cavities, feed {:.1}, in {} ms",
            plan.primary.a,
            plan.primary.b,
            plan.primary.score,
            plan.primary.ds,
            plan.computation_time_ms
        );
        Ok(plan)
    }

    /// Plans several products independently, in parallel.
    pub fn plan_batch(&self, specs: &[ProductSpec]) -> Vec<Result<LayoutPlan>> {
        specs.par_iter().map(|spec| self.plan(spec)).collect()
    }

    fn solve_orientation(
        &self,
        spec: &ProductSpec,
    ) -> Result<(SearchOutcome, DerivedConstants, FilletCenter)> {
        spec.validate()?;
        let derived = DerivedConstants::derive(spec);
        let center = CornerProfile::of(spec).solve(spec.w(), spec.d(), spec.c())?;
        let outcome = self.search.search(spec, &derived, &center)?;
        Ok((outcome, derived, center))
    }
}

/// Derives constants, solves the fillet centre and searches the default
/// plate, returning the primary layout.
pub fn derive_and_solve(spec: &ProductSpec) -> Result<CavityLayout> {
    Planner::default_config().solve(spec)
}

/// Plans `spec` on the plate described by `config`.
pub fn plan_layout(spec: &ProductSpec, config: &PlateConfig) -> Result<LayoutPlan> {
    Planner::new(config.clone()).plan(spec)
}

/// Plans each spec on the plate described by `config`.
pub fn plan_batch(specs: &[ProductSpec], config: &PlateConfig) -> Vec<Result<LayoutPlan>> {
    Planner::new(config.clone()).plan_batch(specs)
}
