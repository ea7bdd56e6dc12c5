//! Discrete cavity layout search.
//!
//! Enumerates integer pitch increments `(wp, dp)` and keeps the feasible grid
//! with the most cavities, breaking ties on the shorter feed dimension.
//!
//! # Algorithm
//!
//! 1. **Reference counts**: `a0 = floor(W / (w + wpz))`,
//!    `b0 = floor((Lmax - 2·mt) / (d + wpz))`. Both cap the search.
//! 2. **Primary search** with `(a0, b0)` as caps. The pitch range is
//!    `[floor, W / a0 - w]` by `[floor, usable / b0 - d]`, further limited by
//!    the optional pitch cap.
//! 3. **Relaxation**: when nothing is feasible, search again with `a0 - 1`
//!    and with `b0 - 1` over the unrestricted range `[1, W - w]` by
//!    `[1, usable - d]`. Neither the pitch floor nor the pitch cap applies;
//!    the reduced reference only caps the cavity counts.
//!
//! Enumeration order is `wp` ascending, then `dp` ascending. Only strict
//! improvements replace the incumbent, so results are deterministic. Cavity
//! counts never grow with the pitch, so a row (or the rest of the grid) is
//! skipped once its best possible count falls below the incumbent.

use std::ops::RangeInclusive;

use instant::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PlateConfig;
use crate::fillet::FilletCenter;
use crate::layout::CavityLayout;
use crate::params::DerivedConstants;
use crate::product::ProductSpec;
use crate::{LayoutError, Result};

/// Reference cavity counts bounding the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceCounts {
    /// Columns at base pitch.
    pub a0: u32,
    /// Rows at base pitch.
    pub b0: u32,
}

/// Which search produced the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relaxation {
    /// Primary search with `(a0, b0)`.
    #[default]
    None,
    /// Fallback with `(a0 - 1, b0)`.
    ReducedColumns,
    /// Fallback with `(a0, b0 - 1)`.
    ReducedRows,
}

/// Enumeration statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// `(wp, dp)` pairs examined.
    pub evaluated: u64,
    /// Pairs that satisfied every constraint.
    pub accepted: u64,
    /// Wall-clock time in milliseconds.
    pub elapsed_ms: u64,
}

/// Winning layout of one orientation together with how it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOutcome {
    /// Best feasible layout.
    pub layout: CavityLayout,
    /// Search that produced it.
    pub relaxation: Relaxation,
    /// Reference counts of the primary search.
    pub reference: ReferenceCounts,
    /// Enumeration statistics across all attempts.
    pub stats: SearchStats,
}

/// Inputs shared by every candidate of one search.
struct Problem<'a> {
    spec: &'a ProductSpec,
    derived: &'a DerivedConstants,
    center: &'a FilletCenter,
}

/// Pitch increments enumerated by one search.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PitchRange {
    wp: RangeInclusive<u32>,
    dp: RangeInclusive<u32>,
}

/// Layout search engine.
#[derive(Debug, Clone, Default)]
pub struct LayoutSearch {
    config: PlateConfig,
}

impl LayoutSearch {
    /// Creates a search engine with the given plate configuration.
    pub fn new(config: PlateConfig) -> Self {
        Self { config }
    }

    /// Returns the plate configuration.
    pub fn config(&self) -> &PlateConfig {
        &self.config
    }

    /// Computes the reference counts `(a0, b0)`.
    pub fn reference_counts(
        &self,
        spec: &ProductSpec,
        derived: &DerivedConstants,
    ) -> ReferenceCounts {
        let base = derived.base_pitch();
        let a0 = count_fitting(self.config.max_plate_width, spec.w() + base);
        let b0 = count_fitting(self.config.usable_length(derived), spec.d() + base);
        ReferenceCounts { a0, b0 }
    }

    /// Finds the best feasible layout for one orientation.
    pub fn search(
        &self,
        spec: &ProductSpec,
        derived: &DerivedConstants,
        center: &FilletCenter,
    ) -> Result<SearchOutcome> {
        self.config.validate()?;

        let start = Instant::now();
        let reference = self.reference_counts(spec, derived);
        log::debug!(
            "reference counts a0 = {}, b0 = {} (w = {}, d = {}, wpz = {})",
            reference.a0,
            reference.b0,
            spec.w(),
            spec.d(),
            derived.wpz
        );

        if reference.a0 == 0 || reference.b0 == 0 {
            return Err(LayoutError::DegenerateReference {
                a0: reference.a0,
                b0: reference.b0,
            });
        }

        let problem = Problem {
            spec,
            derived,
            center,
        };
        let mut stats = SearchStats::default();

        let primary = match self.primary_range(&problem, reference) {
            Some(range) => {
                self.enumerate(&problem, reference.a0, reference.b0, range, &mut stats, start)?
            }
            None => None,
        };
        let found = match primary {
            Some(layout) => Some((layout, Relaxation::None)),
            None if self.config.relax => {
                log::warn!(
                    "no feasible layout at a0 = {}, b0 = {}; relaxing reference counts",
                    reference.a0,
                    reference.b0
                );
                self.relax(&problem, reference, &mut stats, start)?
            }
            None => None,
        };

        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        match found {
            Some((layout, relaxation)) => {
                log::debug!(
                    "layout {}x{} (wp = {}, dp = {}, ds = {:.1}) via {:?}, {} candidates",
                    layout.a,
                    layout.b,
                    layout.wp,
                    layout.dp,
                    layout.ds,
                    relaxation,
                    stats.evaluated
                );
                Ok(SearchOutcome {
                    layout,
                    relaxation,
                    reference,
                    stats,
                })
            }
            None => Err(LayoutError::Infeasible {
                evaluated: stats.evaluated,
            }),
        }
    }

    /// Runs both relaxed searches and keeps the better one.
    fn relax(
        &self,
        problem: &Problem<'_>,
        reference: ReferenceCounts,
        stats: &mut SearchStats,
        start: Instant,
    ) -> Result<Option<(CavityLayout, Relaxation)>> {
        let Some(range) = self.relaxed_range(problem) else {
            return Ok(None);
        };

        let columns = if reference.a0 > 1 {
            let a_ref = reference.a0 - 1;
            self.enumerate(problem, a_ref, reference.b0, range.clone(), stats, start)?
        } else {
            None
        };
        let rows = if reference.b0 > 1 {
            let b_ref = reference.b0 - 1;
            self.enumerate(problem, reference.a0, b_ref, range, stats, start)?
        } else {
            None
        };

        Ok(match (columns, rows) {
            (Some(c), Some(r)) if r.outranks(&c) => Some((r, Relaxation::ReducedRows)),
            (Some(c), _) => Some((c, Relaxation::ReducedColumns)),
            (None, Some(r)) => Some((r, Relaxation::ReducedRows)),
            (None, None) => None,
        })
    }

    /// Pitch range of the primary search.
    fn primary_range(
        &self,
        problem: &Problem<'_>,
        reference: ReferenceCounts,
    ) -> Option<PitchRange> {
        let floor = self.config.pitch_floor.min_pitch(problem.derived);
        let cap = self.config.pitch_cap.unwrap_or(u32::MAX);
        let wp_max = pitch_limit(self.config.max_plate_width, reference.a0, problem.spec.w())?;
        let dp_max = pitch_limit(
            self.config.usable_length(problem.derived),
            reference.b0,
            problem.spec.d(),
        )?;
        Some(PitchRange {
            wp: floor..=wp_max.min(cap),
            dp: floor..=dp_max.min(cap),
        })
    }

    /// Pitch range of the relaxed searches: every pitch that leaves room for a
    /// single cavity.
    fn relaxed_range(&self, problem: &Problem<'_>) -> Option<PitchRange> {
        let wp_max = pitch_limit(self.config.max_plate_width, 1, problem.spec.w())?;
        let dp_max = pitch_limit(
            self.config.usable_length(problem.derived),
            1,
            problem.spec.d(),
        )?;
        Some(PitchRange {
            wp: 1..=wp_max,
            dp: 1..=dp_max,
        })
    }

    /// Enumerates `range` with `(a_ref, b_ref)` as caps.
    fn enumerate(
        &self,
        problem: &Problem<'_>,
        a_ref: u32,
        b_ref: u32,
        range: PitchRange,
        stats: &mut SearchStats,
        start: Instant,
    ) -> Result<Option<CavityLayout>> {
        let max_width = self.config.max_plate_width;
        let usable = self.config.usable_length(problem.derived);
        let mut best: Option<CavityLayout> = None;

        for wp in range.wp {
            if self.config.time_limit_ms > 0
                && start.elapsed().as_millis() as u64 >= self.config.time_limit_ms
            {
                return Err(LayoutError::TimeLimitExceeded(self.config.time_limit_ms));
            }

            let columns = a_ref.min(count_fitting(max_width, problem.spec.w() + f64::from(wp)));
            if best.is_some_and(|b| u64::from(columns) * u64::from(b_ref) < b.score) {
                break;
            }

            for dp in range.dp.clone() {
                let rows = b_ref.min(count_fitting(usable, problem.spec.d() + f64::from(dp)));
                if best.is_some_and(|b| u64::from(columns) * u64::from(rows) < b.score) {
                    break;
                }

                stats.evaluated += 1;
                let Some(candidate) =
                    self.evaluate(problem.spec, problem.derived, problem.center, a_ref, b_ref, wp, dp)
                else {
                    continue;
                };
                stats.accepted += 1;
                if best.as_ref().map_or(true, |b| candidate.outranks(b)) {
                    best = Some(candidate);
                }
            }
        }

        Ok(best)
    }

    /// Scores a single `(wp, dp)` candidate.
    ///
    /// Returns `None` if the candidate violates a plate or clearance constraint.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate(
        &self,
        spec: &ProductSpec,
        derived: &DerivedConstants,
        center: &FilletCenter,
        a_ref: u32,
        b_ref: u32,
        wp: u32,
        dp: u32,
    ) -> Option<CavityLayout> {
        let max_width = self.config.max_plate_width;
        let wc = spec.w() + f64::from(wp);
        let dc = spec.d() + f64::from(dp);

        let a = a_ref.min(count_fitting(max_width, wc));
        let b = b_ref.min(count_fitting(self.config.usable_length(derived), dc));
        if a == 0 || b == 0 {
            return None;
        }

        let ds = 2.0 * derived.margin() + dc * f64::from(b);
        if ds > self.config.max_plate_length {
            return None;
        }

        if f64::from(a) * wc > max_width {
            return None;
        }

        let clearance = center.distance_to(dc / 2.0, wc / 2.0) - spec.c() - self.config.standoff;
        if clearance <= self.config.clearance_threshold {
            return None;
        }

        Some(CavityLayout {
            wp,
            dp,
            a,
            b,
            wc,
            dc,
            ds,
            clearance,
            score: u64::from(a) * u64::from(b),
        })
    }
}

/// Largest pitch increment for which `reference` cavities of `length` still
/// fit in `span`; `None` if not even a unit pitch fits.
fn pitch_limit(span: f64, reference: u32, length: f64) -> Option<u32> {
    let bound = (span / f64::from(reference) - length).floor();
    if !bound.is_finite() || bound < 1.0 {
        return None;
    }
    Some(bound.min(f64::from(u32::MAX)) as u32)
}

/// `floor(span / pitch)` clamped to the `u32` range; zero for non-positive input.
fn count_fitting(span: f64, pitch: f64) -> u32 {
    if pitch <= 0.0 || span <= 0.0 {
        return 0;
    }
    let n = (span / pitch).floor();
    if n.is_finite() {
        n.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
