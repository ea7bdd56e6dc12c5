//! # MoldPlan Core
//!
//! Cavity layout planning for injection-mold plates.
//!
//! Given one product's planar footprint, this crate decides how many cavities
//! fit on a fixed-size mold plate as an `a` × `b` grid, keeping a minimum
//! clearance between the corner fillet centre and the cavity pitch reference
//! point. Layouts are ranked by cavity count, then by the shorter feed
//! dimension.
//!
//! ## Core Components
//!
//! - **Parameter derivation**: [`DerivedConstants`] - margins and pitch thresholds
//! - **Fillet solver**: [`CornerProfile`], [`solve_fillet_center`] - closed-form
//!   fillet centre for straight and circular edge combinations
//! - **Layout search**: [`LayoutSearch`] - discrete pitch enumeration with
//!   relaxation fallback
//! - **Planner**: [`Planner`], [`derive_and_solve`], [`plan_layout`] - end-to-end
//!   entry points including the rotated-orientation check
//!
//! ## Quick Start
//!
//! ```rust
//! use moldplan_core::{plan_layout, PlateConfig, ProductSpec};
//!
//! let spec = ProductSpec::new(175.0, 175.0, 5.0, 3.0, 50.0);
//! let config = PlateConfig::new().with_max_plate_width(975.0);
//!
//! let plan = plan_layout(&spec, &config).unwrap();
//! println!(
//!     "{} x {} cavities, feed {:.1} mm",
//!     plan.primary.a, plan.primary.b, plan.primary.ds
//! );
//! ```
//!
//! ## Fillet Centre Only
//!
//! ```rust
//! use moldplan_core::solve_fillet_center;
//!
//! let center = solve_fillet_center(161.0, 161.0, 4.0, Some(1000.0), None).unwrap();
//! assert!(center.my > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod fillet;
pub mod geom;
pub mod layout;
pub mod params;
pub mod planner;
pub mod product;
pub mod result;
pub mod search;

// Re-exports
pub use config::{PitchFloor, PlateConfig};
pub use error::{GeometryError, LayoutError, Result};
pub use fillet::{solve_fillet_center, CornerProfile, FilletCenter};
pub use layout::CavityLayout;
pub use params::DerivedConstants;
pub use planner::{derive_and_solve, plan_batch, plan_layout, Planner};
pub use product::{ProductSpec, LID_CONVEX};
pub use result::{LayoutPlan, PlanSummary};
pub use search::{LayoutSearch, ReferenceCounts, Relaxation, SearchOutcome, SearchStats};
