//! Error types for fillet geometry and cavity layout search.

use thiserror::Error;

/// Failure of the fillet-centre geometry solve.
///
/// A `GeometryError` means the corner profile is incompatible with the
/// requested fillet radius. It is never a zero coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// An edge radius does not leave room for the fillet (`radius - c <= 0`).
    #[error("effective radius {effective:.4} is not positive (edge radius {radius}, fillet {fillet})")]
    DegenerateRadius {
        /// Edge radius (`R` or `r`).
        radius: f64,
        /// Fillet radius `c`.
        fillet: f64,
        /// `radius - fillet`.
        effective: f64,
    },

    /// The offset curves do not intersect at all.
    #[error("offset curves do not intersect: {0}")]
    NoIntersection(String),

    /// The curves intersect, but no intersection lies in the first quadrant.
    #[error("no first-quadrant fillet centre: {0}")]
    NoPositiveRoot(String),

    /// Both circle-circle intersections lie in the first quadrant.
    #[error("ambiguous fillet centre: ({0:.4}, {1:.4}) and ({2:.4}, {3:.4}) both qualify")]
    Ambiguous(f64, f64, f64, f64),

    /// Input lengths are out of range.
    #[error("invalid geometry input: {0}")]
    InvalidInput(String),
}

/// Failure of the layout search or of one of its preconditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The product specification failed validation.
    #[error("invalid product specification: {0}")]
    InvalidSpec(String),

    /// The plate configuration failed validation.
    #[error("invalid plate configuration: {0}")]
    InvalidConfig(String),

    /// The fillet centre could not be computed.
    #[error("incompatible corner geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// The reference cavity counts are zero; the product does not fit the plate.
    #[error("reference counts degenerate (a0 = {a0}, b0 = {b0}): product does not fit the plate")]
    DegenerateReference {
        /// Reference column count.
        a0: u32,
        /// Reference row count.
        b0: u32,
    },

    /// No pitch combination satisfies the plate and clearance constraints,
    /// even after relaxation.
    #[error("no feasible pitch combination ({evaluated} candidates evaluated)")]
    Infeasible {
        /// Number of `(wp, dp)` candidates examined across all attempts.
        evaluated: u64,
    },

    /// The wall-clock guard fired before the enumeration finished.
    #[error("search exceeded time limit of {0} ms")]
    TimeLimitExceeded(u64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_converts() {
        let err: LayoutError = GeometryError::NoPositiveRoot("case".into()).into();
        assert!(matches!(err, LayoutError::Geometry(_)));
        assert!(err.to_string().contains("incompatible corner geometry"));
    }

    #[test]
    fn test_degenerate_reference_message() {
        let err = LayoutError::DegenerateReference { a0: 0, b0: 3 };
        assert_eq!(
            err.to_string(),
            "reference counts degenerate (a0 = 0, b0 = 3): product does not fit the plate"
        );
    }
}
