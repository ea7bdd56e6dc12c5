//! Fillet-centre solver.
//!
//! Computes the centre of a fillet of radius `c` tangent to both edges of the
//! product's corner. The local frame has its origin at the footprint centre,
//! `x` along `d` and `y` along `w`, so the corner under study sits near
//! `(d/2, w/2)`.
//!
//! Each edge is either straight or a large-radius arc through the edge
//! midpoint. The fillet centre lies on the edge offset inwards by `c`:
//!
//! | Edge | Offset curve |
//! |------|--------------|
//! | straight `d`-side edge | line `x = d/2 - c` |
//! | straight `w`-side edge | line `y = w/2 - c` |
//! | arc of radius `R` through `(0, w/2)` | circle centre `(0, w/2 - R)`, radius `R - c` |
//! | arc of radius `r` through `(d/2, 0)` | circle centre `(d/2 - r, 0)`, radius `r - c` |
//!
//! Only first-quadrant solutions are accepted.

use nalgebra::Point2;

use crate::error::GeometryError;
use crate::geom::{circle_circle, circle_horizontal_line, circle_vertical_line};
use crate::product::ProductSpec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edge profile combination at the corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CornerProfile {
    /// Both edges straight.
    StraightStraight,
    /// The `d`-spanning edge is an arc of radius `R`, the other is straight.
    CircularStraight {
        /// Arc radius `R`.
        outer_radius: f64,
    },
    /// The `w`-spanning edge is an arc of radius `r`, the other is straight.
    StraightCircular {
        /// Arc radius `r`.
        side_radius: f64,
    },
    /// Both edges are arcs.
    CircularCircular {
        /// Arc radius `R`.
        outer_radius: f64,
        /// Arc radius `r`.
        side_radius: f64,
    },
}

impl CornerProfile {
    /// Selects the profile from the optional radii.
    pub fn from_radii(outer_radius: Option<f64>, side_radius: Option<f64>) -> Self {
        match (outer_radius, side_radius) {
            (None, None) => Self::StraightStraight,
            (Some(outer_radius), None) => Self::CircularStraight { outer_radius },
            (None, Some(side_radius)) => Self::StraightCircular { side_radius },
            (Some(outer_radius), Some(side_radius)) => Self::CircularCircular {
                outer_radius,
                side_radius,
            },
        }
    }

    /// Profile of a product specification.
    pub fn of(spec: &ProductSpec) -> Self {
        Self::from_radii(spec.outer_radius(), spec.side_radius())
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StraightStraight => "straight-straight",
            Self::CircularStraight { .. } => "circular-straight",
            Self::StraightCircular { .. } => "straight-circular",
            Self::CircularCircular { .. } => "circular-circular",
        }
    }

    /// Computes the fillet centre for a `w` × `d` footprint with fillet `c`.
    pub fn solve(&self, w: f64, d: f64, c: f64) -> Result<FilletCenter, GeometryError> {
        for (name, value) in [("w", w), ("d", d), ("c", c)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidInput(format!(
                    "{} must be a positive finite length, got {}",
                    name, value
                )));
            }
        }

        let point = match *self {
            Self::StraightStraight => {
                let p = Point2::new(d / 2.0 - c, w / 2.0 - c);
                if !is_first_quadrant(&p) {
                    return Err(GeometryError::InvalidInput(format!(
                        "fillet radius {} leaves no room in a {} x {} footprint",
                        c, w, d
                    )));
                }
                p
            }
            Self::CircularStraight { outer_radius } => {
                let rc = effective_radius(outer_radius, c)?;
                let center = Point2::new(0.0, w / 2.0 - outer_radius);
                let x0 = d / 2.0 - c;
                let [lower, upper] = circle_vertical_line(center, rc, x0).ok_or_else(|| {
                    GeometryError::NoIntersection(format!(
                        "line x = {:.4} misses circle of radius {:.4}",
                        x0, rc
                    ))
                })?;
                pick_upper(lower, upper, "circular-straight")?
            }
            Self::StraightCircular { side_radius } => {
                let rc = effective_radius(side_radius, c)?;
                let center = Point2::new(d / 2.0 - side_radius, 0.0);
                let y0 = w / 2.0 - c;
                let [left, right] = circle_horizontal_line(center, rc, y0).ok_or_else(|| {
                    GeometryError::NoIntersection(format!(
                        "line y = {:.4} misses circle of radius {:.4}",
                        y0, rc
                    ))
                })?;
                pick_upper(left, right, "straight-circular")?
            }
            Self::CircularCircular {
                outer_radius,
                side_radius,
            } => {
                let r1 = effective_radius(outer_radius, c)?;
                let r2 = effective_radius(side_radius, c)?;
                let c1 = Point2::new(0.0, w / 2.0 - outer_radius);
                let c2 = Point2::new(d / 2.0 - side_radius, 0.0);
                let [p, q] = circle_circle(c1, r1, c2, r2).ok_or_else(|| {
                    GeometryError::NoIntersection(format!(
                        "offset circles (R - c = {:.4}, r - c = {:.4}) do not meet",
                        r1, r2
                    ))
                })?;
                match (is_first_quadrant(&p), is_first_quadrant(&q)) {
                    (true, false) => p,
                    (false, true) => q,
                    (true, true) if p == q => p,
                    (true, true) => return Err(GeometryError::Ambiguous(p.x, p.y, q.x, q.y)),
                    (false, false) => {
                        return Err(GeometryError::NoPositiveRoot(
                            "circular-circular intersections lie outside the first quadrant"
                                .into(),
                        ))
                    }
                }
            }
        };

        log::debug!(
            "fillet centre ({}): ({:.4}, {:.4})",
            self.name(),
            point.x,
            point.y
        );

        Ok(FilletCenter {
            mx: point.x,
            my: point.y,
            profile: *self,
        })
    }
}

/// Centre of the corner fillet in the product's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilletCenter {
    /// Coordinate along `d`.
    pub mx: f64,
    /// Coordinate along `w`.
    pub my: f64,
    /// Profile the centre was solved for.
    pub profile: CornerProfile,
}

impl FilletCenter {
    /// Euclidean distance from the centre to `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (Point2::new(self.mx, self.my) - Point2::new(x, y)).norm()
    }
}

/// Standalone fillet-centre entry point.
///
/// `outer_radius` is `R` (curvature of the `d`-spanning edges), `side_radius`
/// is `r` (curvature of the `w`-spanning edges).
pub fn solve_fillet_center(
    w: f64,
    d: f64,
    c: f64,
    outer_radius: Option<f64>,
    side_radius: Option<f64>,
) -> Result<FilletCenter, GeometryError> {
    CornerProfile::from_radii(outer_radius, side_radius).solve(w, d, c)
}

fn effective_radius(radius: f64, c: f64) -> Result<f64, GeometryError> {
    let effective = radius - c;
    if !effective.is_finite() || effective <= 0.0 {
        return Err(GeometryError::DegenerateRadius {
            radius,
            fillet: c,
            effective,
        });
    }
    Ok(effective)
}

fn is_first_quadrant(p: &Point2<f64>) -> bool {
    p.x > 0.0 && p.y > 0.0
}

/// Keeps the root on the product side of the arc (the larger coordinate).
fn pick_upper(
    low: Point2<f64>,
    high: Point2<f64>,
    case: &str,
) -> Result<Point2<f64>, GeometryError> {
    if is_first_quadrant(&high) {
        Ok(high)
    } else if is_first_quadrant(&low) {
        Ok(low)
    } else {
        Err(GeometryError::NoPositiveRoot(format!(
            "{} roots ({:.4}, {:.4}) and ({:.4}, {:.4})",
            case, low.x, low.y, high.x, high.y
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_profile_selection() {
        assert_eq!(
            CornerProfile::from_radii(None, None),
            CornerProfile::StraightStraight
        );
        assert_eq!(
            CornerProfile::from_radii(Some(900.0), None),
            CornerProfile::CircularStraight {
                outer_radius: 900.0
            }
        );
        assert_eq!(
            CornerProfile::from_radii(None, Some(700.0)),
            CornerProfile::StraightCircular { side_radius: 700.0 }
        );
        assert_eq!(
            CornerProfile::from_radii(Some(900.0), Some(700.0)).name(),
            "circular-circular"
        );
    }

    #[test]
    fn test_straight_straight_closed_form() {
        for &(w, d, c) in &[(175.0, 175.0, 5.0), (90.0, 240.0, 3.5), (10.0, 12.0, 4.9)] {
            let center = solve_fillet_center(w, d, c, None, None).unwrap();
            assert_eq!(center.mx, d / 2.0 - c);
            assert_eq!(center.my, w / 2.0 - c);
        }
    }

    #[test]
    fn test_straight_straight_fillet_too_large() {
        let err = solve_fillet_center(10.0, 100.0, 5.0, None, None).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidInput(_)));
    }

    #[test]
    fn test_circular_straight_matches_quadratic_root() {
        let (w, d, c, big_r) = (161.0, 161.0, 4.0, 1000.0);
        let center = solve_fillet_center(w, d, c, Some(big_r), None).unwrap();

        let x0 = d / 2.0 - c;
        let expected = (w / 2.0 - big_r) + ((big_r - c).powi(2) - x0 * x0).sqrt();
        assert_relative_eq!(center.mx, x0);
        assert_relative_eq!(center.my, expected, epsilon = 1e-9);
        assert!(center.my > 0.0 && center.my < w / 2.0 - c);
    }

    #[test]
    fn test_straight_circular_is_mirror_of_circular_straight() {
        let a = solve_fillet_center(120.0, 200.0, 4.0, Some(800.0), None).unwrap();
        let b = solve_fillet_center(200.0, 120.0, 4.0, None, Some(800.0)).unwrap();
        assert_relative_eq!(a.mx, b.my, epsilon = 1e-9);
        assert_relative_eq!(a.my, b.mx, epsilon = 1e-9);
    }

    #[test]
    fn test_circular_circular_symmetry() {
        let center = solve_fillet_center(161.0, 161.0, 4.0, Some(1000.0), Some(1000.0)).unwrap();
        assert_relative_eq!(center.mx, center.my, epsilon = 1e-9);
        assert!(center.mx > 0.0);
        // Both arcs pull the corner inwards relative to the straight case.
        assert!(center.mx < 161.0 / 2.0 - 4.0);
    }

    #[test]
    fn test_circular_circular_point_on_both_offsets() {
        let (w, d, c, big_r, small_r) = (140.0, 220.0, 6.0, 1500.0, 400.0);
        let center = solve_fillet_center(w, d, c, Some(big_r), Some(small_r)).unwrap();
        let d1 = center.distance_to(0.0, w / 2.0 - big_r);
        let d2 = center.distance_to(d / 2.0 - small_r, 0.0);
        assert_relative_eq!(d1, big_r - c, epsilon = 1e-7);
        assert_relative_eq!(d2, small_r - c, epsilon = 1e-7);
    }

    #[test]
    fn test_circular_circular_two_candidates_is_ambiguous() {
        let err = solve_fillet_center(20.0, 40.0, 5.0, Some(34.0), Some(13.0)).unwrap_err();
        match err {
            GeometryError::Ambiguous(px, py, qx, qy) => {
                assert!(px > 0.0 && py > 0.0);
                assert!(qx > 0.0 && qy > 0.0);
                assert!((px - qx).abs() > 1.0);
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_circular_circular_no_first_quadrant_point() {
        // Both intersections sit below the x axis.
        let err = solve_fillet_center(20.0, 40.0, 1.0, Some(20.0), Some(30.0)).unwrap_err();
        assert!(matches!(err, GeometryError::NoPositiveRoot(_)));
    }

    #[test]
    fn test_circular_circular_tangent_offsets() {
        // Offset circles of radius 10 at (0, -3) and 5 at (4, 0) touch
        // internally at (8, 3).
        let center = solve_fillet_center(16.0, 20.0, 1.0, Some(11.0), Some(6.0)).unwrap();
        assert_relative_eq!(center.mx, 8.0, epsilon = 1e-9);
        assert_relative_eq!(center.my, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_radius() {
        let err = solve_fillet_center(100.0, 100.0, 5.0, Some(5.0), None).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateRadius { .. }));

        let err = solve_fillet_center(100.0, 100.0, 5.0, Some(50.0), Some(2.0)).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateRadius { radius, .. } if radius == 2.0));
    }

    #[test]
    fn test_circular_straight_no_intersection() {
        // Offset line lies outside the offset circle.
        let err = solve_fillet_center(100.0, 400.0, 5.0, Some(60.0), None).unwrap_err();
        assert!(matches!(err, GeometryError::NoIntersection(_)));
    }

    #[test]
    fn test_circular_straight_no_positive_root() {
        // Strong curvature drops the whole offset arc below the x axis at x0.
        let err = solve_fillet_center(20.0, 180.0, 2.0, Some(100.0), None).unwrap_err();
        assert!(matches!(err, GeometryError::NoPositiveRoot(_)));
    }
}
