//! Closed-form intersection primitives.
//!
//! The fillet solver only ever intersects circles with axis-parallel lines or
//! with other circles, so everything here reduces to a quadratic.

use nalgebra::{Point2, Vector2};

/// Relative tolerance for treating a slightly negative discriminant as a
/// tangency.
const DISCRIMINANT_EPSILON: f64 = 1e-12;

/// Real roots of `a·x² + b·x + c = 0`, smaller root first.
///
/// Returns `None` when there is no real root. A double root is returned
/// twice. A degenerate linear equation (`a == 0`) yields its single root twice.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<[f64; 2]> {
    if a == 0.0 {
        if b == 0.0 {
            return None;
        }
        let x = -c / b;
        return Some([x, x]);
    }

    let mut disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        let scale = (b * b).max((4.0 * a * c).abs()).max(1.0);
        if disc < -DISCRIMINANT_EPSILON * scale {
            return None;
        }
        disc = 0.0;
    }

    // Avoid cancellation between -b and sqrt(disc).
    let sqrt_disc = disc.sqrt();
    let q = if b >= 0.0 {
        -0.5 * (b + sqrt_disc)
    } else {
        -0.5 * (b - sqrt_disc)
    };

    let (x1, x2) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };

    Some(if x1 <= x2 { [x1, x2] } else { [x2, x1] })
}

/// Intersections of the circle `|p - center| = radius` with the line `x = x0`.
pub fn circle_vertical_line(center: Point2<f64>, radius: f64, x0: f64) -> Option<[Point2<f64>; 2]> {
    // y² - 2·cy·y + cy² + (x0 - cx)² - radius² = 0
    let dx = x0 - center.x;
    let roots = solve_quadratic(
        1.0,
        -2.0 * center.y,
        center.y * center.y + dx * dx - radius * radius,
    )?;
    Some([Point2::new(x0, roots[0]), Point2::new(x0, roots[1])])
}

/// Intersections of the circle `|p - center| = radius` with the line `y = y0`.
pub fn circle_horizontal_line(
    center: Point2<f64>,
    radius: f64,
    y0: f64,
) -> Option<[Point2<f64>; 2]> {
    let dy = y0 - center.y;
    let roots = solve_quadratic(
        1.0,
        -2.0 * center.x,
        center.x * center.x + dy * dy - radius * radius,
    )?;
    Some([Point2::new(roots[0], y0), Point2::new(roots[1], y0)])
}

/// Intersections of two circles.
///
/// Subtracting the two circle equations gives the radical line, which is
/// perpendicular to the centre line at distance `a` from `c1`. Substituting
/// back into the first circle gives the half-chord `h`.
///
/// Returns `None` for concentric circles or when the circles are disjoint or
/// nested. Tangent circles return the touching point twice.
pub fn circle_circle(
    c1: Point2<f64>,
    r1: f64,
    c2: Point2<f64>,
    r2: f64,
) -> Option<[Point2<f64>; 2]> {
    let delta: Vector2<f64> = c2 - c1;
    let dist = delta.norm();
    if dist == 0.0 {
        return None;
    }

    let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
    let mut h2 = r1 * r1 - a * a;
    if h2 < 0.0 {
        if h2 < -DISCRIMINANT_EPSILON * (r1 * r1).max(1.0) {
            return None;
        }
        h2 = 0.0;
    }
    let h = h2.sqrt();

    let unit = delta / dist;
    let foot = c1 + unit * a;
    let normal = Vector2::new(-unit.y, unit.x);

    Some([foot + normal * h, foot - normal * h])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_two_roots() {
        let roots = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert_relative_eq!(roots[0], 1.0);
        assert_relative_eq!(roots[1], 2.0);
    }

    #[test]
    fn test_quadratic_no_real_root() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_quadratic_double_root() {
        let roots = solve_quadratic(1.0, -4.0, 4.0).unwrap();
        assert_relative_eq!(roots[0], 2.0);
        assert_relative_eq!(roots[1], 2.0);
    }

    #[test]
    fn test_quadratic_linear_fallback() {
        let roots = solve_quadratic(0.0, 2.0, -4.0).unwrap();
        assert_relative_eq!(roots[0], 2.0);
        assert!(solve_quadratic(0.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_quadratic_large_coefficients_stable() {
        // Roots 1e-6 and 1e6
        let roots = solve_quadratic(1.0, -(1e6 + 1e-6), 1.0).unwrap();
        assert_relative_eq!(roots[0], 1e-6, max_relative = 1e-9);
        assert_relative_eq!(roots[1], 1e6, max_relative = 1e-9);
    }

    #[test]
    fn test_circle_vertical_line() {
        let pts = circle_vertical_line(Point2::new(0.0, 0.0), 5.0, 3.0).unwrap();
        assert_relative_eq!(pts[0].y, -4.0);
        assert_relative_eq!(pts[1].y, 4.0);
        assert!(circle_vertical_line(Point2::new(0.0, 0.0), 5.0, 6.0).is_none());
    }

    #[test]
    fn test_circle_horizontal_line() {
        let pts = circle_horizontal_line(Point2::new(1.0, 0.0), 5.0, 4.0).unwrap();
        assert_relative_eq!(pts[0].x, -2.0);
        assert_relative_eq!(pts[1].x, 4.0);
    }

    #[test]
    fn test_circle_circle() {
        let pts = circle_circle(Point2::new(0.0, 0.0), 5.0, Point2::new(8.0, 0.0), 5.0).unwrap();
        for p in &pts {
            assert_relative_eq!(p.x, 4.0);
            assert_relative_eq!(p.y.abs(), 3.0);
        }
        assert!(pts[0].y != pts[1].y);
    }

    #[test]
    fn test_circle_circle_disjoint_and_concentric() {
        assert!(circle_circle(Point2::new(0.0, 0.0), 1.0, Point2::new(5.0, 0.0), 1.0).is_none());
        assert!(circle_circle(Point2::new(0.0, 0.0), 1.0, Point2::new(0.0, 0.0), 2.0).is_none());
        // nested
        assert!(circle_circle(Point2::new(0.0, 0.0), 10.0, Point2::new(1.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_circle_circle_tangent() {
        let pts = circle_circle(Point2::new(0.0, 0.0), 2.0, Point2::new(4.0, 0.0), 2.0).unwrap();
        assert_relative_eq!(pts[0].x, 2.0);
        assert_relative_eq!(pts[0].y, 0.0);
        assert_relative_eq!(pts[1].x, 2.0);
    }
}
