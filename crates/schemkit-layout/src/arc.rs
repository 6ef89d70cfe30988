//! Three-point arc solving for voltage arrows.
//!
//! A voltage arrow between two terminal ends is a circular arc. When the
//! arrow has to clear an obstacle (typically the component body it annotates)
//! the arc is required to pass through a waypoint next to the obstacle; the
//! circle through the three points is found via the intersection of the
//! chords' perpendicular bisectors.

use nalgebra::{Matrix2, Vector2};
use tracing::trace;

use schemkit_core::{BoundingBox, GeometryError, Point, Result, Vec3, DOWN, UP};

/// Relative determinant threshold below which the bisector system is treated
/// as singular (collinear input points).
const SINGULARITY_TOLERANCE: f64 = 1e-9;

/// Centre and radius of the circle through three points.
///
/// The centre is the intersection of the perpendicular bisectors of chords
/// `a`→`b` and `b`→`c`, found by solving the 2×2 linear system formed from
/// the bisectors' parametric equations.
///
/// # Errors
///
/// [`GeometryError::CollinearPoints`] when the points are collinear within
/// tolerance: the system is singular and no circumcircle exists.
pub fn circumcircle(a: Point, b: Point, c: Point) -> Result<(Point, f64)> {
    let chord_ab = b - a;
    let chord_bc = c - b;

    let mid_ab = a + chord_ab * 0.5;
    let mid_bc = b + chord_bc * 0.5;

    let perp_ab = chord_ab.cross_out();
    let perp_bc = chord_bc.cross_out();

    let matrix = Matrix2::new(perp_ab.x, -perp_bc.x, perp_ab.y, -perp_bc.y);
    let scale = (chord_ab.length() * chord_bc.length()).max(f64::MIN_POSITIVE);
    if matrix.determinant().abs() < SINGULARITY_TOLERANCE * scale {
        return Err(GeometryError::CollinearPoints { x: b.x, y: b.y }.into());
    }

    let rhs = Vector2::new(mid_bc.x - mid_ab.x, mid_bc.y - mid_ab.y);
    let solution = matrix
        .lu()
        .solve(&rhs)
        .ok_or(GeometryError::CollinearPoints { x: b.x, y: b.y })?;

    let centre = mid_ab + perp_ab * solution.x;
    let radius = (centre - b).length();
    Ok((centre, radius))
}

/// Swept angle of the arc from `from` to `to` passing through `waypoint`.
///
/// Of the two arcs through the three points, the returned angle always
/// selects the non-reflex one (< π); `2·asin(chord / 2r)` can never produce
/// the reflex solution. Callers wanting a clockwise arc negate the result.
///
/// # Errors
///
/// - [`GeometryError::CollinearPoints`] when the waypoint lies on the
///   straight line between the endpoints.
/// - [`GeometryError::ChordExceedsDiameter`] when the chord is longer than
///   the circle's diameter by more than floating-point noise. Noise-level
///   overshoot is clamped.
pub fn solve_arc(from: Point, to: Point, waypoint: Point) -> Result<f64> {
    let (centre, radius) = circumcircle(from, waypoint, to)?;
    let chord = (to - from).length();

    let ratio = chord / (2.0 * radius);
    if ratio > 1.0 + 1e-9 {
        return Err(GeometryError::ChordExceedsDiameter {
            chord,
            diameter: 2.0 * radius,
        }
        .into());
    }

    let angle = 2.0 * ratio.min(1.0).asin();
    trace!(?centre, radius, chord, angle, "solved three-point arc");
    Ok(angle)
}

/// Waypoint next to an obstacle for an arc between `from` and `to`.
///
/// Takes the obstacle's extreme point on the arc's side as if the obstacle
/// were rotated to align with the chord, then pushes that point `clearance`
/// further away from the obstacle's centre. Clockwise arcs pass the obstacle
/// on the chord-frame upper side, anticlockwise on the lower.
///
/// # Errors
///
/// [`GeometryError::ZeroVector`] when the computed extreme point coincides
/// with the obstacle centre (a degenerate, zero-size obstacle).
pub fn waypoint_around(
    obstacle: &BoundingBox,
    from: Point,
    to: Point,
    clockwise: bool,
    clearance: f64,
) -> Result<Point> {
    let chord_angle = (to - from).angle();
    let side = if clockwise { UP } else { DOWN };

    let extreme = obstacle.critical_point_at_rotation(side, -chord_angle);
    let centre = obstacle.center();
    let offset = extreme - centre;
    let direction = offset.normalized()?;
    Ok(centre + direction * (offset.length() + clearance))
}

/// Concrete arc geometry derived from a chord and a swept angle.
///
/// Positive angles sweep anticlockwise (bulging to the right of the chord
/// direction), negative clockwise. Provides the derived radius, centre, and
/// bow point needed to render the arc and anchor its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub start: Point,
    pub end: Point,
    pub angle: f64,
}

impl ArcGeometry {
    pub fn new(start: Point, end: Point, angle: f64) -> Self {
        Self { start, end, angle }
    }

    pub fn chord_length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Radius of the circle carrying the arc.
    pub fn radius(&self) -> f64 {
        let half = (self.angle.abs() / 2.0).max(f64::MIN_POSITIVE);
        self.chord_length() / (2.0 * half.sin())
    }

    /// Height of the arc above its chord.
    pub fn sagitta(&self) -> f64 {
        self.radius() * (1.0 - (self.angle.abs() / 2.0).cos())
    }

    /// The point on the arc furthest from the chord (the top of the bow).
    /// Marks anchor here.
    pub fn bow(&self) -> Result<Point> {
        let direction = (self.end - self.start).normalized()?;
        let bulge_side = direction.cross_out() * self.angle.signum();
        Ok(self.start.midpoint(self.end) + bulge_side * self.sagitta())
    }

    /// Centre of the carrying circle, on the opposite side of the chord from
    /// the bow.
    pub fn centre(&self) -> Result<Point> {
        let direction = (self.end - self.start).normalized()?;
        let bulge_side = direction.cross_out() * self.angle.signum();
        let apothem = self.radius() * (self.angle.abs() / 2.0).cos();
        Ok(self.start.midpoint(self.end) - bulge_side * apothem)
    }
}

/// Shrink the chord of an arc inward by `buffer` at each end, keeping the
/// same carrying circle. Used to keep arrow ends clear of the terminals.
pub fn buffered_chord(from: Point, to: Point, buffer: f64) -> (Point, Point) {
    let Ok(direction) = (to - from).normalized() else {
        return (from, to);
    };
    let length = (to - from).length();
    // Never invert the chord; degenerate to its midpoint instead.
    let buffer = buffer.min(length / 2.0);
    (from + direction * buffer, to - direction * buffer)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use schemkit_core::Error;

    use super::*;

    #[test]
    fn test_circumcircle_of_unit_semicircle_points() {
        let (centre, radius) =
            circumcircle(Vec3::xy(-1.0, 0.0), Vec3::xy(0.0, 1.0), Vec3::xy(1.0, 0.0)).unwrap();
        assert!(centre.approx_eq(Vec3::xy(0.0, 0.0)), "{centre:?}");
        assert_relative_eq!(radius, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_circumcircle_passes_through_all_three_points() {
        let a = Vec3::xy(0.3, -1.2);
        let b = Vec3::xy(2.0, 0.7);
        let c = Vec3::xy(-1.5, 2.4);
        let (centre, radius) = circumcircle(a, b, c).unwrap();
        for p in [a, b, c] {
            assert_relative_eq!(centre.distance_to(p), radius, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_collinear_points_rejected() {
        let err = circumcircle(Vec3::xy(0.0, 0.0), Vec3::xy(1.0, 1.0), Vec3::xy(2.0, 2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Geometry(GeometryError::CollinearPoints { .. })
        ));
    }

    #[test]
    fn test_solve_arc_semicircle() {
        let angle = solve_arc(Vec3::xy(-1.0, 0.0), Vec3::xy(1.0, 0.0), Vec3::xy(0.0, 1.0))
            .unwrap();
        assert_relative_eq!(angle, std::f64::consts::PI, epsilon = 1e-9);
    }

    #[test]
    fn test_solve_arc_shallow_waypoint_gives_small_angle() {
        let angle = solve_arc(Vec3::xy(-1.0, 0.0), Vec3::xy(1.0, 0.0), Vec3::xy(0.0, 0.1))
            .unwrap();
        assert!(angle > 0.0 && angle < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_solve_arc_is_never_reflex() {
        // Even a waypoint well off the chord yields the non-reflex solution.
        let angle = solve_arc(Vec3::xy(-1.0, 0.0), Vec3::xy(1.0, 0.0), Vec3::xy(0.5, 3.0))
            .unwrap();
        assert!(angle <= std::f64::consts::PI + 1e-9);
    }

    #[test]
    fn test_waypoint_around_box_below_for_anticlockwise() {
        // Horizontal chord above a unit box: the anticlockwise waypoint hugs
        // the box's lower face, pushed out by the clearance.
        let obstacle = BoundingBox::new(Vec3::xy(-0.5, -0.5), Vec3::xy(0.5, 0.5));
        let waypoint = waypoint_around(
            &obstacle,
            Vec3::xy(-1.0, 0.0),
            Vec3::xy(1.0, 0.0),
            false,
            0.1,
        )
        .unwrap();
        assert_relative_eq!(waypoint.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(waypoint.y, -0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_waypoint_around_box_above_for_clockwise() {
        let obstacle = BoundingBox::new(Vec3::xy(-0.5, -0.5), Vec3::xy(0.5, 0.5));
        let waypoint = waypoint_around(
            &obstacle,
            Vec3::xy(-1.0, 0.0),
            Vec3::xy(1.0, 0.0),
            true,
            0.1,
        )
        .unwrap();
        assert_relative_eq!(waypoint.y, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_geometry_semicircle_bow() {
        // Anticlockwise semicircle over a horizontal chord bulges downward
        // (to the right of the direction of travel).
        let arc = ArcGeometry::new(Vec3::xy(-1.0, 0.0), Vec3::xy(1.0, 0.0), std::f64::consts::PI);
        assert_relative_eq!(arc.radius(), 1.0, epsilon = 1e-9);
        let bow = arc.bow().unwrap();
        assert!(bow.approx_eq(Vec3::xy(0.0, -1.0)), "{bow:?}");
        let centre = arc.centre().unwrap();
        assert!(centre.approx_eq(Vec3::xy(0.0, 0.0)), "{centre:?}");
    }

    #[test]
    fn test_arc_geometry_round_trips_solver() {
        // Solve an arc through a waypoint, then check the reconstructed bow
        // lands back on the waypoint.
        let from = Vec3::xy(-1.0, 0.0);
        let to = Vec3::xy(1.0, 0.0);
        let waypoint = Vec3::xy(0.0, -0.5);
        let angle = solve_arc(from, to, waypoint).unwrap();
        let arc = ArcGeometry::new(from, to, angle);
        assert!(arc.bow().unwrap().approx_eq(waypoint), "{:?}", arc.bow());
    }

    #[test]
    fn test_buffered_chord_shrinks_both_ends() {
        let (a, b) = buffered_chord(Vec3::xy(0.0, 0.0), Vec3::xy(2.0, 0.0), 0.25);
        assert!(a.approx_eq(Vec3::xy(0.25, 0.0)));
        assert!(b.approx_eq(Vec3::xy(1.75, 0.0)));
    }
}
