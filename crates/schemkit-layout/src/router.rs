//! Automatic orthogonal wire routing.
//!
//! Given two terminals, computes the interior corner points of a wire that
//! connects their ends using only horizontal and vertical segments, never
//! more than two corners, while doing its best to avoid running backwards
//! through either owning component.

use std::f64::consts::FRAC_PI_2;

use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use schemkit_core::{
    cardinalized, is_behind_plane, line_intersection, move_forward_of_plane, GeometryError, Point,
    Result, RoutingError, Vec3,
};

use crate::terminal::Terminal;

/// Interior corner points of a routed wire, in order from the `from` terminal
/// to the `to` terminal. Automatic routes have at most two entries.
pub type CornerPoints = SmallVec<[Point; 2]>;

/// Tolerance on the dot product of cardinalized directions when classifying a
/// terminal pair as perpendicular or parallel.
const DOT_TOLERANCE: f64 = 1e-6;

/// Compute the corner points of an orthogonal wire between two terminals.
///
/// Terminal directions within `margin` radians of a cardinal axis are snapped
/// to it for routing decisions; the rendered terminals are unaffected. The
/// result never includes the terminal end points themselves: the rendered
/// path is `[from.end(), corners..., to.end()]`.
///
/// Perpendicular pairs produce one corner, parallel and antiparallel pairs
/// two. Exactly coincident or collinear inputs can collapse corners onto the
/// terminal ends; the rendering layer culls the resulting zero-length
/// segments.
///
/// # Errors
///
/// - [`RoutingError::IdenticalTerminals`] if both arguments are the same
///   terminal. This is a precondition violation and is never retried.
/// - [`RoutingError::ObliqueDirections`] if the snapped directions are
///   neither parallel nor perpendicular within tolerance. With both
///   directions snapped to cardinals this cannot happen; it is reachable only
///   for unsnapped diagonal pairs.
pub fn route(from: &Terminal, to: &Terminal, margin: f64) -> Result<CornerPoints> {
    if from.id() == to.id() {
        return Err(RoutingError::IdenticalTerminals.into());
    }

    let from_direction = cardinalized(from.direction(), margin);
    let to_direction = cardinalized(to.direction(), margin);
    let dot = from_direction.dot(to_direction);

    if dot.abs() < DOT_TOLERANCE {
        trace!(?from_direction, ?to_direction, "routing perpendicular pair");
        perpendicular_corners(from.end(), from_direction, to.end(), to_direction)
    } else if (dot.abs() - 1.0).abs() < DOT_TOLERANCE {
        trace!(?from_direction, ?to_direction, "routing parallel pair");
        Ok(parallel_corners(
            from.end(),
            from_direction,
            to.end(),
            to_direction,
        ))
    } else {
        // A consistent snapping margin leaves no third case; only unsnapped
        // diagonal directions can land here.
        debug_assert!(
            false,
            "cardinalized directions neither parallel nor perpendicular (dot = {dot})"
        );
        debug!(dot, "oblique terminal directions rejected");
        Err(RoutingError::ObliqueDirections { from_dot: dot }.into())
    }
}

/// One corner at the intersection of the two exit rays.
///
/// If that intersection lies strictly behind either terminal's exit plane,
/// the corner is relocated to the other vertex of the rectangle formed by the
/// two terminal ends: two 90° turns at a component beat one 0° and one 180°.
fn perpendicular_corners(
    from_end: Point,
    from_direction: Vec3,
    to_end: Point,
    to_direction: Vec3,
) -> Result<CornerPoints> {
    let mut corner = line_intersection(from_end, from_direction, to_end, to_direction)
        .ok_or(GeometryError::ParallelLines)?;

    if is_behind_plane(corner, from_end, from_direction)
        || is_behind_plane(corner, to_end, to_direction)
    {
        corner = if (corner.x - from_end.x).abs() < DOT_TOLERANCE {
            Vec3::xy(to_end.x, from_end.y)
        } else {
            Vec3::xy(from_end.x, to_end.y)
        };
    }

    Ok(smallvec![corner])
}

/// Two corners on the perpendicular through the midpoint of the ends.
///
/// When each terminal's end lies behind the other's exit plane (a
/// face-to-face pair), both directions are rotated 90° so the path takes an
/// 'S' shape around the components. When only one end is behind, the
/// midpoint is pushed forward of the offending plane by the minimum clearing
/// distance, yielding an elbow instead of an 'S'.
fn parallel_corners(
    from_end: Point,
    from_direction: Vec3,
    to_end: Point,
    to_direction: Vec3,
) -> CornerPoints {
    let mut from_direction = from_direction;
    let mut to_direction = to_direction;
    let mut midpoint = from_end.midpoint(to_end);

    let to_behind_from = is_behind_plane(to_end, from_end, from_direction);
    let from_behind_to = is_behind_plane(from_end, to_end, to_direction);

    if to_behind_from && from_behind_to {
        // Terminals face each other; without the rotation the wire would run
        // backwards through both components.
        from_direction = from_direction.rotated(FRAC_PI_2);
        to_direction = to_direction.rotated(FRAC_PI_2);
    } else if to_behind_from {
        midpoint = move_forward_of_plane(midpoint, from_end, from_direction);
    } else if from_behind_to {
        midpoint = move_forward_of_plane(midpoint, to_end, to_direction);
    }

    let perpendicular = from_direction.cross_out();

    // Both intersections exist: the perpendicular is orthogonal to
    // `from_direction` and `to_direction` is (anti)parallel to it.
    let first = line_intersection(midpoint, perpendicular, from_end, from_direction)
        .unwrap_or(from_end);
    let second =
        line_intersection(midpoint, perpendicular, to_end, to_direction).unwrap_or(to_end);

    smallvec![first, second]
}

#[cfg(test)]
mod tests {
    use schemkit_core::{DOWN, LEFT, ORIGIN, RIGHT, UP};

    use super::*;

    const MARGIN: f64 = 5.0 * std::f64::consts::PI / 180.0;

    fn terminal_with_end(end: Point, direction: Vec3) -> Terminal {
        Terminal::new(end, direction, 0.0).unwrap()
    }

    #[test]
    fn test_identical_terminals_rejected() {
        let t = terminal_with_end(ORIGIN, RIGHT);
        let err = route(&t, &t, MARGIN).unwrap_err();
        assert!(matches!(
            err,
            schemkit_core::Error::Routing(RoutingError::IdenticalTerminals)
        ));
    }

    #[test]
    fn test_perpendicular_pair_single_corner_on_both_rays() {
        let from = terminal_with_end(Vec3::xy(-2.0, 0.0), RIGHT);
        let to = terminal_with_end(Vec3::xy(1.0, 3.0), DOWN);
        let corners = route(&from, &to, MARGIN).unwrap();

        assert_eq!(corners.len(), 1);
        let corner = corners[0];
        // On the from ray (y = 0, forward of the end) and the to ray (x = 1).
        assert!((corner.y - 0.0).abs() < 1e-9);
        assert!((corner.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_perpendicular_foldback_relocates_corner() {
        // Ray intersection at (0, 0) lies behind both exit planes; the corner
        // must move to the other rectangle vertex, (1, 1).
        let from = terminal_with_end(Vec3::xy(1.0, 0.0), RIGHT);
        let to = terminal_with_end(Vec3::xy(0.0, 1.0), UP);
        let corners = route(&from, &to, MARGIN).unwrap();

        assert_eq!(corners.len(), 1);
        assert!(corners[0].approx_eq(Vec3::xy(1.0, 1.0)), "{:?}", corners[0]);
    }

    #[test]
    fn test_parallel_pair_two_corners_axis_aligned() {
        // Two right-facing terminals at different heights: an 'S' via the
        // vertical through the midpoint.
        let from = terminal_with_end(Vec3::xy(0.0, 0.0), RIGHT);
        let to = terminal_with_end(Vec3::xy(4.0, 2.0), RIGHT);
        let corners = route(&from, &to, MARGIN).unwrap();

        assert_eq!(corners.len(), 2);
        let path = [from.end(), corners[0], corners[1], to.end()];
        for pair in path.windows(2) {
            let d = pair[1] - pair[0];
            assert!(
                d.x.abs() < 1e-9 || d.y.abs() < 1e-9,
                "segment {pair:?} is not axis-aligned"
            );
        }
    }

    #[test]
    fn test_same_direction_pair_elbows_clear_of_plane() {
        // Both terminals face right; `to`'s end is behind `from`'s plane, so
        // the midpoint is pushed forward of `from` before the corners are
        // dropped, keeping every corner on or ahead of the plane.
        let from = terminal_with_end(Vec3::xy(2.0, 0.0), RIGHT);
        let to = terminal_with_end(Vec3::xy(0.0, 3.0), RIGHT);
        let corners = route(&from, &to, MARGIN).unwrap();

        assert_eq!(corners.len(), 2);
        for corner in &corners {
            assert!(!is_behind_plane(*corner, from.end(), RIGHT));
        }
    }

    #[test]
    fn test_no_backtracking_at_attachment() {
        // The first segment must not reverse the from-terminal's exit
        // direction, nor the last the to-terminal's.
        let cases = [
            (Vec3::xy(1.0, 0.0), RIGHT, Vec3::xy(0.0, 1.0), UP),
            (Vec3::xy(-2.0, 0.0), RIGHT, Vec3::xy(1.0, 3.0), DOWN),
            (Vec3::xy(0.0, 0.0), RIGHT, Vec3::xy(4.0, 2.0), RIGHT),
        ];
        for (from_end, from_dir, to_end, to_dir) in cases {
            let from = terminal_with_end(from_end, from_dir);
            let to = terminal_with_end(to_end, to_dir);
            let corners = route(&from, &to, MARGIN).unwrap();

            let mut path = vec![from.end()];
            path.extend(corners.iter().copied());
            path.push(to.end());
            path.dedup_by(|a, b| a.approx_eq(*b));

            if path.len() >= 2 {
                let first = path[1] - path[0];
                assert!(first.dot(from.direction()) > -1e-9, "doubles back at from");
                let last = path[path.len() - 1] - path[path.len() - 2];
                assert!(last.dot(-to.direction()) > -1e-9, "doubles back at to");
            }
        }
    }

    #[test]
    fn test_oblique_directions_error() {
        // Diagonal directions outside the snapping margin are neither
        // parallel nor perpendicular.
        let from = terminal_with_end(ORIGIN, Vec3::xy(1.0, 0.4));
        let to = terminal_with_end(Vec3::xy(3.0, 1.0), LEFT);
        let result = std::panic::catch_unwind(|| route(&from, &to, MARGIN));
        // Release builds report the error; debug builds assert.
        if let Ok(result) = result {
            assert!(matches!(
                result.unwrap_err(),
                schemkit_core::Error::Routing(RoutingError::ObliqueDirections { .. })
            ));
        }
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn cardinal() -> impl Strategy<Value = Vec3> {
            prop_oneof![Just(RIGHT), Just(UP), Just(LEFT), Just(DOWN)]
        }

        proptest! {
            #[test]
            fn routes_are_orthogonal_with_at_most_two_corners(
                fx in -10.0..10.0f64,
                fy in -10.0..10.0f64,
                tx in -10.0..10.0f64,
                ty in -10.0..10.0f64,
                from_dir in cardinal(),
                to_dir in cardinal(),
            ) {
                let from = terminal_with_end(Vec3::xy(fx, fy), from_dir);
                let to = terminal_with_end(Vec3::xy(tx, ty), to_dir);
                let corners = route(&from, &to, MARGIN).unwrap();
                prop_assert!(corners.len() <= 2);

                let mut path = vec![from.end()];
                path.extend(corners.iter().copied());
                path.push(to.end());
                path.dedup_by(|a, b| a.approx_eq(*b));
                for pair in path.windows(2) {
                    let d = pair[1] - pair[0];
                    prop_assert!(d.x.abs() < 1e-9 || d.y.abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_snapped_directions_route_like_cardinals() {
        // 3 degrees off-axis is within the 5 degree margin and must route
        // exactly like the cardinal pair.
        let tilt = 3.0_f64.to_radians();
        let from = terminal_with_end(Vec3::xy(-2.0, 0.0), RIGHT.rotated(tilt));
        let to = terminal_with_end(Vec3::xy(1.0, 3.0), DOWN.rotated(tilt));
        let corners = route(&from, &to, MARGIN).unwrap();

        assert_eq!(corners.len(), 1);
        assert!(corners[0].approx_eq(Vec3::xy(1.0, 0.0)), "{:?}", corners[0]);
    }
}
