//! Half-space tests against a terminal's exit plane.
//!
//! A terminal's exit plane passes through its end point with the terminal's
//! direction as its normal. Anything strictly behind that plane would force a
//! wire to travel backwards through the owning component's body.

use super::vec3::Vec3;

/// Whether `point` lies strictly behind the plane through `plane_point` with
/// the given `normal`.
///
/// A point exactly on the plane is never considered behind (strict `< 0`).
pub fn is_behind_plane(point: Vec3, plane_point: Vec3, normal: Vec3) -> bool {
    normal.dot(point - plane_point) < 0.0
}

/// Move `point` the minimum distance needed to lie on or in front of the
/// plane through `plane_point` with the given `normal`.
///
/// Points already on or in front of the plane are returned unchanged. The
/// normal need not be unit length.
pub fn move_forward_of_plane(point: Vec3, plane_point: Vec3, normal: Vec3) -> Vec3 {
    let to_point = point - plane_point;
    let distance_to_move = -normal.dot(to_point);
    if distance_to_move <= 0.0 {
        return point;
    }
    match normal.normalized() {
        Ok(unit) => point + unit * distance_to_move,
        Err(_) => point,
    }
}
