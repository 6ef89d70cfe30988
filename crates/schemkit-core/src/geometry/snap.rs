//! Cardinal snapping of direction vectors.

use std::f64::consts::FRAC_PI_2;

use super::vec3::Vec3;
use super::EPSILON;

/// Snap `vector` to the nearest cardinal axis if it lies within `margin` of it.
///
/// The angle the vector makes with the positive horizontal is checked; if it
/// falls within `margin` radians of up, down, left, or right, the vector is
/// snapped to that cardinal direction, preserving its original magnitude.
/// Otherwise the vector is returned unchanged.
///
/// Idempotent for any margin in `(0, π/4)`: a snapped vector lies exactly on
/// an axis and re-snaps to itself.
pub fn cardinalized(vector: Vec3, margin: f64) -> Vec3 {
    let magnitude = vector.length();
    if magnitude < EPSILON {
        return vector;
    }

    let angle = vector.angle();
    let within_margin = (angle + margin).rem_euclid(FRAC_PI_2) <= 2.0 * margin;
    if !within_margin {
        return vector;
    }

    // Keep only the dominant component, signed, at the original magnitude.
    if vector.x.abs() >= vector.y.abs() {
        Vec3::xy(magnitude * vector.x.signum(), 0.0)
    } else {
        Vec3::xy(0.0, magnitude * vector.y.signum())
    }
}
