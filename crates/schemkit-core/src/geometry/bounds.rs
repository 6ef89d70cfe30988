use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Axis-aligned bounding box in the diagram plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`. Returns a degenerate box at the
    /// origin for an empty iterator.
    pub fn of_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::new(Vec3::default(), Vec3::default());
        };
        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(min, max)
    }

    pub fn center(&self) -> Vec3 {
        self.min.midpoint(self.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.min,
            Vec3::xy(self.max.x, self.min.y),
            self.max,
            Vec3::xy(self.min.x, self.max.y),
        ]
    }

    pub fn union(&self, other: BoundingBox) -> BoundingBox {
        BoundingBox::new(
            Vec3::xy(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Vec3::xy(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// Grow the box by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> BoundingBox {
        BoundingBox::new(
            self.min - Vec3::xy(amount, amount),
            self.max + Vec3::xy(amount, amount),
        )
    }

    /// Extreme point of the box in `direction`.
    ///
    /// Each component of `direction` selects the min side (negative), the max
    /// side (positive), or the centre (zero), matching the critical-point
    /// convention of scene-graph frameworks.
    pub fn critical_point(&self, direction: Vec3) -> Vec3 {
        let pick = |d: f64, min: f64, max: f64| {
            if d > 0.0 {
                max
            } else if d < 0.0 {
                min
            } else {
                (min + max) * 0.5
            }
        };
        Vec3::xy(
            pick(direction.x, self.min.x, self.max.x),
            pick(direction.y, self.min.y, self.max.y),
        )
    }

    /// Critical point of the box as if it were rotated by `rotation` about its
    /// centre, reported in the original (unrotated) coordinate frame.
    ///
    /// Rotates the corners, takes the bounding-box critical point of the
    /// rotated outline, then maps the result back through the inverse
    /// rotation. Used by arc obstacle avoidance to find the face of an
    /// obstacle as seen from an arbitrary chord direction.
    pub fn critical_point_at_rotation(&self, direction: Vec3, rotation: f64) -> Vec3 {
        let centre = self.center();
        let rotated = BoundingBox::of_points(
            self.corners()
                .into_iter()
                .map(|c| centre + (c - centre).rotated(rotation)),
        );
        let critical = rotated.critical_point(direction);
        centre + (critical - centre).rotated(-rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DOWN, UP};

    #[test]
    fn test_of_points() {
        let bb = BoundingBox::of_points([Vec3::xy(1.0, -2.0), Vec3::xy(-3.0, 4.0)]);
        assert!(bb.min.approx_eq(Vec3::xy(-3.0, -2.0)));
        assert!(bb.max.approx_eq(Vec3::xy(1.0, 4.0)));
        assert!(bb.center().approx_eq(Vec3::xy(-1.0, 1.0)));
    }

    #[test]
    fn test_critical_point() {
        let bb = BoundingBox::new(Vec3::xy(-1.0, -2.0), Vec3::xy(3.0, 4.0));
        assert!(bb.critical_point(UP).approx_eq(Vec3::xy(1.0, 4.0)));
        assert!(bb.critical_point(DOWN).approx_eq(Vec3::xy(1.0, -2.0)));
    }

    #[test]
    fn test_critical_point_at_zero_rotation_matches_plain() {
        let bb = BoundingBox::new(Vec3::xy(0.0, 0.0), Vec3::xy(2.0, 1.0));
        let plain = bb.critical_point(UP);
        let rotated = bb.critical_point_at_rotation(UP, 0.0);
        assert!(plain.approx_eq(rotated));
    }

    #[test]
    fn test_critical_point_at_quarter_rotation() {
        // A 2x1 box rotated 90 degrees presents its width vertically; the UP
        // critical point in the rotated frame maps back to the box's right
        // face centre.
        let bb = BoundingBox::new(Vec3::xy(-1.0, -0.5), Vec3::xy(1.0, 0.5));
        let p = bb.critical_point_at_rotation(UP, std::f64::consts::FRAC_PI_2);
        assert!(p.approx_eq(Vec3::xy(1.0, 0.0)), "{p:?}");
    }
}
