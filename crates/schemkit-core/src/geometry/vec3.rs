use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

use super::EPSILON;

/// A 2D point or vector embedded in 3D space with a zero third ordinate.
///
/// Used for both positions and directions, mirroring the convention of the
/// host graphics frameworks SchemKit targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The origin.
pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);
/// Unit vector pointing right (+x).
pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Unit vector pointing left (−x).
pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
/// Unit vector pointing up (+y).
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Unit vector pointing down (−y).
pub const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);
/// Unit vector out of the diagram plane (+z).
pub const OUT: Vec3 = Vec3::new(0.0, 0.0, 1.0);
/// Diagonal up-right direction (not normalized).
pub const UP_RIGHT: Vec3 = Vec3::new(1.0, 1.0, 0.0);
/// Diagonal up-left direction (not normalized).
pub const UP_LEFT: Vec3 = Vec3::new(-1.0, 1.0, 0.0);
/// Diagonal down-right direction (not normalized).
pub const DOWN_RIGHT: Vec3 = Vec3::new(1.0, -1.0, 0.0);
/// Diagonal down-left direction (not normalized).
pub const DOWN_LEFT: Vec3 = Vec3::new(-1.0, -1.0, 0.0);

impl Vec3 {
    /// Create a vector with an explicit zero `z` ordinate.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create an in-plane vector.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: Vec3) -> f64 {
        (*self - other).length()
    }

    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// In-plane cross product with the out-of-plane unit vector.
    ///
    /// Yields the vector rotated 90° clockwise, i.e. `v × OUT`. This is the
    /// perpendicular used for chord bisectors and parallel-terminal routing.
    pub fn cross_out(&self) -> Vec3 {
        Vec3::xy(self.y, -self.x)
    }

    /// Return this vector scaled to unit length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for vectors of (near-)zero
    /// length; a direction can never be the zero vector.
    pub fn normalized(&self) -> Result<Vec3> {
        let len = self.length();
        if len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(*self / len)
    }

    /// Angle of the vector measured anticlockwise from the positive
    /// horizontal, in radians, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotate the vector in-plane by `angle` radians (anticlockwise).
    pub fn rotated(&self, angle: f64) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3::xy(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    pub fn midpoint(&self, other: Vec3) -> Vec3 {
        (*self + other) * 0.5
    }

    /// Componentwise approximate equality within [`EPSILON`].
    pub fn approx_eq(&self, other: Vec3) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Intersection of two in-plane parametric lines.
///
/// Each line is given as a point and a direction. Returns `None` when the
/// directions are parallel within tolerance.
pub fn line_intersection(p1: Vec3, d1: Vec3, p2: Vec3, d2: Vec3) -> Option<Vec3> {
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < EPSILON {
        return None;
    }
    let delta = p2 - p1;
    let t = (delta.x * d2.y - delta.y * d2.x) / denom;
    Some(p1 + d1 * t)
}
