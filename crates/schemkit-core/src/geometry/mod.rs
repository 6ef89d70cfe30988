//! Geometric primitives shared across SchemKit.
//!
//! Diagram geometry is 2D embedded in 3D: every point and vector carries a
//! zero `z` ordinate so positions can be handed to 3D host graphics
//! frameworks unchanged. All routing math happens in the `z = 0` plane.

mod bounds;
mod plane;
mod snap;
mod vec3;

pub use bounds::BoundingBox;
pub use plane::{is_behind_plane, move_forward_of_plane};
pub use snap::cardinalized;
pub use vec3::{
    line_intersection, Vec3, DOWN, DOWN_LEFT, DOWN_RIGHT, LEFT, ORIGIN, OUT, RIGHT, UP, UP_LEFT,
    UP_RIGHT,
};

/// Comparison tolerance for coordinates and dot products.
pub const EPSILON: f64 = 1e-9;
