//! # SchemKit Core
//!
//! Core types and utilities for SchemKit.
//! Provides the geometric primitives shared by the routing, symbol, and
//! diagram layers, the symbol configuration struct, and the error taxonomy.

pub mod config;
pub mod error;
pub mod geometry;

pub use config::{ConfigOverride, SymbolConfig};
pub use error::{CircuitError, Error, GeometryError, Result, RoutingError};
pub use geometry::{
    cardinalized, is_behind_plane, line_intersection, move_forward_of_plane, BoundingBox, Vec3,
    DOWN, DOWN_LEFT, DOWN_RIGHT, EPSILON, LEFT, ORIGIN, OUT, RIGHT, UP, UP_LEFT, UP_RIGHT,
};

/// Point in diagram space. Diagrams are 2D but points carry a zero third
/// coordinate for compatibility with 3D host graphics frameworks.
pub type Point = geometry::Vec3;
