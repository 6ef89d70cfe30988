//! Directed attachment points for circuit components.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schemkit_core::{Point, Result, Vec3};

/// Identity of a terminal, stable across repositioning and rotation.
///
/// Two `Terminal` values describe the same terminal iff their ids are equal;
/// positions and directions are irrelevant to identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerminalId(Uuid);

impl TerminalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TerminalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TerminalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed connection point on a component.
///
/// The terminal starts at `position` (where it attaches to the component
/// body) and extends `length` units along `direction` to its end, where wires
/// connect. `direction` is always unit length; constructing a terminal from a
/// zero vector is a [`GeometryError::ZeroVector`](schemkit_core::GeometryError).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    id: TerminalId,
    position: Point,
    direction: Vec3,
    length: f64,
}

impl Terminal {
    /// Create a terminal with a fresh identity. `direction` is normalized.
    pub fn new(position: Point, direction: Vec3, length: f64) -> Result<Self> {
        Ok(Self {
            id: TerminalId::new(),
            position,
            direction: direction.normalized()?,
            length,
        })
    }

    /// Recreate a terminal with a known identity, e.g. when loading a diagram.
    pub fn with_id(id: TerminalId, position: Point, direction: Vec3, length: f64) -> Result<Self> {
        Ok(Self {
            id,
            position,
            direction: direction.normalized()?,
            length,
        })
    }

    pub fn id(&self) -> TerminalId {
        self.id
    }

    /// The point where the terminal attaches to the component body.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The unit direction the terminal points, away from the component body.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// The end of the terminal, where wires connect.
    pub fn end(&self) -> Point {
        self.position + self.direction * self.length
    }

    /// Midpoint of the terminal stem, used to place current arrows.
    pub fn tap_point(&self) -> Point {
        self.position + self.direction * (self.length * 0.5)
    }

    /// Move the terminal, keeping its identity. Used by components that
    /// reposition or rotate; wires referring to this terminal re-route
    /// against the updated geometry.
    pub fn relocate(&mut self, position: Point, direction: Vec3) -> Result<()> {
        self.position = position;
        self.direction = direction.normalized()?;
        Ok(())
    }
}
