//! Wires between terminals.
//!
//! A wire refers to its two terminals by id and caches the interior corner
//! points of its route. Automatic wires recompute their corners from the
//! router whenever a terminal moves; manual wires keep the corner list the
//! caller supplied.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schemkit_core::{Point, Result, RoutingError};
use schemkit_layout::{route, CornerPoints, Terminal, TerminalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(Uuid);

impl WireId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WireId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a wire's interior corners are determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Routing {
    /// Corners come from the orthogonal router.
    Auto,
    /// Corners were supplied by the caller and are never recomputed.
    Manual(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    id: WireId,
    from: TerminalId,
    to: TerminalId,
    routing: Routing,
    corners: CornerPoints,
}

impl Wire {
    /// Create an automatically routed wire between two terminals.
    pub fn connect(from: &Terminal, to: &Terminal, margin: f64) -> Result<Self> {
        let corners = route(from, to, margin)?;
        Ok(Self {
            id: WireId::new(),
            from: from.id(),
            to: to.id(),
            routing: Routing::Auto,
            corners,
        })
    }

    /// Create a wire with caller-specified interior corner points.
    pub fn manual(from: &Terminal, to: &Terminal, points: Vec<Point>) -> Result<Self> {
        if from.id() == to.id() {
            return Err(RoutingError::IdenticalTerminals.into());
        }
        let corners = points.iter().copied().collect();
        Ok(Self {
            id: WireId::new(),
            from: from.id(),
            to: to.id(),
            routing: Routing::Manual(points),
            corners,
        })
    }

    pub fn id(&self) -> WireId {
        self.id
    }

    /// Restore a persisted wire identity when loading a diagram.
    pub(crate) fn set_id(&mut self, id: WireId) {
        self.id = id;
    }

    pub fn from_terminal(&self) -> TerminalId {
        self.from
    }

    pub fn to_terminal(&self) -> TerminalId {
        self.to
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Recompute the route against updated terminal geometry. Manual wires
    /// are left untouched.
    pub fn reroute(&mut self, from: &Terminal, to: &Terminal, margin: f64) -> Result<()> {
        if matches!(self.routing, Routing::Auto) {
            self.corners = route(from, to, margin)?;
        }
        Ok(())
    }

    /// The rendered polyline, with zero-length segments culled.
    pub fn points(&self, from: &Terminal, to: &Terminal) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.corners.len() + 2);
        points.push(from.end());
        points.extend(self.corners.iter().copied());
        points.push(to.end());
        points.dedup_by(|a, b| a.approx_eq(*b));
        points
    }
}
