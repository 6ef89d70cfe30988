//! Voltage arrows between terminal ends.
//!
//! A voltage is a labelled circular arc from one terminal end to another.
//! With nothing to avoid it sweeps the configured default angle; told to
//! avoid a component it instead passes through a waypoint next to that
//! component's bounds, solved by the three-point arc solver. The label
//! anchors at the top of the arc's bow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schemkit_core::{BoundingBox, Point, Result, SymbolConfig};
use schemkit_layout::{buffered_chord, solve_arc, waypoint_around, ArcGeometry, TerminalId};

use crate::component::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoltageId(Uuid);

impl VoltageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VoltageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VoltageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A voltage annotation from a negative terminal to a positive one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voltage {
    id: VoltageId,
    from: TerminalId,
    to: TerminalId,
    pub clockwise: bool,
    pub avoid: Option<ComponentId>,
    pub label: String,
}

impl Voltage {
    pub fn new(from: TerminalId, to: TerminalId, label: impl Into<String>) -> Self {
        Self {
            id: VoltageId::new(),
            from,
            to,
            clockwise: false,
            avoid: None,
            label: label.into(),
        }
    }

    /// Builder-style sense selection.
    pub fn with_sense(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    /// Builder-style obstacle registration: the arc will bow around the
    /// component's bounds.
    pub fn avoiding(mut self, component: ComponentId) -> Self {
        self.avoid = Some(component);
        self
    }

    pub fn id(&self) -> VoltageId {
        self.id
    }

    pub fn from_terminal(&self) -> TerminalId {
        self.from
    }

    pub fn to_terminal(&self) -> TerminalId {
        self.to
    }

    pub fn set_sense(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
    }

    /// Swap the arrow's direction. By default the sense flips too, keeping
    /// the arc on the same side of the component.
    pub fn flip_direction(&mut self, flip_sense_as_well: bool) {
        std::mem::swap(&mut self.from, &mut self.to);
        if flip_sense_as_well {
            self.clockwise = !self.clockwise;
        }
    }

    /// Solve the arc for the current terminal ends.
    ///
    /// `obstacle` is the world-frame bounds of the avoided component, if one
    /// was registered; the circuit layer resolves it before calling.
    pub fn arc(
        &self,
        from_end: Point,
        to_end: Point,
        obstacle: Option<&BoundingBox>,
        config: &SymbolConfig,
    ) -> Result<ArcGeometry> {
        let (start, end) = buffered_chord(from_end, to_end, config.voltage_end_buffer);

        let mut angle = match obstacle {
            Some(bounds) => {
                let waypoint = waypoint_around(
                    bounds,
                    start,
                    end,
                    self.clockwise,
                    config.obstacle_clearance,
                )?;
                solve_arc(start, end, waypoint)?
            }
            None => config.voltage_default_arc_angle,
        };
        if self.clockwise {
            angle = -angle;
        }

        Ok(ArcGeometry::new(start, end, angle))
    }
}
