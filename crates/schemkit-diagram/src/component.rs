//! Placed circuit components.
//!
//! A [`Component`] pairs a [`Symbol`] with a position and rotation in the
//! diagram, the world-frame [`Terminal`]s derived from the symbol's terminal
//! specs, and the marks attached to it. Terminal identities are fixed at
//! construction and survive every reposition, which is what lets wires refer
//! to terminals by id while components move.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schemkit_core::{BoundingBox, CircuitError, Point, Result, SymbolConfig, Vec3, UP};
use schemkit_layout::{Terminal, TerminalId};
use schemkit_symbols::body::TerminalSpec;
use schemkit_symbols::{Symbol, SymbolBody, SymbolShape};

use crate::mark::{AnchorTable, CurrentMark, Mark, MarkKind};

/// Lift between a body's outline and its label/annotation anchors.
const ANCHOR_LIFT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Solder-blob bookkeeping for node components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub autoblob: bool,
    pub blob_visible: bool,
}

/// A symbol placed in a circuit.
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    symbol: Symbol,
    body: SymbolBody,
    position: Point,
    rotation: f64,
    terminal_length: f64,
    local_terminals: Vec<TerminalSpec>,
    terminals: Vec<Terminal>,
    anchors: AnchorTable,
    label: Option<Mark>,
    annotation: Option<Mark>,
    currents: Vec<(TerminalId, CurrentMark)>,
    pub(crate) node: Option<NodeState>,
}

impl Component {
    /// Place `symbol` at the origin, unrotated.
    pub fn new(symbol: Symbol, config: &SymbolConfig) -> Result<Self> {
        let body = symbol.build(config);
        let local_terminals = body.terminals.clone();
        let terminals = local_terminals
            .iter()
            .map(|spec| Terminal::new(spec.position, spec.direction, config.terminal_length))
            .collect::<Result<Vec<_>>>()?;

        let node = match symbol {
            Symbol::Node { open } => Some(NodeState {
                autoblob: !open,
                // Open nodes always draw their circle; filled ones wait for
                // the autoblob count.
                blob_visible: open,
            }),
            _ => None,
        };

        let mut component = Self {
            id: ComponentId::new(),
            symbol,
            body,
            position: Point::default(),
            rotation: 0.0,
            terminal_length: config.terminal_length,
            local_terminals,
            terminals,
            anchors: AnchorTable::new(),
            label: None,
            annotation: None,
            currents: Vec::new(),
            node,
        };
        component.reposition()?;
        Ok(component)
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn body(&self) -> &SymbolBody {
        &self.body
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// The left-hand terminal of a bipole, in the symbol's own frame.
    pub fn left(&self) -> Option<&Terminal> {
        self.terminals.first()
    }

    /// The right-hand terminal of a bipole.
    pub fn right(&self) -> Option<&Terminal> {
        self.terminals.get(1)
    }

    /// The only terminal of a monopole.
    pub fn single(&self) -> Option<&Terminal> {
        if self.terminals.len() == 1 {
            self.terminals.first()
        } else {
            None
        }
    }

    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.iter().find(|t| t.id() == id)
    }

    pub fn contains_terminal(&self, id: TerminalId) -> bool {
        self.terminal(id).is_some()
    }

    pub fn set_position(&mut self, position: Point) -> Result<()> {
        self.position = position;
        self.reposition()
    }

    pub fn set_rotation(&mut self, rotation: f64) -> Result<()> {
        self.rotation = rotation;
        self.reposition()
    }

    pub fn rotate(&mut self, angle: f64) -> Result<()> {
        self.set_rotation(self.rotation + angle)
    }

    /// Map a point from the symbol's local frame into the diagram.
    pub fn to_world(&self, local: Point) -> Point {
        self.position + local.rotated(self.rotation)
    }

    /// World-frame bounding box of the symbol body.
    pub fn world_bounds(&self) -> BoundingBox {
        BoundingBox::of_points(
            self.body
                .bounds
                .corners()
                .into_iter()
                .map(|corner| self.to_world(corner)),
        )
    }

    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    pub fn label(&self) -> Option<&Mark> {
        self.label.as_ref()
    }

    pub fn annotation(&self) -> Option<&Mark> {
        self.annotation.as_ref()
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label = Some(Mark::new(AnchorTable::LABEL, AnchorTable::CENTRE, text));
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    pub fn set_annotation(&mut self, text: impl Into<String>) {
        self.annotation = Some(Mark::new(
            AnchorTable::ANNOTATION,
            AnchorTable::CENTRE,
            text,
        ));
    }

    pub fn clear_annotation(&mut self) {
        self.annotation = None;
    }

    pub fn mark(&self, kind: MarkKind) -> Option<&Mark> {
        match kind {
            MarkKind::Label => self.label(),
            MarkKind::Annotation => self.annotation(),
        }
    }

    /// Attach a current arrow to one of this component's terminals,
    /// replacing any existing one on that terminal.
    pub fn set_current(&mut self, terminal: TerminalId, mark: CurrentMark) -> Result<()> {
        if !self.contains_terminal(terminal) {
            return Err(CircuitError::UnknownTerminal {
                id: terminal.to_string(),
            }
            .into());
        }
        if let Some(slot) = self.currents.iter_mut().find(|(id, _)| *id == terminal) {
            slot.1 = mark;
        } else {
            self.currents.push((terminal, mark));
        }
        Ok(())
    }

    pub fn clear_current(&mut self, terminal: TerminalId) {
        self.currents.retain(|(id, _)| *id != terminal);
    }

    pub fn currents(&self) -> &[(TerminalId, CurrentMark)] {
        &self.currents
    }

    /// Recompute world-frame terminals and anchors from the current position
    /// and rotation.
    pub(crate) fn reposition(&mut self) -> Result<()> {
        for (spec, terminal) in self.local_terminals.iter().zip(self.terminals.iter_mut()) {
            terminal.relocate(
                self.position + spec.position.rotated(self.rotation),
                spec.direction.rotated(self.rotation),
            )?;
        }

        let bounds = self.body.bounds;
        let label_local = bounds.critical_point(UP) + UP * ANCHOR_LIFT;
        let annotation_local = bounds.critical_point(-UP) - UP * ANCHOR_LIFT;
        self.anchors.set(AnchorTable::CENTRE, self.position);
        self.anchors.set(AnchorTable::LABEL, self.to_world(label_local));
        self.anchors
            .set(AnchorTable::ANNOTATION, self.to_world(annotation_local));
        Ok(())
    }

    /// Register a dynamically created terminal (node use only).
    pub(crate) fn push_terminal(&mut self, local_direction: Vec3) -> Result<TerminalId> {
        let spec = TerminalSpec {
            position: Point::default(),
            direction: local_direction,
        };
        let terminal = Terminal::new(
            self.position,
            local_direction.rotated(self.rotation),
            self.terminal_length,
        )?;
        let id = terminal.id();
        self.local_terminals.push(spec);
        self.terminals.push(terminal);
        Ok(id)
    }

    /// Restore a persisted component identity when loading a diagram.
    pub(crate) fn set_id(&mut self, id: ComponentId) {
        self.id = id;
    }

    /// Restore a terminal's persisted identity when loading a diagram.
    pub(crate) fn replace_terminal_id(&mut self, index: usize, id: TerminalId) -> Result<()> {
        let current = self
            .terminals
            .get(index)
            .ok_or_else(|| CircuitError::UnknownTerminal {
                id: format!("terminal index {index}"),
            })?;
        self.terminals[index] = Terminal::with_id(
            id,
            current.position(),
            current.direction(),
            current.length(),
        )?;
        Ok(())
    }
}
