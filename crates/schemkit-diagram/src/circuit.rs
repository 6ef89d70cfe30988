//! The circuit aggregate: components, wires, and voltage annotations.
//!
//! The circuit owns everything by id and is the only place cross-element
//! references are resolved. Wires and voltages name terminals by
//! [`TerminalId`]; looking the ids up against the owning components happens
//! here, so components stay free of back-references and every recompute is
//! a pure pass over the maps.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use schemkit_core::{BoundingBox, CircuitError, Point, Result, SymbolConfig};
use schemkit_layout::{ArcGeometry, Terminal, TerminalId};

use crate::component::{Component, ComponentId};
use crate::voltage::{Voltage, VoltageId};
use crate::wire::{Wire, WireId};

/// Something wires can be matched against when disconnecting: a whole
/// component (all its terminals) or one terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Component(ComponentId),
    Terminal(TerminalId),
}

#[derive(Debug, Clone, Default)]
pub struct Circuit {
    config: SymbolConfig,
    components: BTreeMap<ComponentId, Component>,
    wires: BTreeMap<WireId, Wire>,
    voltages: BTreeMap<VoltageId, Voltage>,
}

impl Circuit {
    pub fn new(config: SymbolConfig) -> Self {
        Self {
            config,
            components: BTreeMap::new(),
            wires: BTreeMap::new(),
            voltages: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SymbolConfig {
        &self.config
    }

    pub fn add(&mut self, component: Component) -> ComponentId {
        let id = component.id();
        self.components.insert(id, component);
        id
    }

    /// Remove a component and every wire or voltage touching it.
    pub fn remove(&mut self, id: ComponentId) -> Result<Component> {
        let component = self
            .components
            .remove(&id)
            .ok_or_else(|| CircuitError::UnknownComponent { id: id.to_string() })?;
        let terminals: BTreeSet<TerminalId> =
            component.terminals().iter().map(|t| t.id()).collect();
        self.wires.retain(|_, wire| {
            !terminals.contains(&wire.from_terminal()) && !terminals.contains(&wire.to_terminal())
        });
        self.voltages.retain(|_, voltage| {
            !terminals.contains(&voltage.from_terminal())
                && !terminals.contains(&voltage.to_terminal())
                && voltage.avoid != Some(id)
        });
        Ok(component)
    }

    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(&id)
            .ok_or_else(|| CircuitError::UnknownComponent { id: id.to_string() }.into())
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .get_mut(&id)
            .ok_or_else(|| CircuitError::UnknownComponent { id: id.to_string() }.into())
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    pub fn voltages(&self) -> impl Iterator<Item = &Voltage> {
        self.voltages.values()
    }

    /// The component owning `terminal`, if any.
    pub fn owner_of(&self, terminal: TerminalId) -> Option<&Component> {
        self.components
            .values()
            .find(|c| c.contains_terminal(terminal))
    }

    /// Resolve a terminal id against the circuit's current geometry.
    pub fn terminal(&self, id: TerminalId) -> Result<&Terminal> {
        self.components
            .values()
            .find_map(|c| c.terminal(id))
            .ok_or_else(|| CircuitError::UnknownTerminal { id: id.to_string() }.into())
    }

    /// Connect two terminals with an automatically routed wire.
    ///
    /// The passed terminals are snapshots used for the ownership check; the
    /// route is computed from the circuit's own state for those ids.
    ///
    /// # Errors
    ///
    /// [`CircuitError::ForeignTerminal`] when a terminal belongs to no
    /// component in this circuit, reported with its end coordinates;
    /// routing errors from the router.
    pub fn connect(&mut self, from: &Terminal, to: &Terminal) -> Result<WireId> {
        self.check_owned(from)?;
        self.check_owned(to)?;

        let from = *self.terminal(from.id())?;
        let to = *self.terminal(to.id())?;
        let wire = Wire::connect(&from, &to, self.config.cardinal_alignment_margin)?;
        let id = wire.id();
        debug!(%id, corners = wire.corners().len(), "connected terminals");
        self.wires.insert(id, wire);
        Ok(id)
    }

    /// Connect two terminals with caller-chosen interior corner points.
    pub fn connect_manual(
        &mut self,
        from: &Terminal,
        to: &Terminal,
        points: Vec<Point>,
    ) -> Result<WireId> {
        self.check_owned(from)?;
        self.check_owned(to)?;
        let wire = Wire::manual(from, to, points)?;
        let id = wire.id();
        self.wires.insert(id, wire);
        Ok(id)
    }

    /// Remove wires whose **both** ends are in the selection.
    pub fn disconnect(&mut self, selections: &[Selection]) -> Result<Vec<WireId>> {
        let terminals = self.collapse_selections(selections)?;
        Ok(self.remove_wires(|wire| {
            terminals.contains(&wire.from_terminal()) && terminals.contains(&wire.to_terminal())
        }))
    }

    /// Remove wires with **either** end in the selection.
    pub fn isolate(&mut self, selections: &[Selection]) -> Result<Vec<WireId>> {
        let terminals = self.collapse_selections(selections)?;
        Ok(self.remove_wires(|wire| {
            terminals.contains(&wire.from_terminal()) || terminals.contains(&wire.to_terminal())
        }))
    }

    /// Recompute every automatically routed wire. Idempotent: with no
    /// geometry changes the routes come out identical.
    pub fn reroute_all(&mut self) -> Result<()> {
        let margin = self.config.cardinal_alignment_margin;
        let mut routed = Vec::with_capacity(self.wires.len());
        for (id, wire) in &self.wires {
            let from = *self.terminal(wire.from_terminal())?;
            let to = *self.terminal(wire.to_terminal())?;
            routed.push((*id, from, to));
        }
        for (id, from, to) in routed {
            if let Some(wire) = self.wires.get_mut(&id) {
                wire.reroute(&from, &to, margin)?;
            }
        }
        Ok(())
    }

    /// Move a component and re-route affected wiring.
    pub fn move_component(&mut self, id: ComponentId, position: Point) -> Result<()> {
        self.component_mut(id)?.set_position(position)?;
        self.reroute_all()
    }

    /// Rotate a component (in place) and re-route affected wiring.
    pub fn rotate_component(&mut self, id: ComponentId, angle: f64) -> Result<()> {
        self.component_mut(id)?.rotate(angle)?;
        self.reroute_all()
    }

    /// Insert an already-built wire, e.g. when loading a diagram.
    pub(crate) fn insert_wire(&mut self, wire: Wire) -> WireId {
        let id = wire.id();
        self.wires.insert(id, wire);
        id
    }

    pub fn add_voltage(&mut self, voltage: Voltage) -> VoltageId {
        let id = voltage.id();
        self.voltages.insert(id, voltage);
        id
    }

    pub fn remove_voltage(&mut self, id: VoltageId) -> Option<Voltage> {
        self.voltages.remove(&id)
    }

    /// Solve a voltage's arc against the circuit's current geometry.
    pub fn voltage_arc(&self, id: VoltageId) -> Result<ArcGeometry> {
        let voltage = self
            .voltages
            .get(&id)
            .ok_or_else(|| CircuitError::UnknownVoltage { id: id.to_string() })?;
        let from_end = self.terminal(voltage.from_terminal())?.end();
        let to_end = self.terminal(voltage.to_terminal())?.end();
        let obstacle: Option<BoundingBox> = match voltage.avoid {
            Some(component) => Some(self.component(component)?.world_bounds()),
            None => None,
        };
        voltage.arc(from_end, to_end, obstacle.as_ref(), &self.config)
    }

    /// World-frame bounds of everything in the circuit.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds: Option<BoundingBox> = None;
        let mut extend = |bb: BoundingBox| {
            bounds = Some(match bounds {
                Some(existing) => existing.union(bb),
                None => bb,
            });
        };
        for component in self.components.values() {
            extend(component.world_bounds());
            for terminal in component.terminals() {
                extend(BoundingBox::of_points([terminal.position(), terminal.end()]));
            }
        }
        for wire in self.wires.values() {
            extend(BoundingBox::of_points(wire.corners().iter().copied()));
        }
        bounds.unwrap_or(BoundingBox::new(Point::default(), Point::default()))
    }

    fn check_owned(&self, terminal: &Terminal) -> Result<()> {
        if self.owner_of(terminal.id()).is_none() {
            let end = terminal.end();
            return Err(CircuitError::ForeignTerminal { x: end.x, y: end.y }.into());
        }
        Ok(())
    }

    fn collapse_selections(&self, selections: &[Selection]) -> Result<BTreeSet<TerminalId>> {
        let mut terminals = BTreeSet::new();
        for selection in selections {
            match selection {
                Selection::Component(id) => {
                    let component = self.component(*id)?;
                    terminals.extend(component.terminals().iter().map(|t| t.id()));
                }
                Selection::Terminal(id) => {
                    // Ownership check mirrors connect(): a foreign terminal
                    // is reported with its end coordinates.
                    let terminal = self.terminal(*id)?;
                    terminals.insert(terminal.id());
                }
            }
        }
        Ok(terminals)
    }

    fn remove_wires(&mut self, condition: impl Fn(&Wire) -> bool) -> Vec<WireId> {
        let doomed: Vec<WireId> = self
            .wires
            .values()
            .filter(|w| condition(w))
            .map(|w| w.id())
            .collect();
        for id in &doomed {
            self.wires.remove(id);
        }
        if !doomed.is_empty() {
            debug!(removed = doomed.len(), "removed wires");
        }
        doomed
    }
}
