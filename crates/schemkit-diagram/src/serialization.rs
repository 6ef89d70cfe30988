//! Serialization and deserialization for diagram files.
//!
//! Implements save/load for SchemKit diagram files using JSON, preserving
//! component placement, terminal identities, wiring, voltage annotations,
//! and the symbol configuration the diagram was built with. Terminal ids
//! are persisted so wires and voltages resolve to the same attachment
//! points after a round trip.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schemkit_core::{Error, Point, Result, SymbolConfig, Vec3};
use schemkit_layout::TerminalId;
use schemkit_symbols::Symbol;

use crate::circuit::Circuit;
use crate::component::{Component, ComponentId, NodeState};
use crate::mark::{CurrentMark, Mark};
use crate::voltage::Voltage;
use crate::wire::{Routing, Wire};

/// Diagram file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete diagram file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramFile {
    pub version: String,
    pub metadata: DiagramMetadata,
    pub config: SymbolConfig,
    pub components: Vec<ComponentData>,
    pub wires: Vec<WireData>,
    #[serde(default)]
    pub voltages: Vec<VoltageData>,
}

/// Diagram metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Serialized component data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentData {
    pub id: ComponentId,
    pub symbol: Symbol,
    pub position: Point,
    pub rotation: f64,
    pub terminals: Vec<TerminalData>,
    #[serde(default)]
    pub label: Option<Mark>,
    #[serde(default)]
    pub annotation: Option<Mark>,
    #[serde(default)]
    pub currents: Vec<(TerminalId, CurrentMark)>,
    #[serde(default)]
    pub node: Option<NodeState>,
}

/// Serialized terminal identity and, for nodes, direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalData {
    pub id: TerminalId,
    pub direction: Vec3,
}

/// Serialized wire data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireData {
    pub id: crate::wire::WireId,
    pub from: TerminalId,
    pub to: TerminalId,
    #[serde(default)]
    pub manual_points: Option<Vec<Point>>,
}

/// Serialized voltage data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoltageData {
    pub from: TerminalId,
    pub to: TerminalId,
    pub clockwise: bool,
    #[serde(default)]
    pub avoid: Option<ComponentId>,
    pub label: String,
}

impl DiagramFile {
    /// Capture a circuit into a file structure.
    pub fn from_circuit(circuit: &Circuit, name: impl Into<String>) -> Self {
        let now = Utc::now();
        let components = circuit
            .components()
            .map(|component| ComponentData {
                id: component.id(),
                symbol: component.symbol(),
                position: component.position(),
                rotation: component.rotation(),
                terminals: component
                    .terminals()
                    .iter()
                    .map(|t| TerminalData {
                        id: t.id(),
                        direction: t.direction(),
                    })
                    .collect(),
                label: component.label().cloned(),
                annotation: component.annotation().cloned(),
                currents: component.currents().to_vec(),
                node: component.node,
            })
            .collect();

        let wires = circuit
            .wires()
            .map(|wire| WireData {
                id: wire.id(),
                from: wire.from_terminal(),
                to: wire.to_terminal(),
                manual_points: match wire.routing() {
                    Routing::Manual(points) => Some(points.clone()),
                    Routing::Auto => None,
                },
            })
            .collect();

        let voltages = circuit
            .voltages()
            .map(|voltage| VoltageData {
                from: voltage.from_terminal(),
                to: voltage.to_terminal(),
                clockwise: voltage.clockwise,
                avoid: voltage.avoid,
                label: voltage.label.clone(),
            })
            .collect();

        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DiagramMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            config: circuit.config().clone(),
            components,
            wires,
            voltages,
        }
    }

    /// Rebuild a circuit from a file structure.
    pub fn into_circuit(&self) -> Result<Circuit> {
        let mut circuit = Circuit::new(self.config.clone());

        for data in &self.components {
            let mut component = Component::new(data.symbol, &self.config)?;
            if component.symbol().has_dynamic_terminals() {
                // Persisted directions are world frame; the component is
                // still unrotated here.
                for terminal in &data.terminals {
                    component.terminal_toward(terminal.direction.rotated(-data.rotation))?;
                }
            }
            for (index, terminal) in data.terminals.iter().enumerate() {
                component.replace_terminal_id(index, terminal.id)?;
            }
            component.set_position(data.position)?;
            component.set_rotation(data.rotation)?;
            if let Some(mark) = &data.label {
                component.set_label(mark.text.clone());
            }
            if let Some(mark) = &data.annotation {
                component.set_annotation(mark.text.clone());
            }
            for (terminal, mark) in &data.currents {
                component.set_current(*terminal, mark.clone())?;
            }
            if data.node.is_some() {
                component.node = data.node;
            }
            component.set_id(data.id);
            circuit.add(component);
        }

        for data in &self.wires {
            let from = *circuit.terminal(data.from)?;
            let to = *circuit.terminal(data.to)?;
            let mut wire = match &data.manual_points {
                Some(points) => Wire::manual(&from, &to, points.clone())?,
                None => Wire::connect(&from, &to, self.config.cardinal_alignment_margin)?,
            };
            wire.set_id(data.id);
            circuit.insert_wire(wire);
        }

        for data in &self.voltages {
            let mut voltage = Voltage::new(data.from, data.to, data.label.clone());
            voltage.clockwise = data.clockwise;
            voltage.avoid = data.avoid;
            circuit.add_voltage(voltage);
        }

        Ok(circuit)
    }

    /// Save the diagram to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("failed to serialize diagram: {e}")))?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| Error::other(format!("failed to write diagram file: {e}")))
    }

    /// Load a diagram from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::other(format!("failed to read diagram file: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::other(format!("failed to parse diagram file: {e}")))
    }
}

impl Circuit {
    /// Serialize the circuit to a pretty JSON string.
    pub fn to_json(&self, name: impl Into<String>) -> Result<String> {
        serde_json::to_string_pretty(&DiagramFile::from_circuit(self, name))
            .map_err(|e| Error::other(format!("failed to serialize diagram: {e}")))
    }

    /// Rebuild a circuit from [`Circuit::to_json`] output.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DiagramFile = serde_json::from_str(json)
            .map_err(|e| Error::other(format!("failed to parse diagram: {e}")))?;
        file.into_circuit()
    }
}

#[cfg(test)]
mod tests {
    use schemkit_core::RIGHT;

    use super::*;

    #[test]
    fn test_round_trip_preserves_terminal_identities() {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let mut resistor = Component::new(Symbol::Resistor, &config).unwrap();
        resistor.set_position(Vec3::xy(-2.0, 0.0)).unwrap();
        let mut node = Component::new(Symbol::Node { open: false }, &config).unwrap();
        node.set_position(Vec3::xy(2.0, 0.0)).unwrap();

        let r = circuit.add(resistor);
        let n = circuit.add(node);
        let left = circuit.component_mut(n).unwrap().terminal_toward(-RIGHT).unwrap();
        let from = *circuit.component(r).unwrap().right().unwrap();
        let to = *circuit.terminal(left).unwrap();
        circuit.connect(&from, &to).unwrap();

        let json = circuit.to_json("test").unwrap();
        let restored = Circuit::from_json(&json).unwrap();

        assert_eq!(restored.components().count(), 2);
        assert_eq!(restored.wires().count(), 1);
        let wire = restored.wires().next().unwrap();
        assert_eq!(wire.from_terminal(), from.id());
        assert_eq!(wire.to_terminal(), left);
    }

    #[test]
    fn test_round_trip_preserves_marks_and_voltages() {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let mut resistor = Component::new(Symbol::Resistor, &config).unwrap();
        resistor.set_label("R_1");
        resistor.set_annotation("10\\Omega");
        let from = resistor.left().unwrap().id();
        let to = resistor.right().unwrap().id();
        let r = circuit.add(resistor);
        circuit.add_voltage(Voltage::new(from, to, "V_1").avoiding(r));

        let restored = Circuit::from_json(&circuit.to_json("marks").unwrap()).unwrap();
        let component = restored.components().next().unwrap();
        assert_eq!(component.label().unwrap().text, "R_1");
        assert_eq!(component.annotation().unwrap().text, "10\\Omega");
        let voltage = restored.voltages().next().unwrap();
        assert_eq!(voltage.label, "V_1");
        assert_eq!(voltage.avoid, Some(r));
    }
}
