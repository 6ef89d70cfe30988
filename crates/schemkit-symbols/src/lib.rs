//! # SchemKit Symbols
//!
//! Static circuit-symbol geometry. Each symbol builds a [`SymbolBody`]: a
//! set of stroke paths in the symbol's local frame (centred on the origin,
//! unrotated), the terminal attachment specs, and a bounding box. No
//! algorithmic content lives here; wire routing and arc solving are in
//! `schemkit-layout`, and positioning/rotation is applied by the diagram
//! layer.

use serde::{Deserialize, Serialize};

pub mod body;

mod capacitors;
mod cells;
mod inductor;
mod monopoles;
mod nodes;
mod resistors;
mod sources;
mod switches;

pub use body::{Dot, SymbolBody, TerminalSpec};

use schemkit_core::SymbolConfig;

/// A circuit symbol kind.
///
/// Symbols are a closed set of variants rather than an open trait hierarchy;
/// the variant payload carries the symbol's structural parameters (cell
/// count, switch position) but never display geometry, which comes from the
/// [`SymbolConfig`] at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Symbol {
    Resistor,
    Thermistor,
    VariableResistor,
    Capacitor,
    Inductor,
    /// Battery of `cells` cells; one cell is a plain cell, two a battery.
    Cells {
        cells: usize,
    },
    /// Push switch, open or closed.
    Switch {
        closed: bool,
    },
    VoltageSource,
    CurrentSource,
    Ground,
    Rail,
    /// Wire junction / loose-end symbol. Open nodes draw an empty circle,
    /// filled ones a solder blob. Nodes have no fixed terminals; the diagram
    /// layer creates them on demand per requested direction.
    Node {
        open: bool,
    },
}

impl Symbol {
    /// Convenience for a single cell.
    pub const CELL: Symbol = Symbol::Cells { cells: 1 };
    /// Convenience for a two-cell battery.
    pub const BATTERY: Symbol = Symbol::Cells { cells: 2 };

    /// Whether this symbol creates terminals dynamically instead of carrying
    /// a fixed set.
    pub fn has_dynamic_terminals(&self) -> bool {
        matches!(self, Symbol::Node { .. })
    }
}

/// Builders of symbol-body geometry.
pub trait SymbolShape {
    /// Build the symbol's geometry in its local frame.
    fn build(&self, config: &SymbolConfig) -> SymbolBody;
}

impl SymbolShape for Symbol {
    fn build(&self, config: &SymbolConfig) -> SymbolBody {
        match self {
            Symbol::Resistor => resistors::resistor(config),
            Symbol::Thermistor => resistors::thermistor(config),
            Symbol::VariableResistor => resistors::variable_resistor(config),
            Symbol::Capacitor => capacitors::capacitor(config),
            Symbol::Inductor => inductor::inductor(config),
            Symbol::Cells { cells } => cells::cells(*cells, config),
            Symbol::Switch { closed } => switches::push_switch(*closed, config),
            Symbol::VoltageSource => sources::voltage_source(config),
            Symbol::CurrentSource => sources::current_source(config),
            Symbol::Ground => monopoles::ground(config),
            Symbol::Rail => monopoles::rail(config),
            Symbol::Node { open } => nodes::node(*open, config),
        }
    }
}
