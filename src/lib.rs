//! # SchemKit
//!
//! Schematic circuit diagrams as animatable vector graphics.
//!
//! SchemKit builds circuit diagrams out of placed symbols, automatically
//! routed orthogonal wires, and labelled voltage arcs, then serializes them
//! to JSON or renders them to SVG. The workspace splits into four layers,
//! re-exported here:
//!
//! - [`core`]: 2D geometry primitives, the symbol configuration, and the
//!   error types shared by every layer.
//! - [`layout`]: the terminal model, the orthogonal wire router, and the
//!   voltage-arc solver.
//! - [`symbols`]: static circuit-symbol geometry (resistors, capacitors,
//!   cells, switches, sources, nodes).
//! - [`diagram`]: the circuit aggregate, text marks, animation planning,
//!   persistence, and SVG export.
//!
//! # Example
//!
//! ```
//! use schemkit::prelude::*;
//!
//! # fn main() -> schemkit::core::Result<()> {
//! let config = SymbolConfig::default();
//! let mut circuit = Circuit::new(config.clone());
//!
//! let mut cell = Component::new(Symbol::CELL, &config)?;
//! cell.set_position(Vec3::xy(-2.0, 0.0))?;
//! let mut resistor = Component::new(Symbol::Resistor, &config)?;
//! resistor.set_position(Vec3::xy(2.0, 0.0))?;
//! resistor.set_label("R_1");
//!
//! let cell = circuit.add(cell);
//! let resistor = circuit.add(resistor);
//! let from = *circuit.component(cell)?.right().unwrap();
//! let to = *circuit.component(resistor)?.left().unwrap();
//! circuit.connect(&from, &to)?;
//!
//! let svg = render_svg(&circuit)?;
//! assert!(svg.contains("<polyline"));
//! # Ok(())
//! # }
//! ```

pub use schemkit_core as core;
pub use schemkit_diagram as diagram;
pub use schemkit_layout as layout;
pub use schemkit_symbols as symbols;

/// The common imports for building diagrams.
pub mod prelude {
    pub use schemkit_core::{Point, SymbolConfig, Vec3, DOWN, LEFT, ORIGIN, RIGHT, UP};
    pub use schemkit_diagram::{
        render_svg, AnimationStep, Circuit, Component, ComponentId, CurrentMark, DiagramFile,
        Selection, Voltage, VoltageId, Wire, WireId,
    };
    pub use schemkit_layout::{Terminal, TerminalId};
    pub use schemkit_symbols::{Symbol, SymbolBody};
}
