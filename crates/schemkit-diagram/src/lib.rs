//! # SchemKit Diagram
//!
//! The diagram aggregate: placed components, the wires and voltage
//! annotations between their terminals, text marks, animation planning,
//! JSON persistence, and SVG export.
//!
//! [`Circuit`] owns every placed [`Component`] and the [`Wire`]s and
//! [`Voltage`]s that reference their terminals by id. Mutations that move
//! geometry reroute the affected automatic wires; manual wires keep the
//! corner points their caller supplied.

pub mod animation;
pub mod circuit;
pub mod component;
pub mod mark;
pub mod node;
pub mod serialization;
pub mod svg;
pub mod voltage;
pub mod wire;

pub use animation::AnimationStep;
pub use circuit::{Circuit, Selection};
pub use component::{Component, ComponentId, NodeState};
pub use mark::{AnchorTable, CurrentMark, Mark, MarkAlignment, MarkKind};
pub use node::AUTOBLOB_THRESHOLD;
pub use serialization::{DiagramFile, DiagramMetadata};
pub use svg::render_svg;
pub use voltage::{Voltage, VoltageId};
pub use wire::{Routing, Wire, WireId};
