//! # SchemKit Layout
//!
//! The algorithmic core of SchemKit: the terminal model, the automatic
//! orthogonal wire router, and the voltage-arc solver.
//!
//! Everything in this crate is a pure, synchronous function over small
//! fixed-size inputs. Nothing blocks, suspends, or touches shared state, so
//! recomputing the routes of distinct wires concurrently is trivially safe.

pub mod arc;
pub mod router;
pub mod terminal;

pub use arc::{buffered_chord, circumcircle, solve_arc, waypoint_around, ArcGeometry};
pub use router::{route, CornerPoints};
pub use terminal::{Terminal, TerminalId};
