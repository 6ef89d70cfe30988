//! Round source symbols. Voltage sources carry a horizontal diameter line
//! along the terminal axis, current sources a vertical one across it.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{circle, line_between, square_half_side, SymbolBody};

pub fn voltage_source(config: &SymbolConfig) -> SymbolBody {
    let half = square_half_side(config);
    SymbolBody::new(
        vec![
            circle(Vec3::default(), half),
            line_between(Vec3::xy(-half, 0.0), Vec3::xy(half, 0.0)),
        ],
        vec![],
        SymbolBody::bipole_terminals(half),
    )
}

pub fn current_source(config: &SymbolConfig) -> SymbolBody {
    let half = square_half_side(config);
    SymbolBody::new(
        vec![
            circle(Vec3::default(), half),
            line_between(Vec3::xy(0.0, -half), Vec3::xy(0.0, half)),
        ],
        vec![],
        SymbolBody::bipole_terminals(half),
    )
}
