//! Capacitor symbol: two parallel plates with the terminals attached
//! directly to the plates rather than the usual bipole half-width.

use schemkit_core::{SymbolConfig, Vec3, LEFT, RIGHT};

use crate::body::{line_between, SymbolBody, TerminalSpec};

pub fn capacitor(config: &SymbolConfig) -> SymbolBody {
    let half_gap = config.plate_gap / 2.0;
    let half_height = config.plate_height / 2.0;

    let strokes = [-half_gap, half_gap]
        .into_iter()
        .map(|x| line_between(Vec3::xy(x, -half_height), Vec3::xy(x, half_height)))
        .collect();

    let terminals = vec![
        TerminalSpec {
            position: Vec3::xy(-half_gap, 0.0),
            direction: LEFT,
        },
        TerminalSpec {
            position: Vec3::xy(half_gap, 0.0),
            direction: RIGHT,
        },
    ];

    SymbolBody::new(strokes, vec![], terminals)
}
