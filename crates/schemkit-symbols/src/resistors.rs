//! Resistor-family symbols: the plain box plus the sensor and variable
//! modifier strokes layered on top of it.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{line_between, polyline, rectangle, SymbolBody};

pub fn resistor(config: &SymbolConfig) -> SymbolBody {
    SymbolBody::new(
        vec![rectangle(
            Vec3::default(),
            config.bipole_width,
            config.bipole_height,
        )],
        vec![],
        SymbolBody::bipole_terminals(config.bipole_width / 2.0),
    )
}

/// Resistor with the sensor modifier: a bent lead entering from below left
/// and cutting diagonally through the body.
pub fn thermistor(config: &SymbolConfig) -> SymbolBody {
    let mut body = resistor(config);
    let hw = config.bipole_width / 2.0;
    let hh = config.bipole_height / 2.0;
    let foot_y = -1.75 * hh;
    body.strokes.push(polyline(&[
        Vec3::xy(-hw, foot_y),
        Vec3::xy(-0.4 * hw, foot_y),
        Vec3::xy(0.4 * hw, 1.25 * hh),
    ]));
    rebuild(body)
}

/// Resistor with the variable modifier: a diagonal arrow across the body.
pub fn variable_resistor(config: &SymbolConfig) -> SymbolBody {
    let mut body = resistor(config);
    let hw = config.bipole_width / 2.0;
    let hh = config.bipole_height / 2.0;
    let tail = Vec3::xy(-0.5 * hw, -1.5 * hh);
    let tip = Vec3::xy(0.5 * hw, 1.5 * hh);
    body.strokes.push(line_between(tail, tip));
    body.strokes.push(arrow_head(tail, tip, 0.3 * hh));
    rebuild(body)
}

fn arrow_head(tail: Vec3, tip: Vec3, size: f64) -> lyon::path::Path {
    // Plain data terminals never coincide here; fall back to a point barb.
    let along = (tip - tail).normalized().unwrap_or_default();
    let across = along.cross_out();
    polyline(&[
        tip - along * size + across * size * 0.6,
        tip,
        tip - along * size - across * size * 0.6,
    ])
}

fn rebuild(body: SymbolBody) -> SymbolBody {
    SymbolBody::new(body.strokes, body.dots, body.terminals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_extend_past_the_box() {
        let config = SymbolConfig::default();
        let plain = resistor(&config);
        for modified in [thermistor(&config), variable_resistor(&config)] {
            assert!(modified.bounds.height() > plain.bounds.height());
            assert_eq!(modified.terminals.len(), 2);
        }
    }
}
