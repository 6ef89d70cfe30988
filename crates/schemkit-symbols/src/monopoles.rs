//! Single-terminal symbols: ground and supply rail. The terminal starts at
//! the origin and the body hangs off the opposite side.

use schemkit_core::{SymbolConfig, Vec3, DOWN, UP};

use crate::body::{line_between, SymbolBody, TerminalSpec};

/// Ground: three horizontal bars of shrinking width below the origin.
pub fn ground(config: &SymbolConfig) -> SymbolBody {
    let width = config.square_bipole_side_length;
    let spacing = width / 4.0;

    let strokes = (0..3)
        .map(|i| {
            let half = width * (3 - i) as f64 / 6.0;
            let y = -(i as f64) * spacing;
            line_between(Vec3::xy(-half, y), Vec3::xy(half, y))
        })
        .collect();

    SymbolBody::new(
        strokes,
        vec![],
        vec![TerminalSpec {
            position: Vec3::default(),
            direction: UP,
        }],
    )
}

/// Supply rail: a single horizontal bar above the origin.
pub fn rail(config: &SymbolConfig) -> SymbolBody {
    let half = config.square_bipole_side_length / 2.0;
    SymbolBody::new(
        vec![line_between(Vec3::xy(-half, 0.0), Vec3::xy(half, 0.0))],
        vec![],
        vec![TerminalSpec {
            position: Vec3::default(),
            direction: DOWN,
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_bars_shrink_downward() {
        let config = SymbolConfig::default();
        let body = ground(&config);
        assert_eq!(body.strokes.len(), 3);
        assert!(body.bounds.min.y < 0.0);
        assert!(body.terminals[0].direction.approx_eq(UP));
    }

    #[test]
    fn test_rail_terminal_points_down() {
        let config = SymbolConfig::default();
        let body = rail(&config);
        assert!(body.terminals[0].direction.approx_eq(DOWN));
        assert!((body.bounds.width() - config.square_bipole_side_length).abs() < 1e-9);
    }
}
