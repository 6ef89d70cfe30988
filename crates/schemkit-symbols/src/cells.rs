//! Cell and battery symbols: alternating short (negative) and long
//! (positive) plates, one pair per cell.
//!
//! All plate dimensions derive from the bipole width: the half-gap between
//! plates is a twelfth of it, long plates are five half-gaps tall per half,
//! and each extra cell widens the symbol by four half-gaps.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{line_between, SymbolBody};

pub fn cells(cells: usize, config: &SymbolConfig) -> SymbolBody {
    let cells = cells.max(1);
    let plate_half_gap = config.bipole_width / 12.0;
    let long_half_height = 5.0 * plate_half_gap;
    let short_half_height = long_half_height / 2.0;
    let half_width = (2 * cells - 1) as f64 * plate_half_gap;

    let mut strokes = Vec::with_capacity(2 * cells);
    for cell_index in 0..cells {
        let short_x = -half_width + 4.0 * cell_index as f64 * plate_half_gap;
        let long_x = short_x + 2.0 * plate_half_gap;
        strokes.push(line_between(
            Vec3::xy(short_x, -short_half_height),
            Vec3::xy(short_x, short_half_height),
        ));
        strokes.push(line_between(
            Vec3::xy(long_x, -long_half_height),
            Vec3::xy(long_x, long_half_height),
        ));
    }

    SymbolBody::new(strokes, vec![], SymbolBody::bipole_terminals(half_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_has_two_plates() {
        let config = SymbolConfig::default();
        let body = cells(1, &config);
        assert_eq!(body.strokes.len(), 2);
        let expected_half_width = config.bipole_width / 12.0;
        assert!((body.terminals[1].position.x - expected_half_width).abs() < 1e-9);
    }

    #[test]
    fn test_each_extra_cell_widens_the_symbol() {
        let config = SymbolConfig::default();
        let plate_half_gap = config.bipole_width / 12.0;
        for n in 1..=4 {
            let body = cells(n, &config);
            assert_eq!(body.strokes.len(), 2 * n);
            let expected = (2 * n - 1) as f64 * plate_half_gap;
            assert!((body.terminals[1].position.x - expected).abs() < 1e-9, "{n}");
        }
    }

    #[test]
    fn test_zero_cells_clamps_to_one() {
        let config = SymbolConfig::default();
        assert_eq!(cells(0, &config).strokes.len(), 2);
    }
}
