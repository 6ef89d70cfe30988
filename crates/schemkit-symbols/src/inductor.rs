//! Inductor symbol: four upper semicircular humps spanning the bipole width.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{circle_arc, SymbolBody};

pub fn inductor(config: &SymbolConfig) -> SymbolBody {
    let arc_radius = config.bipole_width / 8.0;

    let strokes = (0..4)
        .map(|i| {
            let centre_x = arc_radius * (-3.0 + 2.0 * i as f64);
            circle_arc(
                Vec3::xy(centre_x, 0.0),
                arc_radius,
                std::f64::consts::PI,
                -std::f64::consts::PI,
            )
        })
        .collect();

    SymbolBody::new(
        strokes,
        vec![],
        SymbolBody::bipole_terminals(config.bipole_width / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humps_span_the_bipole_width() {
        let config = SymbolConfig::default();
        let body = inductor(&config);
        assert!((body.bounds.width() - config.bipole_width).abs() < 1e-3);
        // All humps sit above the terminal line.
        assert!(body.bounds.min.y > -1e-3);
    }
}
