//! Push-switch symbol: two open contact circles bridged by a sprung button
//! bar. The bar floats one travel above the contacts when open and drops
//! onto them when closed.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{line_between, Dot, SymbolBody};

pub fn push_switch(closed: bool, config: &SymbolConfig) -> SymbolBody {
    let half_width = config.square_bipole_side_length / 2.0;
    let node_radius = config.node_radius;
    let travel = 1.5 * node_radius;

    let dots = vec![
        Dot {
            center: Vec3::xy(-half_width, 0.0),
            radius: node_radius,
            filled: false,
        },
        Dot {
            center: Vec3::xy(half_width, 0.0),
            radius: node_radius,
            filled: false,
        },
    ];

    // The contact bar spans the contacts' tops; open adds one travel of air
    // gap below it.
    let contact_y = node_radius + if closed { 0.0 } else { travel };
    let button_centre = Vec3::xy(0.0, contact_y + travel);
    let button_half_width = config.square_bipole_side_length / 8.0;

    let strokes = vec![
        line_between(
            Vec3::xy(-half_width, contact_y),
            Vec3::xy(half_width, contact_y),
        ),
        line_between(Vec3::xy(0.0, contact_y), button_centre),
        line_between(
            button_centre - Vec3::xy(button_half_width, 0.0),
            button_centre + Vec3::xy(button_half_width, 0.0),
        ),
    ];

    SymbolBody::new(strokes, dots, SymbolBody::bipole_terminals(half_width))
}
