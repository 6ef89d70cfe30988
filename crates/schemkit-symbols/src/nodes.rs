//! Node symbol: a lone dot marking a wire junction or open connection
//! point. Terminals are created on demand by the diagram layer, so the body
//! carries none.

use schemkit_core::{SymbolConfig, Vec3};

use crate::body::{Dot, SymbolBody};

pub fn node(open: bool, config: &SymbolConfig) -> SymbolBody {
    SymbolBody::new(
        vec![],
        vec![Dot {
            center: Vec3::default(),
            radius: config.node_radius,
            filled: !open,
        }],
        vec![],
    )
}
