//! Symbol and routing configuration.
//!
//! Configuration is an explicit value threaded through constructors rather
//! than process-wide state. Temporary overrides (mostly for tests) use the
//! save/restore guard [`ConfigOverride`].

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Display and routing configuration for circuit symbols.
///
/// Lengths are in diagram units; angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Stroke width for component symbol bodies.
    pub component_stroke_width: f64,
    /// Stroke width for wires and terminal stems.
    pub wire_stroke_width: f64,
    /// Length of a terminal stem from component body to connection point.
    pub terminal_length: f64,
    /// Width of box-style bipole bodies (resistors and friends).
    pub bipole_width: f64,
    /// Height of box-style bipole bodies.
    pub bipole_height: f64,
    /// Side length used by square/round bipoles (sources, switches).
    pub square_bipole_side_length: f64,
    /// Gap between capacitor plates.
    pub plate_gap: f64,
    /// Height of capacitor plates.
    pub plate_height: f64,
    /// Radius of node dots and open switch contacts.
    pub node_radius: f64,
    /// Radius of the triangular current arrow on terminals.
    pub current_arrow_radius: f64,
    /// Maximum angle from a cardinal axis at which a terminal direction is
    /// still treated as that axis for routing and mark alignment.
    pub cardinal_alignment_margin: f64,
    /// Arc angle swept by a voltage arrow with no obstacle to avoid.
    pub voltage_default_arc_angle: f64,
    /// Gap between a voltage arrow's ends and the terminal ends.
    pub voltage_end_buffer: f64,
    /// Clearance between a voltage arc's waypoint and the avoided obstacle.
    pub obstacle_clearance: f64,
    /// Font size for marks (labels and annotations).
    pub mark_font_size: f64,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        let component_stroke_width = 4.0;
        Self {
            component_stroke_width,
            wire_stroke_width: 0.625 * component_stroke_width,
            terminal_length: 0.35,
            bipole_width: 1.0,
            bipole_height: 0.4,
            square_bipole_side_length: 0.7,
            plate_gap: 0.2,
            plate_height: 0.6,
            node_radius: 0.06,
            current_arrow_radius: 0.1,
            cardinal_alignment_margin: 5.0 * PI / 180.0,
            voltage_default_arc_angle: PI / 3.0,
            voltage_end_buffer: 0.1,
            obstacle_clearance: 0.1,
            mark_font_size: 36.0,
        }
    }
}

impl SymbolConfig {
    /// Parse a configuration from a TOML document. Missing keys fall back to
    /// their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| crate::error::Error::other(format!("failed to parse config: {e}")))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::other(format!("failed to serialize config: {e}")))
    }
}

/// Scoped configuration override.
///
/// Applies a mutation to a configuration and restores the previous values
/// when dropped. Intended for tests and temporary render passes.
///
/// ```
/// use schemkit_core::{ConfigOverride, SymbolConfig};
///
/// let mut config = SymbolConfig::default();
/// {
///     let _guard = ConfigOverride::apply(&mut config, |c| c.terminal_length = 1.0);
/// }
/// assert_eq!(config, SymbolConfig::default());
/// ```
pub struct ConfigOverride<'a> {
    target: &'a mut SymbolConfig,
    saved: SymbolConfig,
}

impl<'a> ConfigOverride<'a> {
    /// Apply `mutate` to `target`, remembering the previous state.
    pub fn apply(target: &'a mut SymbolConfig, mutate: impl FnOnce(&mut SymbolConfig)) -> Self {
        let saved = target.clone();
        mutate(target);
        Self { target, saved }
    }

    /// Access the overridden configuration.
    pub fn config(&self) -> &SymbolConfig {
        self.target
    }
}

impl Drop for ConfigOverride<'_> {
    fn drop(&mut self) {
        *self.target = self.saved.clone();
    }
}
