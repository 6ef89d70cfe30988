//! Node-specific behaviour: lazily created, direction-deduplicated
//! terminals and solder-blob bookkeeping.
//!
//! A node starts with no terminals at all. Asking for a terminal in a
//! direction either returns the existing terminal within angular tolerance
//! or creates a fresh one pointing that way. A filled node shows its solder
//! blob once more than two terminals exist; manually forcing the blob on or
//! off disables that automatic rule.

use schemkit_core::{
    CircuitError, Result, Vec3, DOWN, DOWN_LEFT, DOWN_RIGHT, LEFT, RIGHT, UP, UP_LEFT, UP_RIGHT,
};
use schemkit_layout::TerminalId;

use crate::component::Component;

/// Terminal count above which an autoblobbing node shows its blob.
pub const AUTOBLOB_THRESHOLD: usize = 2;

/// Cosine tolerance for treating two directions as the same.
const DIRECTION_TOLERANCE: f64 = 1e-6;

impl Component {
    /// Get the node's terminal pointing `direction`, creating it if needed.
    ///
    /// # Errors
    ///
    /// [`CircuitError::FixedTerminals`] for components whose terminal set is
    /// determined by their symbol; `GeometryError::ZeroVector` for a zero
    /// direction.
    pub fn terminal_toward(&mut self, direction: Vec3) -> Result<TerminalId> {
        if !self.symbol().has_dynamic_terminals() {
            return Err(CircuitError::FixedTerminals.into());
        }
        let direction = direction.normalized()?;

        let world = direction.rotated(self.rotation());
        if let Some(existing) = self
            .terminals()
            .iter()
            .find(|t| t.direction().dot(world) > 1.0 - DIRECTION_TOLERANCE)
        {
            return Ok(existing.id());
        }

        let id = self.push_terminal(direction)?;
        self.refresh_blob();
        Ok(id)
    }

    pub fn terminal_right(&mut self) -> Result<TerminalId> {
        self.terminal_toward(RIGHT)
    }

    pub fn terminal_up(&mut self) -> Result<TerminalId> {
        self.terminal_toward(UP)
    }

    pub fn terminal_left(&mut self) -> Result<TerminalId> {
        self.terminal_toward(LEFT)
    }

    pub fn terminal_down(&mut self) -> Result<TerminalId> {
        self.terminal_toward(DOWN)
    }

    pub fn terminal_up_right(&mut self) -> Result<TerminalId> {
        self.terminal_toward(UP_RIGHT)
    }

    pub fn terminal_up_left(&mut self) -> Result<TerminalId> {
        self.terminal_toward(UP_LEFT)
    }

    pub fn terminal_down_left(&mut self) -> Result<TerminalId> {
        self.terminal_toward(DOWN_LEFT)
    }

    pub fn terminal_down_right(&mut self) -> Result<TerminalId> {
        self.terminal_toward(DOWN_RIGHT)
    }

    /// Whether the node's dot is currently drawn. Always `false` for
    /// non-node components.
    pub fn blob_visible(&self) -> bool {
        self.node.map(|state| state.blob_visible).unwrap_or(false)
    }

    /// Force the blob on or off. Disables autoblobbing, which would
    /// otherwise fight the manual setting.
    pub fn set_blob_visibility(&mut self, visible: bool) {
        if let Some(state) = self.node.as_mut() {
            state.blob_visible = visible;
            state.autoblob = false;
        }
    }

    /// Re-enable or disable the automatic terminal-count rule. Enabling
    /// recomputes the blob immediately.
    pub fn set_autoblobbing(&mut self, autoblob: bool) {
        if let Some(state) = self.node.as_mut() {
            state.autoblob = autoblob;
        }
        self.refresh_blob();
    }

    pub(crate) fn refresh_blob(&mut self) {
        let count = self.terminals().len();
        if let Some(state) = self.node.as_mut() {
            if state.autoblob {
                state.blob_visible = count > AUTOBLOB_THRESHOLD;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use schemkit_core::SymbolConfig;
    use schemkit_symbols::Symbol;

    use super::*;

    fn node(open: bool) -> Component {
        Component::new(Symbol::Node { open }, &SymbolConfig::default()).unwrap()
    }

    #[test]
    fn test_same_direction_yields_same_terminal() {
        let mut node = node(false);
        let first = node.terminal_toward(RIGHT).unwrap();
        let second = node.terminal_toward(Vec3::xy(2.0, 0.0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(node.terminals().len(), 1);
    }

    #[test]
    fn test_distinct_directions_yield_distinct_terminals() {
        let mut node = node(false);
        let right = node.terminal_right().unwrap();
        let up = node.terminal_up().unwrap();
        assert_ne!(right, up);
        assert_eq!(node.terminals().len(), 2);
    }

    #[test]
    fn test_blob_appears_past_two_terminals() {
        let mut node = node(false);
        node.terminal_right().unwrap();
        node.terminal_up().unwrap();
        assert!(!node.blob_visible());
        node.terminal_left().unwrap();
        assert!(node.blob_visible());
    }

    #[test]
    fn test_manual_blob_override_disables_autoblobbing() {
        let mut node = node(false);
        node.set_blob_visibility(true);
        assert!(node.blob_visible());
        // New terminals no longer change the blob.
        node.terminal_right().unwrap();
        node.terminal_up().unwrap();
        assert!(node.blob_visible());
    }

    #[test]
    fn test_open_node_always_shows_its_circle() {
        let mut node = node(true);
        assert!(node.blob_visible());
        node.terminal_right().unwrap();
        assert!(node.blob_visible());
    }

    #[test]
    fn test_fixed_symbol_rejects_dynamic_terminals() {
        let config = SymbolConfig::default();
        let mut resistor = Component::new(Symbol::Resistor, &config).unwrap();
        assert!(resistor.terminal_toward(RIGHT).is_err());
    }

    #[test]
    fn test_diagonal_accessors_are_deduplicated() {
        let mut node = node(false);
        let a = node.terminal_up_right().unwrap();
        let b = node.terminal_toward(Vec3::xy(1.0, 1.0)).unwrap();
        assert_eq!(a, b);
    }
}
