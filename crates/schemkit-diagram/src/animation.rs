//! Animation planning.
//!
//! Every circuit mutation has an instant form on [`Circuit`] and a planning
//! form here that applies the same mutation and additionally returns the
//! [`AnimationStep`]s a host animation framework should play to show it.
//! Steps are plain data; composing, reordering, or dropping them is the
//! caller's business.

use serde::{Deserialize, Serialize};

use schemkit_core::Result;
use schemkit_layout::Terminal;

use crate::circuit::{Circuit, Selection};
use crate::component::ComponentId;
use crate::mark::MarkKind;
use crate::wire::WireId;

/// One host-animatable step resulting from a circuit mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationStep {
    /// Draw a newly added wire.
    CreateWire { wire: WireId },
    /// Undraw a removed wire.
    RemoveWire { wire: WireId },
    /// Show or hide a node's solder blob.
    SetBlob { component: ComponentId, visible: bool },
    /// Write or replace a mark's text.
    SetMark {
        component: ComponentId,
        kind: MarkKind,
        text: String,
    },
    /// Remove a mark.
    ClearMark {
        component: ComponentId,
        kind: MarkKind,
    },
}

impl Circuit {
    /// [`Circuit::connect`] plus the steps to animate it.
    pub fn plan_connect(
        &mut self,
        from: &Terminal,
        to: &Terminal,
    ) -> Result<(WireId, Vec<AnimationStep>)> {
        let blobs_before = self.blob_states();
        let wire = self.connect(from, to)?;
        let mut steps = vec![AnimationStep::CreateWire { wire }];
        steps.extend(self.blob_changes(&blobs_before));
        Ok((wire, steps))
    }

    /// [`Circuit::disconnect`] plus the steps to animate it.
    pub fn plan_disconnect(&mut self, selections: &[Selection]) -> Result<Vec<AnimationStep>> {
        let blobs_before = self.blob_states();
        let removed = self.disconnect(selections)?;
        let mut steps: Vec<AnimationStep> = removed
            .into_iter()
            .map(|wire| AnimationStep::RemoveWire { wire })
            .collect();
        steps.extend(self.blob_changes(&blobs_before));
        Ok(steps)
    }

    /// [`Circuit::isolate`] plus the steps to animate it.
    pub fn plan_isolate(&mut self, selections: &[Selection]) -> Result<Vec<AnimationStep>> {
        let blobs_before = self.blob_states();
        let removed = self.isolate(selections)?;
        let mut steps: Vec<AnimationStep> = removed
            .into_iter()
            .map(|wire| AnimationStep::RemoveWire { wire })
            .collect();
        steps.extend(self.blob_changes(&blobs_before));
        Ok(steps)
    }

    /// Set a component's label and return the step to animate it.
    pub fn plan_set_label(
        &mut self,
        component: ComponentId,
        text: impl Into<String>,
    ) -> Result<Vec<AnimationStep>> {
        let text = text.into();
        self.component_mut(component)?.set_label(text.clone());
        Ok(vec![AnimationStep::SetMark {
            component,
            kind: MarkKind::Label,
            text,
        }])
    }

    /// Clear a component's label and return the step to animate it.
    pub fn plan_clear_label(&mut self, component: ComponentId) -> Result<Vec<AnimationStep>> {
        self.component_mut(component)?.clear_label();
        Ok(vec![AnimationStep::ClearMark {
            component,
            kind: MarkKind::Label,
        }])
    }

    fn blob_states(&self) -> Vec<(ComponentId, bool)> {
        self.components()
            .map(|c| (c.id(), c.blob_visible()))
            .collect()
    }

    fn blob_changes(&self, before: &[(ComponentId, bool)]) -> Vec<AnimationStep> {
        self.components()
            .filter_map(|component| {
                let visible = component.blob_visible();
                let previous = before
                    .iter()
                    .find(|(id, _)| *id == component.id())
                    .map(|(_, v)| *v)?;
                (visible != previous).then_some(AnimationStep::SetBlob {
                    component: component.id(),
                    visible,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use schemkit_core::{SymbolConfig, Vec3};
    use schemkit_symbols::Symbol;

    use crate::component::Component;

    use super::*;

    #[test]
    fn test_plan_connect_then_disconnect_round_trip() {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let mut r1 = Component::new(Symbol::Resistor, &config).unwrap();
        r1.set_position(Vec3::xy(-2.0, 0.0)).unwrap();
        let mut r2 = Component::new(Symbol::Resistor, &config).unwrap();
        r2.set_position(Vec3::xy(2.0, 0.0)).unwrap();
        let a = circuit.add(r1);
        let b = circuit.add(r2);

        let from = *circuit.component(a).unwrap().right().unwrap();
        let to = *circuit.component(b).unwrap().left().unwrap();

        let (wire, steps) = circuit.plan_connect(&from, &to).unwrap();
        assert_eq!(steps, vec![AnimationStep::CreateWire { wire }]);

        let steps = circuit
            .plan_disconnect(&[Selection::Component(a), Selection::Component(b)])
            .unwrap();
        assert_eq!(steps, vec![AnimationStep::RemoveWire { wire }]);
        assert_eq!(circuit.wires().count(), 0);
    }

    #[test]
    fn test_plan_set_label_applies_and_describes() {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let id = circuit.add(Component::new(Symbol::Resistor, &config).unwrap());

        let steps = circuit.plan_set_label(id, "R_1").unwrap();
        assert_eq!(
            steps,
            vec![AnimationStep::SetMark {
                component: id,
                kind: MarkKind::Label,
                text: "R_1".into(),
            }]
        );
        assert_eq!(
            circuit.component(id).unwrap().label().unwrap().text,
            "R_1"
        );
    }
}
