//! Mapping the solved vector back to node voltages and element currents.

use std::collections::BTreeMap;

use crate::circuit::{Circuit, ElementId, NodeId};

use super::unknowns::{Unknown, UnknownRegistry};

/// Node voltages and element currents of one solved circuit snapshot.
///
/// Currents are positive when flowing from an element's `node0` toward its
/// `node1`. Voltages are relative to the reference node of each component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    voltages: BTreeMap<NodeId, f64>,
    currents: BTreeMap<ElementId, f64>,
}

impl Solution {
    /// A solution with no voltages and no currents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a solution from the solved unknown vector.
    ///
    /// Voltage and current unknowns are read straight from `x`. Ordinary
    /// resistors get their current from Ohm's law. A current source drives its
    /// current out of `node0`, so through the source itself it flows from
    /// `node1` to `node0` and is reported as `-current`.
    pub fn from_vector(circuit: &Circuit, registry: &UnknownRegistry, x: &[f64]) -> Self {
        let mut voltages = BTreeMap::new();
        let mut currents = BTreeMap::new();

        for (index, unknown) in registry.iter() {
            match unknown {
                Unknown::Voltage(node) => {
                    voltages.insert(node, x[index]);
                }
                Unknown::Current(element) => {
                    currents.insert(element, x[index]);
                }
            }
        }

        for resistor in circuit.resistors.iter().filter(|r| !r.is_wire()) {
            let [n0, n1] = resistor.nodes;
            let v0 = voltages.get(&n0).copied().unwrap_or(0.0);
            let v1 = voltages.get(&n1).copied().unwrap_or(0.0);
            currents.insert(resistor.id, resistor.current(v0, v1));
        }

        for source in &circuit.current_sources {
            currents.insert(source.id, -source.current);
        }

        Self { voltages, currents }
    }

    /// A solution with every node and element of `circuit` at zero.
    pub fn zeroed(circuit: &Circuit) -> Self {
        let voltages = circuit
            .edges()
            .flat_map(|(n0, n1)| [(n0, 0.0), (n1, 0.0)])
            .collect();
        let currents = circuit.elements().map(|e| (e.id(), 0.0)).collect();
        Self { voltages, currents }
    }

    /// Voltage at a node, if the node is part of the circuit.
    pub fn voltage_at(&self, node: NodeId) -> Option<f64> {
        self.voltages.get(&node).copied()
    }

    /// Current through an element, if the element is part of the circuit.
    pub fn current_of(&self, element: ElementId) -> Option<f64> {
        self.currents.get(&element).copied()
    }

    /// Voltage difference `V(a) - V(b)`, as a voltmeter between the two nodes reads it.
    pub fn voltage_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        Some(self.voltage_at(a)? - self.voltage_at(b)?)
    }

    /// Node voltages, ascending by node id.
    pub fn voltages(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.voltages.iter().map(|(&node, &v)| (node, v))
    }

    /// Element currents, ascending by element id.
    pub fn currents(&self) -> impl Iterator<Item = (ElementId, f64)> + '_ {
        self.currents.iter().map(|(&element, &i)| (element, i))
    }

    /// Check whether the solution holds nothing (empty circuit).
    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty() && self.currents.is_empty()
    }
}
