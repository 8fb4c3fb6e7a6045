//! Unknown registry: the scalar quantities the linear system solves for.

use std::collections::HashMap;
use std::fmt;

use crate::circuit::{Circuit, Connectivity, ElementId, NodeId};
use crate::elements::Element;

/// A scalar unknown of the MNA system.
///
/// Equality is by kind plus node or element id; the value is only ever used
/// as a key into [`UnknownRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Voltage of a node relative to its component's reference node
    Voltage(NodeId),
    /// Current through an element, positive from node0 toward node1
    Current(ElementId),
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Voltage(node) => write!(f, "V({})", node),
            Unknown::Current(element) => write!(f, "I({})", element),
        }
    }
}

/// Ordered set of unknowns with a stable index per unknown.
///
/// Layout: one voltage per node in node-set order, then one current per
/// battery, then one current per zero-resistance resistor. The index of an
/// unknown is its column in the system matrix and its slot in the solved
/// vector.
#[derive(Debug, Clone, Default)]
pub struct UnknownRegistry {
    unknowns: Vec<Unknown>,
    index: HashMap<Unknown, usize>,
    voltage_count: usize,
}

impl UnknownRegistry {
    /// Enumerate the unknowns of a circuit.
    pub fn new(circuit: &Circuit, connectivity: &Connectivity) -> Self {
        let voltages = voltage_unknowns(connectivity);
        let currents = current_unknowns(circuit);
        let voltage_count = voltages.len();

        let unknowns: Vec<Unknown> = voltages.into_iter().chain(currents).collect();
        let index: HashMap<Unknown, usize> = unknowns
            .iter()
            .enumerate()
            .map(|(i, &unknown)| (unknown, i))
            .collect();
        debug_assert_eq!(index.len(), unknowns.len(), "element ids must be unique");

        Self {
            unknowns,
            index,
            voltage_count,
        }
    }

    /// Total number of unknowns.
    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    /// Check whether there are no unknowns (empty circuit).
    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }

    /// Column index of an unknown, if it is registered.
    pub fn index_of(&self, unknown: &Unknown) -> Option<usize> {
        self.index.get(unknown).copied()
    }

    /// The unknown stored at `index`.
    pub fn get(&self, index: usize) -> Option<Unknown> {
        self.unknowns.get(index).copied()
    }

    /// Voltage unknowns, in node-set order.
    pub fn voltages(&self) -> &[Unknown] {
        &self.unknowns[..self.voltage_count]
    }

    /// Current unknowns: batteries first, then wires.
    pub fn currents(&self) -> &[Unknown] {
        &self.unknowns[self.voltage_count..]
    }

    /// Iterate `(index, unknown)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Unknown)> + '_ {
        self.unknowns.iter().copied().enumerate()
    }
}

/// One voltage unknown per node, in node-set order.
pub fn voltage_unknowns(connectivity: &Connectivity) -> Vec<Unknown> {
    connectivity
        .node_set()
        .iter()
        .map(|&node| Unknown::Voltage(node))
        .collect()
}

/// One current unknown per battery, then one per zero-resistance resistor.
///
/// [`Element::has_current_unknown`] decides which elements qualify; circuit
/// element order puts batteries before resistors.
pub fn current_unknowns(circuit: &Circuit) -> Vec<Unknown> {
    circuit
        .elements()
        .filter(Element::has_current_unknown)
        .map(|element| Unknown::Current(element.id()))
        .collect()
}
