//! Resistors, including zero-resistance wires.

use crate::circuit::{ElementId, NodeId};

/// A resistor between two nodes.
///
/// A resistance of exactly `0.0` makes the resistor an ideal wire: its current
/// becomes an unknown of the system and its branch equation forces both
/// endpoints to the same voltage. The test is exact equality, so a tiny but
/// nonzero resistance still goes through the ordinary `1/R` path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    pub id: ElementId,
    pub nodes: [NodeId; 2], // [node0, node1]
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(id: ElementId, node0: NodeId, node1: NodeId, resistance: f64) -> Self {
        Self {
            id,
            nodes: [node0, node1],
            resistance,
        }
    }

    /// Create a zero-resistance wire.
    pub fn wire(id: ElementId, node0: NodeId, node1: NodeId) -> Self {
        Self::new(id, node0, node1, 0.0)
    }

    /// Check whether this resistor is an ideal wire.
    #[allow(clippy::float_cmp)]
    pub fn is_wire(&self) -> bool {
        self.resistance == 0.0
    }

    /// Get the conductance (1/R). Infinite for wires.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Current from node0 to node1 given the endpoint voltages.
    ///
    /// Only meaningful for ordinary resistors; wire currents come out of the
    /// linear solve instead.
    pub fn current(&self, v0: f64, v1: f64) -> f64 {
        (v0 - v1) / self.resistance
    }
}
