//! Ideal batteries and current sources.

use crate::circuit::{ElementId, NodeId};

/// An ideal battery.
///
/// The battery enforces `V(node1) - V(node0) = voltage`, so `node1` is the
/// positive terminal. Its current is an unknown of the system because an
/// ideal voltage source places no constraint on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Battery {
    pub id: ElementId,
    pub nodes: [NodeId; 2], // [negative, positive]
    pub voltage: f64,
}

impl Battery {
    /// Create a new battery.
    pub fn new(id: ElementId, node0: NodeId, node1: NodeId, voltage: f64) -> Self {
        Self {
            id,
            nodes: [node0, node1],
            voltage,
        }
    }
}

/// An ideal current source.
///
/// Current sources add directly to the right-hand side of the conservation
/// equations: `+current` at `node0` and `-current` at `node1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSource {
    pub id: ElementId,
    pub nodes: [NodeId; 2],
    pub current: f64,
}

impl CurrentSource {
    /// Create a new current source.
    pub fn new(id: ElementId, node0: NodeId, node1: NodeId, current: f64) -> Self {
        Self {
            id,
            nodes: [node0, node1],
            current,
        }
    }

    /// Net current this source contributes to the conservation equation of `node`.
    pub fn injection_at(&self, node: NodeId) -> f64 {
        let mut total = 0.0;
        if self.nodes[0] == node {
            total += self.current;
        }
        if self.nodes[1] == node {
            total -= self.current;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injection_signs() {
        let source = CurrentSource::new(ElementId(0), NodeId(1), NodeId(2), 0.25);
        assert_eq!(source.injection_at(NodeId(1)), 0.25);
        assert_eq!(source.injection_at(NodeId(2)), -0.25);
        assert_eq!(source.injection_at(NodeId(3)), 0.0);
    }

    #[test]
    fn test_self_loop_source_cancels() {
        let source = CurrentSource::new(ElementId(0), NodeId(4), NodeId(4), 1.0);
        assert_eq!(source.injection_at(NodeId(4)), 0.0);
    }
}
