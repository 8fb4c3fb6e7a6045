//! Core types for circuit representation.

use std::fmt;

/// An electrical connection point, identified by a non-negative integer.
///
/// Nodes are not stored anywhere on their own; a node exists only as an
/// endpoint referenced by some element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A unique identifier for an element, shared across all element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodeId(3).to_string(), "N3");
        assert_eq!(ElementId(12).to_string(), "E12");
    }

    #[test]
    fn test_node_ordering() {
        let mut nodes = vec![NodeId(4), NodeId(0), NodeId(2)];
        nodes.sort();
        assert_eq!(nodes, vec![NodeId(0), NodeId(2), NodeId(4)]);
    }
}
