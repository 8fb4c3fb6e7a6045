//! Connectivity analysis: node set, connected components, reference nodes.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::graph::Circuit;
use super::types::NodeId;

/// Node set and component structure of a circuit snapshot.
///
/// Every element is treated as an undirected edge between its two endpoints,
/// regardless of its kind. Nodes that no element touches do not exist here.
#[derive(Debug, Clone)]
pub struct Connectivity {
    /// Unique node ids in first-encountered order
    nodes: Vec<NodeId>,
    /// Neighbours of each node, one entry per incident element
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    /// One reference node per component, ascending
    references: Vec<NodeId>,
}

impl Connectivity {
    /// Analyze the topology of a circuit.
    pub fn analyze(circuit: &Circuit) -> Self {
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for (n0, n1) in circuit.edges() {
            for node in [n0, n1] {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
            adjacency.entry(n0).or_default().push(n1);
            adjacency.entry(n1).or_default().push(n0);
        }

        let mut analysis = Self {
            nodes,
            adjacency,
            references: Vec::new(),
        };
        analysis.references = analysis.find_reference_nodes();
        analysis
    }

    /// Unique node ids referenced by any element, in first-encountered order.
    pub fn node_set(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Check whether any element touches `node`.
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// All nodes reachable from `start`, in breadth-first order.
    ///
    /// The result begins with `start` itself. A node that no element touches
    /// has no component and yields an empty list.
    pub fn connected_nodes(&self, start: NodeId) -> Vec<NodeId> {
        if !self.contains(start) {
            return Vec::new();
        }

        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            if let Some(neighbours) = self.adjacency.get(&node) {
                for &next in neighbours {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        order
    }

    /// One reference (ground) node per connected component, ascending.
    pub fn reference_nodes(&self) -> &[NodeId] {
        &self.references
    }

    /// Check whether `node` is the reference node of its component.
    pub fn is_reference(&self, node: NodeId) -> bool {
        self.references.binary_search(&node).is_ok()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        self.references.len()
    }

    /// Nodes of each component, in the same order as [`Self::reference_nodes`].
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        self.references
            .iter()
            .map(|&reference| self.connected_nodes(reference))
            .collect()
    }

    /// Take the lowest remaining node, then drop its whole component; repeat.
    fn find_reference_nodes(&self) -> Vec<NodeId> {
        let mut remaining: BTreeSet<NodeId> = self.nodes.iter().copied().collect();
        let mut references = Vec::new();

        while let Some(&lowest) = remaining.iter().next() {
            references.push(lowest);
            for node in self.connected_nodes(lowest) {
                remaining.remove(&node);
            }
        }

        references
    }
}
