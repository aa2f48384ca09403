//! `NeuronNode` and `Neuron`: the tree produced by `Builder::convert_to_neuron`.
//!
//! Translated from `examples/original_source/src/sigen/common/neuron.h`,
//! with `boost::shared_ptr`/raw-pointer adjacency replaced by owning
//! `Vec<NeuronNode>` storage and index-based adjacency.

use std::collections::BTreeSet;

/// A node's role, determined purely by its neighbor count once the tree
/// is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A tree endpoint: 0 or 1 neighbors.
    Edge,
    /// A chain link: exactly 2 neighbors.
    Connect,
    /// A branch point: 3 or more neighbors.
    Branch,
}

impl Role {
    pub fn from_degree(degree: usize) -> Self {
        if degree >= 3 {
            Role::Branch
        } else if degree == 2 {
            Role::Connect
        } else {
            Role::Edge
        }
    }

    /// The SWC `type` column this role maps to. All roles share type 3
    /// (dendrite) in this crate; SWC distinguishes cell bodies, axons,
    /// etc., which this crate does not classify.
    pub fn swc_type(self) -> i32 {
        3
    }
}

#[derive(Debug, Clone)]
pub struct NeuronNode {
    /// 1-based, globally unique across all neurons from one build call.
    /// `0` until `Builder::compute_id` assigns it.
    pub id: usize,
    pub position: (f64, f64, f64),
    pub radius: f64,
    /// `Role::Edge` until `Builder::compute_node_type` assigns the real role.
    pub role: Role,
    /// The id of this node's parent in the rooted tree, or `-1` at the root.
    pub parent_id: i64,
    adjacency: BTreeSet<usize>,
}

impl NeuronNode {
    pub(crate) fn new(position: (f64, f64, f64), radius: f64) -> Self {
        NeuronNode {
            id: 0,
            position,
            radius,
            role: Role::Edge,
            parent_id: -1,
            adjacency: BTreeSet::new(),
        }
    }

    pub fn adjacency(&self) -> &BTreeSet<usize> {
        &self.adjacency
    }

    pub(crate) fn connect(&mut self, other: usize) {
        self.adjacency.insert(other);
    }

    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }
}

/// An owning container for the nodes of one rooted tree, plus the index
/// of its distinguished root.
#[derive(Debug, Clone)]
pub struct Neuron {
    nodes: Vec<NeuronNode>,
    root: usize,
}

impl Neuron {
    pub(crate) fn new(nodes: Vec<NeuronNode>, root: usize) -> Self {
        assert!(root < nodes.len(), "root index out of range for neuron of {} nodes", nodes.len());
        Neuron { nodes, root }
    }

    pub fn nodes(&self) -> &[NeuronNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [NeuronNode] {
        &mut self.nodes
    }

    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn root(&self) -> &NeuronNode {
        &self.nodes[self.root]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node graph is connected and acyclic: exactly
    /// `len() - 1` undirected edges reachable from the root, and every
    /// node reachable from the root.
    pub fn is_tree(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let adjacency: Vec<BTreeSet<usize>> = self.nodes.iter().map(|n| n.adjacency().clone()).collect();
        let mut visited = vec![false; self.nodes.len()];
        let reached = crate::util::graph::bfs_collect(&adjacency, self.root, &mut visited, |_, _| true);
        if reached.len() != self.nodes.len() {
            return false;
        }
        let edge_count: usize = adjacency.iter().map(|s| s.len()).sum::<usize>() / 2;
        edge_count == self.nodes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_degree() {
        assert_eq!(Role::from_degree(0), Role::Edge);
        assert_eq!(Role::from_degree(1), Role::Edge);
        assert_eq!(Role::from_degree(2), Role::Connect);
        assert_eq!(Role::from_degree(3), Role::Branch);
        assert_eq!(Role::from_degree(5), Role::Branch);
    }

    #[test]
    fn chain_of_three_is_a_tree() {
        let mut a = NeuronNode::new((0.0, 0.0, 0.0), 1.0);
        let mut b = NeuronNode::new((1.0, 0.0, 0.0), 1.0);
        let mut c = NeuronNode::new((2.0, 0.0, 0.0), 1.0);
        a.connect(1);
        b.connect(0);
        b.connect(2);
        c.connect(1);
        let neuron = Neuron::new(vec![a, b, c], 0);
        assert!(neuron.is_tree());
    }

    #[test]
    fn graph_with_a_cycle_is_not_a_tree() {
        let mut a = NeuronNode::new((0.0, 0.0, 0.0), 1.0);
        let mut b = NeuronNode::new((1.0, 0.0, 0.0), 1.0);
        let mut c = NeuronNode::new((2.0, 0.0, 0.0), 1.0);
        a.connect(1);
        a.connect(2);
        b.connect(0);
        b.connect(2);
        c.connect(0);
        c.connect(1);
        let neuron = Neuron::new(vec![a, b, c], 0);
        assert!(!neuron.is_tree());
    }
}
