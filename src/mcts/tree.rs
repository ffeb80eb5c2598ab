//! Arena-based MCTS tree.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::Player;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// The root is always the first node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<M> {
    nodes: Vec<MCTSNode<M>>,
}

impl<M> MCTSTree<M> {
    /// Create a tree holding only a root.
    pub fn new(root_player: Player) -> Self {
        Self::with_capacity(root_player, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_player: Player, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(root_player));
        Self { nodes }
    }

    /// Root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<M> {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<M> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode<M>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes. A built tree always holds its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shape summary of the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal).count(),
            total_edges: self.nodes.iter().map(|n| n.edges.len()).sum(),
            expanded_edges: self
                .nodes
                .iter()
                .flat_map(|n| n.edges.iter())
                .filter(|e| e.is_expanded())
                .count(),
        }
    }

    /// Drop every node and start over from a new root.
    pub fn reset(&mut self, root_player: Player) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(root_player));
    }

    /// Root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<M> {
        self.get(self.root())
    }

    /// Root node, mutably.
    pub fn root_node_mut(&mut self) -> &mut MCTSNode<M> {
        let root = self.root();
        self.get_mut(root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<M>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Deepest node.
    pub max_depth: u16,

    /// Nodes where the game is over.
    pub terminal_count: usize,

    /// Total number of edges.
    pub total_edges: usize,

    /// Edges with a child node.
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Average edges per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }

    /// Share of edges that have a child.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_edges == 0 {
            0.0
        } else {
            self.expanded_edges as f64 / self.total_edges as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::node::Edge;

    #[test]
    fn test_tree_new() {
        let tree: MCTSTree<u8> = MCTSTree::new(Player::X);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_node().to_move, Player::X);
    }

    #[test]
    fn test_tree_alloc_and_get_mut() {
        let mut tree: MCTSTree<u8> = MCTSTree::new(Player::X);

        let child_id = tree.alloc(MCTSNode::new(tree.root(), 0, Player::O, 1));
        assert_eq!(child_id, NodeId::new(1));
        assert_eq!(tree.get(child_id).to_move, Player::O);

        tree.root_node_mut().visits = 100;
        assert_eq!(tree.root_node().visits, 100);
    }

    #[test]
    fn test_tree_reset() {
        let mut tree: MCTSTree<u8> = MCTSTree::new(Player::X);
        tree.alloc(MCTSNode::new(NodeId::new(0), 0, Player::O, 1));
        tree.alloc(MCTSNode::new(NodeId::new(1), 0, Player::X, 2));
        assert_eq!(tree.len(), 3);

        tree.reset(Player::O);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().to_move, Player::O);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MCTSTree::new(Player::X);
        let root = tree.root();
        tree.get_mut(root).edges.push(Edge::new(1u8));
        tree.get_mut(root).edges.push(Edge::new(2u8));

        let child_id = tree.alloc(MCTSNode::new(root, 0, Player::O, 1));
        tree.get_mut(root).edges[0].child = child_id;
        tree.get_mut(child_id).is_terminal = true;

        let stats = tree.stats();

        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.terminal_count, 1);
        assert_eq!(stats.total_edges, 2);
        assert_eq!(stats.expanded_edges, 1);
        assert_eq!(stats.expansion_ratio(), 0.5);
        assert_eq!(stats.branching_factor(), 1.0);
    }

    #[test]
    fn test_tree_iter() {
        let mut tree: MCTSTree<u8> = MCTSTree::new(Player::X);
        tree.alloc(MCTSNode::new(NodeId::new(0), 0, Player::O, 1));

        let ids: Vec<_> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![NodeId::new(0), NodeId::new(1)]);
    }

    #[test]
    fn test_tree_serialization() {
        let mut tree: MCTSTree<u8> = MCTSTree::new(Player::X);
        tree.root_node_mut().visits = 50;
        tree.alloc(MCTSNode::new(NodeId::new(0), 0, Player::O, 1));

        let json = serde_json::to_string(&tree).unwrap();
        let deserialized: MCTSTree<u8> = serde_json::from_str(&json).unwrap();

        assert_eq!(tree.len(), deserialized.len());
        assert_eq!(deserialized.root_node().visits, 50);
    }
}
