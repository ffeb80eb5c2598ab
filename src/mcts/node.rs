//! MCTS node and edge structures.
//!
//! Nodes live in an arena and refer to each other by `NodeId`, so the tree
//! serializes without pointer fix-ups.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerMap};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A move out of a node, with the statistics gathered through it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<M> {
    /// The move this edge represents.
    pub mv: M,

    /// Child node (NONE until expanded).
    pub child: NodeId,

    /// Times this move was taken during search.
    pub visits: u32,

    /// Sum of rollout rewards, per player.
    pub total_reward: PlayerMap<f64>,
}

impl<M> Edge<M> {
    /// Create an unvisited edge.
    pub fn new(mv: M) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: PlayerMap::with_value(0.0),
        }
    }

    /// Mean reward for a player, 0 when unvisited.
    #[must_use]
    pub fn mean_reward(&self, player: Player) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward[player] / f64::from(self.visits)
        }
    }

    /// Check if this edge has a child node.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A position in the search tree.
///
/// Ultimate tic-tac-toe has up to 81 moves from one position, but after the
/// opening the forced board keeps it at nine or fewer, hence the inline size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<M> {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the parent's edge that leads here.
    pub parent_edge_idx: u16,

    /// Player to move at this node.
    pub to_move: Player,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Total visits through this node.
    pub visits: u32,

    /// Game over at this node.
    pub is_terminal: bool,

    /// Final rewards when terminal.
    pub terminal_reward: Option<PlayerMap<f64>>,

    /// Outgoing moves.
    pub edges: SmallVec<[Edge<M>; 9]>,
}

impl<M> MCTSNode<M> {
    /// Create a new node.
    pub fn new(parent: NodeId, parent_edge_idx: u16, to_move: Player, depth: u16) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            visits: 0,
            is_terminal: false,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(to_move: Player) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0)
    }

    /// Check if every edge has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(Edge::is_expanded)
    }

    /// Check if any edge still lacks a child.
    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Indices of edges without a child.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_expanded())
            .map(|(i, _)| i)
    }

    /// Most visited edge. Ties go to the earliest edge.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge<M>> {
        self.edges
            .iter()
            .reduce(|best, e| if e.visits > best.visits { e } else { best })
    }

    /// Edge with the highest mean reward for a player.
    #[must_use]
    pub fn best_edge_by_reward(&self, player: Player) -> Option<&Edge<M>> {
        self.edges
            .iter()
            .max_by(|a, b| a.mean_reward(player).total_cmp(&b.mean_reward(player)))
    }
}
