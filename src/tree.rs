use crate::state::{Action, SandwichState};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rand::Rng;
use std::collections::HashSet;

const RESET_EPSILON: f64 = 1e-6;

/// one MCTS node: its state, accumulated statistics, and the actions not yet expanded.
/// owned by an arena graph rather than by parent/child pointers, so the structure
/// is acyclic by construction and needs no weak back-references.
pub struct NodeData {
    pub state: SandwichState,
    pub visits: u32,
    pub total_reward: f64,
    pub untried_actions: Vec<Action>,
}

impl NodeData {
    fn new(state: SandwichState, seen: &HashSet<Vec<u16>>) -> NodeData {
        let untried_actions = state.get_possible_actions(seen);
        NodeData {
            state,
            visits: 0,
            total_reward: 0.0,
            untried_actions,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    pub fn is_terminal_node(&self) -> bool {
        self.state.is_terminal()
    }
}

/// arena-backed search tree: `petgraph::DiGraph<NodeData, Action>` with `NodeIndex`
/// handles standing in for owned parent/child references.
pub struct SearchTree {
    graph: DiGraph<NodeData, Action>,
}

impl SearchTree {
    pub fn new(root_state: SandwichState, seen: &HashSet<Vec<u16>>) -> (SearchTree, NodeIndex) {
        let mut graph = DiGraph::new();
        let root = graph.add_node(NodeData::new(root_state, seen));
        (SearchTree { graph }, root)
    }

    pub fn node(&self, idx: NodeIndex) -> &NodeData {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut NodeData {
        &mut self.graph[idx]
    }

    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Outgoing).collect()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Incoming).next()
    }

    pub fn parent_action(&self, idx: NodeIndex) -> Option<Action> {
        let parent = self.parent(idx)?;
        let edge = self.graph.find_edge(parent, idx)?;
        self.graph.edge_weight(edge).copied()
    }

    /// pick a uniformly random untried action of `idx`, apply it, and attach the
    /// resulting state as a new child. returns the new child's index.
    pub fn expand(&mut self, idx: NodeIndex, seen: &HashSet<Vec<u16>>, rng: &mut impl Rng) -> NodeIndex {
        let action = {
            let node = self.node_mut(idx);
            let pick = rng.random_range(0..node.untried_actions.len());
            node.untried_actions.swap_remove(pick)
        };
        let child_state = self.node(idx).state.apply(action);
        let child = NodeData::new(child_state, seen);
        let child_idx = self.graph.add_node(child);
        self.graph.add_edge(idx, child_idx, action);
        child_idx
    }

    /// UCT score of `child` relative to `parent`'s visit count
    pub fn uct_score(&self, parent: NodeIndex, child: NodeIndex, exploration_constant: f64) -> f64 {
        let parent_visits = self.node(parent).visits as f64;
        let child_node = self.node(child);
        if child_node.visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = child_node.total_reward / child_node.visits as f64;
        let exploration = exploration_constant * (2.0 * parent_visits.ln() / child_node.visits as f64).sqrt();
        exploitation + exploration
    }

    /// child of `parent` with the largest UCT score, ties broken uniformly at random
    pub fn uct_select(&self, parent: NodeIndex, exploration_constant: f64, rng: &mut impl Rng) -> NodeIndex {
        let children = self.children(parent);
        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<NodeIndex> = Vec::new();
        for &child in &children {
            let score = self.uct_score(parent, child, exploration_constant);
            if score > best_score {
                best_score = score;
                best = vec![child];
            } else if score == best_score {
                best.push(child);
            }
        }
        best[rng.random_range(0..best.len())]
    }

    /// child of `parent` with the largest reward/visits, ties broken uniformly
    pub fn best_child(&self, parent: NodeIndex, rng: &mut impl Rng) -> Option<NodeIndex> {
        let children = self.children(parent);
        if children.is_empty() {
            return None;
        }
        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<NodeIndex> = Vec::new();
        for &child in &children {
            let node = self.node(child);
            let score = if node.visits == 0 {
                0.0
            } else {
                node.total_reward / node.visits as f64
            };
            if score > best_score {
                best_score = score;
                best = vec![child];
            } else if score == best_score {
                best.push(child);
            }
        }
        Some(best[rng.random_range(0..best.len())])
    }

    /// increment visits and accumulate reward from `leaf` up to the root
    pub fn backpropagate(&mut self, mut idx: NodeIndex, reward: f64) {
        loop {
            let node = self.node_mut(idx);
            node.visits += 1;
            node.total_reward += reward;
            match self.parent(idx) {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// reset `idx` and its descendants in place: visits = 1, reward = epsilon,
    /// preserving edges (untried actions already drawn) so repeated searches
    /// re-explore the same topology with fresh statistics.
    pub fn reset(&mut self, idx: NodeIndex) {
        let children = self.children(idx);
        let node = self.node_mut(idx);
        node.visits = 1;
        node.total_reward = RESET_EPSILON;
        for child in children {
            self.reset(child);
        }
    }

    /// all nodes in the tree whose state is terminal
    pub fn terminal_leaves(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.node(idx).is_terminal_node())
            .collect()
    }
}
