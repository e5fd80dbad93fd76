use crate::policy::{rollout, RolloutPolicy};
use crate::tree::SearchTree;
use petgraph::graph::NodeIndex;
use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// selection (UCT), expansion, rollout, and backpropagation, bounded by wall time only.
pub struct MctsDriver<R: Rng> {
    exploration_constant: f64,
    max_walltime: Duration,
    policy: Box<dyn RolloutPolicy>,
    rng: R,
}

impl<R: Rng> MctsDriver<R> {
    pub fn new(
        exploration_constant: f64,
        max_walltime_ms: u64,
        policy: Box<dyn RolloutPolicy>,
        rng: R,
    ) -> MctsDriver<R> {
        MctsDriver {
            exploration_constant,
            max_walltime: Duration::from_millis(max_walltime_ms),
            policy,
            rng,
        }
    }

    /// one selection/expansion/rollout/backprop iteration from `parent`, returning
    /// the reward produced by the rollout.
    fn iterate(&mut self, tree: &mut SearchTree, parent: NodeIndex, seen: &HashSet<Vec<u16>>) -> f64 {
        let mut current = parent;
        while !tree.node(current).is_terminal_node() {
            if tree.node(current).is_fully_expanded() {
                if tree.children(current).is_empty() {
                    break;
                }
                current = tree.uct_select(current, self.exploration_constant, &mut self.rng);
            } else {
                current = tree.expand(current, seen, &mut self.rng);
                break;
            }
        }

        let leaf_state = tree.node(current).state.clone();
        let mut terminal = rollout(leaf_state, self.policy.as_ref(), seen, &mut self.rng);
        let reward = terminal.reward();
        tree.backpropagate(current, reward);
        reward
    }

    /// loop selection/expansion/rollout/backprop until wall time exceeds the budget.
    /// wall time is the only stopping condition.
    pub fn search(&mut self, tree: &mut SearchTree, parent: NodeIndex, seen: &HashSet<Vec<u16>>) {
        let deadline = Instant::now() + self.max_walltime;
        loop {
            self.iterate(tree, parent, seen);
            if Instant::now() >= deadline {
                break;
            }
        }
    }

    /// like `search`, but bounded by an explicit iteration count instead of wall
    /// time — used by tests that need deterministic, reproducible searches.
    pub fn search_n(&mut self, tree: &mut SearchTree, parent: NodeIndex, seen: &HashSet<Vec<u16>>, n: usize) {
        for _ in 0..n {
            self.iterate(tree, parent, seen);
        }
    }

    pub fn best_child(&mut self, tree: &SearchTree, parent: NodeIndex) -> Option<NodeIndex> {
        tree.best_child(parent, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Uniform;
    use crate::target::parse_targets;
    use rand::SeedableRng;

    #[test]
    fn search_n_grows_the_tree_and_root_visits() {
        let targets = parse_targets(&["catching,normal".to_string()], true).unwrap();
        let root_state = crate::state::SandwichState::new(targets, 1, 2, 1, 1);
        let seen = HashSet::new();
        let (mut tree, root) = SearchTree::new(root_state, &seen);

        let rng = rand::rngs::SmallRng::seed_from_u64(42);
        let mut driver = MctsDriver::new(1.4, 0, Box::new(Uniform), rng);
        driver.search_n(&mut tree, root, &seen, 25);

        assert!(tree.node(root).visits > 0);
        assert!(!tree.children(root).is_empty());
    }
}
