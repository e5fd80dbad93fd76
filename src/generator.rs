use crate::error::PicnicError;
use crate::mcts::MctsDriver;
use crate::policy::{RolloutPolicy, SlotWeighted, StopBiased, Uniform};
use crate::recipe::Recipe;
use crate::state::SandwichState;
use crate::target::TargetSet;
use crate::tree::SearchTree;
use petgraph::graph::NodeIndex;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub enum RolloutPolicyKind {
    Uniform,
    StopBiased(f64),
    SlotWeighted(f64),
}

impl RolloutPolicyKind {
    fn build(self) -> Result<Box<dyn RolloutPolicy>, PicnicError> {
        Ok(match self {
            RolloutPolicyKind::Uniform => Box::new(Uniform),
            RolloutPolicyKind::StopBiased(p) => Box::new(StopBiased::new(p)?),
            RolloutPolicyKind::SlotWeighted(p) => Box::new(SlotWeighted::new(p)?),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    pub min_fillings: u8,
    pub max_fillings: u8,
    pub num_players: u8,
    pub strict_type_sharing: bool,
}

impl GeneratorOptions {
    pub fn validate(self) -> Result<GeneratorOptions, PicnicError> {
        if self.max_fillings < self.min_fillings {
            return Err(PicnicError::InvalidFillingBounds {
                min: self.min_fillings,
                max: self.max_fillings,
            });
        }
        if self.num_players == 0 || self.num_players > 4 {
            return Err(PicnicError::InvalidPlayerCount(self.num_players));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MctsOptions {
    pub exploration_constant: f64,
    pub max_walltime_ms: u64,
    pub rollout_policy: RolloutPolicyKind,
}

/// lazy iterator over batches of newly discovered terminal recipes. each `next`
/// runs one bounded MCTS descent from the root to a terminal node and reports
/// whichever terminal leaves in the tree have not yet been emitted.
pub struct RecipeGenerator {
    remaining: usize,
    tree: SearchTree,
    root: NodeIndex,
    seen: HashSet<Vec<u16>>,
    emitted: HashSet<Vec<u16>>,
    driver: MctsDriver<SmallRng>,
}

impl RecipeGenerator {
    pub fn new(
        targets: TargetSet,
        num_iter: usize,
        generator_options: GeneratorOptions,
        mcts_options: MctsOptions,
    ) -> Result<RecipeGenerator, PicnicError> {
        Self::with_rng(
            targets,
            num_iter,
            generator_options,
            mcts_options,
            SmallRng::from_os_rng(),
        )
    }

    pub fn with_seed(
        targets: TargetSet,
        num_iter: usize,
        generator_options: GeneratorOptions,
        mcts_options: MctsOptions,
        seed: u64,
    ) -> Result<RecipeGenerator, PicnicError> {
        Self::with_rng(
            targets,
            num_iter,
            generator_options,
            mcts_options,
            SmallRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        targets: TargetSet,
        num_iter: usize,
        generator_options: GeneratorOptions,
        mcts_options: MctsOptions,
        rng: SmallRng,
    ) -> Result<RecipeGenerator, PicnicError> {
        let generator_options = generator_options.validate()?;
        // re-validate under this call's strict_type_sharing: a caller may have parsed
        // targets under a different setting than the one the generator is asked to run with.
        let targets = TargetSet::new(targets.targets().to_vec(), generator_options.strict_type_sharing)?;
        let max_condiments = 4 * generator_options.num_players as i32;
        let root_state = SandwichState::new(
            targets,
            generator_options.min_fillings as i32,
            generator_options.max_fillings as i32,
            max_condiments,
            generator_options.num_players as i32,
        );
        let seen = HashSet::new();
        let (tree, root) = SearchTree::new(root_state, &seen);
        let policy = mcts_options.rollout_policy.build()?;
        let driver = MctsDriver::new(
            mcts_options.exploration_constant,
            mcts_options.max_walltime_ms,
            policy,
            rng,
        );

        Ok(RecipeGenerator {
            remaining: num_iter,
            tree,
            root,
            seen,
            emitted: HashSet::new(),
            driver,
        })
    }

    /// drop every recorded recipe key, starting a fresh search session while
    /// keeping the same tree topology and targets.
    pub fn reset_duplicate_suppression(&mut self) {
        self.seen.clear();
        self.emitted.clear();
    }

    fn step(&mut self) -> Vec<Recipe> {
        if self.tree.node(self.root).visits > 0 {
            self.tree.reset(self.root);
        }

        let mut current = self.root;
        loop {
            self.driver.search(&mut self.tree, current, &self.seen);
            match self.driver.best_child(&self.tree, current) {
                Some(child) => current = child,
                None => break,
            }
            if self.tree.node(current).is_terminal_node() {
                break;
            }
        }

        let mut batch = Vec::new();
        for leaf in self.tree.terminal_leaves() {
            let recipe = self.tree.node(leaf).state.recipe().clone();
            let key = recipe.canonical_key();
            if self.emitted.insert(key.clone()) {
                self.seen.insert(key);
                batch.push(recipe);
            }
        }
        batch
    }
}

impl Iterator for RecipeGenerator {
    type Item = Vec<Recipe>;

    fn next(&mut self) -> Option<Vec<Recipe>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.step())
    }
}

/// run `num_trees` independent generators — one root tree and one duplicate-suppression
/// set each — across the rayon pool, merging their discovered recipes. follows directly
/// from the embarrassingly-parallel Monte Carlo allowance: nothing in the single-tree
/// algorithm changes, only the fan-out and merge are new.
#[cfg(feature = "parallel")]
pub fn generate_parallel(
    targets: TargetSet,
    num_iter_per_tree: usize,
    num_trees: usize,
    generator_options: GeneratorOptions,
    mcts_options: MctsOptions,
) -> Result<Vec<Recipe>, PicnicError> {
    use rayon::prelude::*;

    let results: Result<Vec<Vec<Recipe>>, PicnicError> = (0..num_trees)
        .into_par_iter()
        .map(|i| {
            let generator = RecipeGenerator::with_seed(
                targets.clone(),
                num_iter_per_tree,
                generator_options,
                mcts_options,
                i as u64,
            )?;
            Ok(generator.flatten().collect())
        })
        .collect();

    let mut merged = HashSet::new();
    let mut recipes = Vec::new();
    for batch in results?.into_iter().flatten() {
        if merged.insert(batch.canonical_key()) {
            recipes.push(batch);
        }
    }
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::parse_targets;

    #[test]
    fn generator_options_reject_bad_bounds() {
        let opts = GeneratorOptions {
            min_fillings: 4,
            max_fillings: 2,
            num_players: 1,
            strict_type_sharing: true,
        };
        assert!(matches!(opts.validate(), Err(PicnicError::InvalidFillingBounds { .. })));
    }

    #[test]
    fn generator_options_reject_bad_player_count() {
        let opts = GeneratorOptions {
            min_fillings: 1,
            max_fillings: 6,
            num_players: 5,
            strict_type_sharing: true,
        };
        assert!(matches!(opts.validate(), Err(PicnicError::InvalidPlayerCount(5))));
    }

    #[test]
    fn generator_yields_batches() {
        let targets = parse_targets(&["catching,normal".to_string()], true).unwrap();
        let gen_opts = GeneratorOptions {
            min_fillings: 1,
            max_fillings: 2,
            num_players: 1,
            strict_type_sharing: true,
        };
        let mcts_opts = MctsOptions {
            exploration_constant: 1.4,
            max_walltime_ms: 5,
            rollout_policy: RolloutPolicyKind::Uniform,
        };
        let mut generator =
            RecipeGenerator::with_seed(targets, 2, gen_opts, mcts_opts, 7).unwrap();
        let first = generator.next();
        assert!(first.is_some());
    }
}
