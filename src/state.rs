use crate::ingredient::TABLE;
use crate::recipe::Recipe;
use crate::reward;
use crate::target::TargetSet;
use std::collections::HashSet;

/// tagged union of the four legal moves in recipe construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectBaseRecipe(usize, usize),
    SelectCondiment(usize),
    SelectFilling(usize),
    FinishSandwich,
}

/// recipe-construction state machine: Empty -> Building -> Terminal.
/// the sole implementation of the MCTS `State` contract (see `crate::mcts::State`).
#[derive(Debug, Clone)]
pub struct SandwichState {
    recipe: Recipe,
    targets: TargetSet,
    min_fillings: i32,
    max_fillings: i32,
    max_condiments: i32,
    num_players: i32,
    is_finished: bool,
    reward: Option<f64>,
}

impl SandwichState {
    pub fn new(
        targets: TargetSet,
        min_fillings: i32,
        max_fillings: i32,
        max_condiments: i32,
        num_players: i32,
    ) -> SandwichState {
        SandwichState {
            recipe: Recipe::empty(),
            targets,
            min_fillings,
            max_fillings,
            max_condiments,
            num_players,
            is_finished: false,
            reward: None,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    fn single_ingredient_cap(&self) -> i32 {
        if self.num_players <= 1 {
            crate::recipe::SINGLE_INGREDIENT_CAP_SOLO
        } else {
            crate::recipe::SINGLE_INGREDIENT_CAP_GROUP
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_finished
            || (self.recipe.num_fillings() == self.max_fillings
                && self.recipe.num_condiments() == self.max_condiments)
    }

    fn would_duplicate(&self, ingredient: usize, seen: &HashSet<Vec<u16>>) -> bool {
        let mut candidate = self.recipe.clone();
        candidate.add(ingredient);
        seen.contains(&candidate.canonical_key())
    }

    pub fn get_possible_actions(&self, seen: &HashSet<Vec<u16>>) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        let empty = self.recipe.num_condiments() == 0 && self.recipe.num_fillings() == 0;
        if empty {
            let wants_title = self.targets.has_power(crate::enums::Power::Title)
                || self.targets.has_power(crate::enums::Power::Sparkling);
            let condiments: Vec<usize> = if wants_title {
                TABLE.herba_mystica().collect()
            } else {
                TABLE
                    .condiments()
                    .filter(|&i| !TABLE.get(i).is_herba_mystica)
                    .collect()
            };
            let fillings: Vec<usize> = TABLE.fillings().collect();
            let mut actions = Vec::with_capacity(condiments.len() * fillings.len());
            for &c in &condiments {
                for &f in &fillings {
                    actions.push(Action::SelectBaseRecipe(c, f));
                }
            }
            return actions;
        }

        if self.targets.has_power(crate::enums::Power::Sparkling) && self.recipe.num_condiments() == 1 {
            return TABLE
                .herba_mystica()
                .map(Action::SelectCondiment)
                .collect();
        }

        let mut actions = Vec::new();
        let cap = self.single_ingredient_cap();

        if self.recipe.num_fillings() < self.max_fillings {
            for f in TABLE.fillings() {
                let next_count = self.recipe.count(f) as i32 + 1;
                if next_count * TABLE.get(f).pieces > cap {
                    continue;
                }
                if self.would_duplicate(f, seen) {
                    continue;
                }
                actions.push(Action::SelectFilling(f));
            }
        }

        if self.recipe.num_fillings() >= self.min_fillings {
            for c in TABLE.condiments() {
                if TABLE.get(c).is_herba_mystica {
                    continue;
                }
                if self.recipe.num_condiments() >= self.max_condiments {
                    continue;
                }
                if self.would_duplicate(c, seen) {
                    continue;
                }
                actions.push(Action::SelectCondiment(c));
            }
            actions.push(Action::FinishSandwich);
        }

        if actions.is_empty() {
            actions.push(Action::FinishSandwich);
        }

        actions
    }

    /// deep-copy and apply: the parent remains untouched, matching the reference's
    /// clone-on-move semantics.
    pub fn apply(&self, action: Action) -> SandwichState {
        let mut next = self.clone();
        next.reward = None;
        match action {
            Action::SelectBaseRecipe(c, f) => {
                next.recipe.add(c);
                next.recipe.add(f);
            }
            Action::SelectCondiment(c) => next.recipe.add(c),
            Action::SelectFilling(f) => next.recipe.add(f),
            Action::FinishSandwich => next.is_finished = true,
        }
        next
    }

    pub fn reward(&mut self) -> f64 {
        if let Some(r) = self.reward {
            return r;
        }
        let r = reward::score(&self.recipe, &self.targets, self.num_players);
        self.reward = Some(r);
        r
    }
}
