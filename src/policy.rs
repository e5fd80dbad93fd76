use crate::error::PicnicError;
use crate::state::{Action, SandwichState};
use rand::{Rng, RngCore};
use std::collections::HashSet;

/// pure `state -> action` policy used to drive rollouts to a terminal state.
/// `rng` is a trait object (`dyn RngCore`, which still gets every `Rng`
/// method through its blanket impl) rather than `impl Rng`, so this trait
/// stays object-safe and can be boxed as `Box<dyn RolloutPolicy>`.
pub trait RolloutPolicy {
    fn choose(&self, state: &SandwichState, actions: &[Action], rng: &mut dyn RngCore) -> Action;
}

pub struct Uniform;

impl RolloutPolicy for Uniform {
    fn choose(&self, _state: &SandwichState, actions: &[Action], rng: &mut dyn RngCore) -> Action {
        actions[rng.random_range(0..actions.len())]
    }
}

pub struct StopBiased {
    p: f64,
}

impl StopBiased {
    pub fn new(p: f64) -> Result<StopBiased, PicnicError> {
        if p > 0.0 && p <= 1.0 {
            Ok(StopBiased { p })
        } else {
            Err(PicnicError::InvalidProbability { value: p })
        }
    }
}

impl RolloutPolicy for StopBiased {
    fn choose(&self, _state: &SandwichState, actions: &[Action], rng: &mut dyn RngCore) -> Action {
        let n = actions.len();
        let finish_pos = actions.iter().position(|a| *a == Action::FinishSandwich);
        let Some(finish_pos) = finish_pos else {
            return actions[rng.random_range(0..n)];
        };

        let finish_weight = self.p / (1.0 - self.p) * (n as f64 - 1.0).max(0.0);
        let total: f64 = finish_weight + (n - 1) as f64;
        let mut draw = rng.random::<f64>() * total;
        for (i, _) in actions.iter().enumerate() {
            let weight = if i == finish_pos { finish_weight } else { 1.0 };
            if draw < weight {
                return actions[i];
            }
            draw -= weight;
        }
        actions[finish_pos]
    }
}

pub struct SlotWeighted {
    p: f64,
}

impl SlotWeighted {
    pub fn new(p: f64) -> Result<SlotWeighted, PicnicError> {
        if p > 0.0 && p < 1.0 {
            Ok(SlotWeighted { p })
        } else {
            Err(PicnicError::InvalidProbability { value: p })
        }
    }
}

impl RolloutPolicy for SlotWeighted {
    fn choose(&self, state: &SandwichState, actions: &[Action], rng: &mut dyn RngCore) -> Action {
        let base_chosen = state.recipe().num_condiments() == 0 && state.recipe().num_fillings() == 0;
        if base_chosen {
            return actions[rng.random_range(0..actions.len())];
        }

        let num_fillings = state.recipe().num_fillings();
        let num_condiments = state.recipe().num_condiments();
        let max_fillings = 6;
        let max_condiments = 4;
        let free = (max_fillings + max_condiments - num_fillings - num_condiments).max(1) as f64;

        let finish_present = actions.iter().any(|a| *a == Action::FinishSandwich);
        let w_finish = if finish_present { 100.0 * self.p } else { 0.0 };
        let remaining = 100.0 - w_finish;
        let w_filling_type = remaining * (max_fillings - num_fillings).max(0) as f64 / free;
        let w_condiment_type = remaining * (max_condiments - num_condiments).max(0) as f64 / free;

        let filling_actions: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| matches!(a, Action::SelectFilling(_)))
            .map(|(i, _)| i)
            .collect();
        let condiment_actions: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| matches!(a, Action::SelectCondiment(_)))
            .map(|(i, _)| i)
            .collect();

        let mut weights = vec![0.0; actions.len()];
        if finish_present {
            if let Some(pos) = actions.iter().position(|a| *a == Action::FinishSandwich) {
                weights[pos] = w_finish;
            }
        }
        if !filling_actions.is_empty() {
            let each = w_filling_type / filling_actions.len() as f64;
            for &i in &filling_actions {
                weights[i] = each;
            }
        }
        if !condiment_actions.is_empty() {
            let each = w_condiment_type / condiment_actions.len() as f64;
            for &i in &condiment_actions {
                weights[i] = each;
            }
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return actions[rng.random_range(0..actions.len())];
        }
        let mut draw = rng.random::<f64>() * total;
        for (i, &w) in weights.iter().enumerate() {
            if draw < w {
                return actions[i];
            }
            draw -= w;
        }
        *actions.last().unwrap()
    }
}

/// walk a state forward via `policy` until terminal, applying actions against
/// the live duplicate-suppression set so rollouts never revisit seen recipes.
pub fn rollout(
    mut state: SandwichState,
    policy: &dyn RolloutPolicy,
    seen: &HashSet<Vec<u16>>,
    rng: &mut dyn RngCore,
) -> SandwichState {
    while !state.is_terminal() {
        let actions = state.get_possible_actions(seen);
        let action = policy.choose(&state, &actions, rng);
        state = state.apply(action);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_stop_bias_probability() {
        assert!(StopBiased::new(0.0).is_err());
        assert!(StopBiased::new(1.5).is_err());
        assert!(StopBiased::new(1.0).is_ok());
    }

    #[test]
    fn rejects_invalid_slot_weight_probability() {
        assert!(SlotWeighted::new(0.0).is_err());
        assert!(SlotWeighted::new(1.0).is_err());
        assert!(SlotWeighted::new(0.5).is_ok());
    }
}
