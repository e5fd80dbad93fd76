pub mod enums;
pub mod error;
pub mod evaluate;
pub mod generator;
pub mod ingredient;
pub mod mcts;
pub mod policy;
pub mod recipe;
pub mod reward;
pub mod state;
pub mod target;
pub mod tree;

pub use error::{PicnicError, Result};
pub use evaluate::{evaluate, Effect};
pub use generator::{GeneratorOptions, MctsOptions, RecipeGenerator, RolloutPolicyKind};
#[cfg(feature = "parallel")]
pub use generator::generate_parallel;
pub use recipe::Recipe;
pub use reward::score;
pub use target::{parse_targets, Target, TargetSet};

/// initialize the `env_logger` subscriber. library code only ever logs through
/// the `log` facade; only the binary entry point calls this.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
