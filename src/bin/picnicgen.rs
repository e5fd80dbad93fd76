//! Recipe Search Binary
//!
//! Runs MCTS over the picnic sandwich-construction state space against a small
//! set of desired meal-power effects, writing every discovered recipe to CSV.

use clap::Parser;
use picnicgen::{GeneratorOptions, MctsOptions, PicnicError, Recipe, RolloutPolicyKind};
use std::io::Write as _;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// up to three targets of the form `<power>,<type>`, or `egg` alone
    #[arg(required = true, num_args = 1..=3)]
    targets: Vec<String>,

    /// MCTS descents to run (one terminal recipe batch per descent)
    #[arg(long, default_value_t = 200)]
    num_iter: usize,

    /// rollout policy used to finish a recipe once expansion stops
    #[arg(long, value_enum, default_value_t = RolloutArg::Uniform)]
    rollout_policy: RolloutArg,

    /// bias toward stopping early in the stop-biased rollout policy
    #[arg(long, default_value_t = 0.3)]
    stop_bias_p: f64,

    /// bias toward filling slots in the slot-weighted rollout policy
    #[arg(long, default_value_t = 0.7)]
    slot_weight_p: f64,

    /// UCT exploration constant
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    exploration_constant: f64,

    /// wall-clock budget per MCTS descent, in milliseconds
    #[arg(long, default_value_t = 200)]
    max_walltime: u64,

    /// number of picnic participants (widens filling/condiment bounds)
    #[arg(long, default_value_t = 1)]
    num_players: u8,

    /// minimum fillings before a condiment may be added
    #[arg(long, default_value_t = 1)]
    min_fillings: u8,

    /// maximum fillings per recipe
    #[arg(long, default_value_t = 6)]
    max_fillings: u8,

    /// reject three same-typed non-egg, non-sparkling targets as unreachable
    #[arg(long, default_value_t = true)]
    strict_type_sharing: bool,

    /// fan search out across independent trees via rayon
    #[cfg(feature = "parallel")]
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// number of independent trees to run when `--parallel` is set
    #[cfg(feature = "parallel")]
    #[arg(long, default_value_t = 4)]
    num_trees: usize,

    /// output CSV path; defaults to stdout
    #[arg(long)]
    out: Option<String>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RolloutArg {
    Uniform,
    StopBiased,
    SlotWeighted,
}

#[derive(serde::Serialize)]
struct ResultRow {
    effect1: String,
    effect2: String,
    effect3: String,
    condiment1: String,
    condiment2: String,
    condiment3: String,
    condiment4: String,
    filling1: String,
    filling2: String,
    filling3: String,
    filling4: String,
    filling5: String,
    filling6: String,
    score: f64,
}

fn row_of(recipe: &Recipe, targets: &picnicgen::TargetSet, num_players: i32) -> ResultRow {
    let effects = picnicgen::evaluate(recipe);
    let mut effect_strs = effects.iter().map(|e| match e.pokemon_type {
        Some(t) => format!("{}:{}:{}", e.power.name(), t.name(), e.level),
        None => format!("{}::{}", e.power.name(), e.level),
    });

    let condiments: Vec<&str> = recipe
        .ingredient_indices()
        .filter(|&i| picnicgen::ingredient::TABLE.get(i).is_condiment)
        .flat_map(|i| std::iter::repeat(picnicgen::ingredient::TABLE.name(i)).take(recipe.count(i) as usize))
        .collect();
    let fillings: Vec<&str> = recipe
        .ingredient_indices()
        .filter(|&i| picnicgen::ingredient::TABLE.get(i).is_filling())
        .flat_map(|i| std::iter::repeat(picnicgen::ingredient::TABLE.name(i)).take(recipe.count(i) as usize))
        .collect();

    let at = |v: &[&str], i: usize| v.get(i).map(|s| s.to_string()).unwrap_or_default();
    ResultRow {
        effect1: effect_strs.next().unwrap_or_default(),
        effect2: effect_strs.next().unwrap_or_default(),
        effect3: effect_strs.next().unwrap_or_default(),
        condiment1: at(&condiments, 0),
        condiment2: at(&condiments, 1),
        condiment3: at(&condiments, 2),
        condiment4: at(&condiments, 3),
        filling1: at(&fillings, 0),
        filling2: at(&fillings, 1),
        filling3: at(&fillings, 2),
        filling4: at(&fillings, 3),
        filling5: at(&fillings, 4),
        filling6: at(&fillings, 5),
        score: picnicgen::score(recipe, targets, num_players),
    }
}

fn run(cli: Cli) -> Result<(), PicnicError> {
    let targets = picnicgen::parse_targets(&cli.targets, cli.strict_type_sharing)?;

    let generator_options = GeneratorOptions {
        min_fillings: cli.min_fillings,
        max_fillings: cli.max_fillings,
        num_players: cli.num_players,
        strict_type_sharing: cli.strict_type_sharing,
    }
    .validate()?;

    let rollout_policy = match cli.rollout_policy {
        RolloutArg::Uniform => RolloutPolicyKind::Uniform,
        RolloutArg::StopBiased => RolloutPolicyKind::StopBiased(cli.stop_bias_p),
        RolloutArg::SlotWeighted => RolloutPolicyKind::SlotWeighted(cli.slot_weight_p),
    };
    let mcts_options = MctsOptions {
        exploration_constant: cli.exploration_constant,
        max_walltime_ms: cli.max_walltime,
        rollout_policy,
    };

    log::info!("searching for targets: {:?}", targets.serialize());

    #[cfg(feature = "parallel")]
    let recipes: Vec<Recipe> = if cli.parallel {
        picnicgen::generate_parallel(
            targets.clone(),
            cli.num_iter,
            cli.num_trees,
            generator_options,
            mcts_options,
        )?
    } else {
        let generator = picnicgen::RecipeGenerator::new(
            targets.clone(),
            cli.num_iter,
            generator_options,
            mcts_options,
        )?;
        generator.flatten().collect()
    };

    #[cfg(not(feature = "parallel"))]
    let recipes: Vec<Recipe> = {
        let generator = picnicgen::RecipeGenerator::new(
            targets.clone(),
            cli.num_iter,
            generator_options,
            mcts_options,
        )?;
        generator.flatten().collect()
    };

    log::info!("discovered {} distinct recipes", recipes.len());

    let mut recipes = recipes;
    recipes.sort_by(|a, b| {
        let score_a = picnicgen::score(a, &targets, cli.num_players as i32);
        let score_b = picnicgen::score(b, &targets, cli.num_players as i32);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.num_fillings().cmp(&b.num_fillings()))
            .then(a.total_pieces().cmp(&b.total_pieces()))
            .then(a.num_condiments().cmp(&b.num_condiments()))
    });

    let rows: Vec<ResultRow> = recipes
        .iter()
        .map(|r| row_of(r, &targets, cli.num_players as i32))
        .collect();

    let buffer: Vec<u8> = Vec::new();
    let mut writer = csv::Writer::from_writer(buffer);
    for row in &rows {
        writer
            .serialize(row)
            .map_err(|e| PicnicError::InvariantViolation(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PicnicError::InvariantViolation(e.to_string()))?;

    match cli.out {
        Some(path) => {
            std::fs::write(&path, &bytes)
                .map_err(|e| PicnicError::InvariantViolation(e.to_string()))?;
        }
        None => {
            std::io::stdout()
                .write_all(&bytes)
                .map_err(|e| PicnicError::InvariantViolation(e.to_string()))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    picnicgen::init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
