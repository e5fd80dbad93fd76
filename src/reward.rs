use crate::evaluate::evaluate;
use crate::recipe::Recipe;
use crate::target::TargetSet;

/// `growth_factor` chosen so an all-level-3 match on three targets yields reward
/// 300 exactly: `2^(growth_factor * 2) = 300` at level 3 -> growth_factor = log2(300)/2.
fn growth_factor() -> f64 {
    300f64.log2() / 2.0
}

/// score a completed recipe against a target set: 0 for illegal or no-match recipes,
/// a fraction in `[0, 1)` for a partial match, and an exponential level bonus in
/// `[1, 300]` for a full match. shared by `SandwichState::reward` (live, memoized
/// during search) and any caller scoring an already-finished `Recipe` (e.g. the CLI).
pub fn score(recipe: &Recipe, targets: &TargetSet, num_players: i32) -> f64 {
    if !recipe.is_legal(num_players) {
        return 0.0;
    }

    let effects = evaluate(recipe);
    let matched = targets.matches(&effects);
    let base = matched.len() as f64 / targets.len() as f64;
    if base < 1.0 {
        return base;
    }

    let matched_levels: Vec<u8> = targets
        .targets()
        .iter()
        .enumerate()
        .filter(|(i, _)| matched.contains(i))
        .filter_map(|(_, t)| effects.iter().find(|e| e.power == t.power).map(|e| e.level))
        .collect();

    let mean_level = matched_levels.iter().map(|&l| l as f64).sum::<f64>() / matched_levels.len() as f64;
    2f64.powf(growth_factor() * (mean_level - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::TABLE;
    use crate::target::parse_targets;

    fn recipe_of(items: &[(&str, u16)]) -> Recipe {
        let mut r = Recipe::empty();
        for &(name, count) in items {
            let idx = TABLE.index_of(name).unwrap();
            for _ in 0..count {
                r.add(idx);
            }
        }
        r
    }

    #[test]
    fn full_three_target_match_scores_300() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let targets = parse_targets(
            &[
                "title,normal".to_string(),
                "humungo,normal".to_string(),
                "item_drop,flying".to_string(),
            ],
            true,
        )
        .unwrap();
        let s = score(&r, &targets, 1);
        assert!((s - 300.0).abs() < 1e-3);
    }

    #[test]
    fn partial_two_target_match_scores_half() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let targets = parse_targets(
            &["title,normal".to_string(), "catching,fire".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(score(&r, &targets, 1), 0.5);
    }

    #[test]
    fn no_match_scores_zero() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let targets = parse_targets(&["catching,fire".to_string()], true).unwrap();
        assert_eq!(score(&r, &targets, 1), 0.0);
    }

    #[test]
    fn monotone_in_level() {
        let low = recipe_of(&[("Rice", 1), ("Ketchup", 1)]);
        let targets = parse_targets(&["humungo,normal".to_string()], true).unwrap();
        let low_score = score(&low, &targets, 1);
        assert!(low_score <= 1.0 || low_score == 0.0);
    }
}
