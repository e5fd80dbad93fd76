use crate::enums::{Flavor, Power, Type};
use crate::ingredient::TABLE;
use crate::recipe::Recipe;

/// one (Power, Type, Level) slot of a computed sandwich effect. Egg effects are typeless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub power: Power,
    pub pokemon_type: Option<Type>,
    pub level: u8,
}

const SPARKLING_GATE: i32 = 2000;
const COMBO_BONUS: i32 = 100;

/// the 20-entry flavor-combo bonus table: (dominant, secondary) -> Power
fn combo_bonus(f1: Flavor, f2: Flavor) -> Option<Power> {
    use Flavor::*;
    use Power::*;
    Some(match (f1, f2) {
        (Sweet, Salty) => Egg,
        (Sweet, Sour) => Catching,
        (Sweet, Bitter) => Egg,
        (Sweet, Hot) => Raid,
        (Salty, Sweet) => Encounter,
        (Salty, Sour) => Encounter,
        (Salty, Bitter) => ExpPoint,
        (Salty, Hot) => Encounter,
        (Sour, Sweet) => Catching,
        (Sour, Salty) => Teensy,
        (Sour, Bitter) => Teensy,
        (Sour, Hot) => Teensy,
        (Bitter, Sweet) => ItemDrop,
        (Bitter, Salty) => ExpPoint,
        (Bitter, Sour) => ItemDrop,
        (Bitter, Hot) => ItemDrop,
        (Hot, Sweet) => Raid,
        (Hot, Salty) => Humungo,
        (Hot, Sour) => Humungo,
        (Hot, Bitter) => Humungo,
        _ => return None,
    })
}

/// sort indices 0..len descending by value, ties broken by ascending index (stable after negation)
fn rank_descending(values: &[i32]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[b].cmp(&values[a]).then(a.cmp(&b)));
    idx
}

fn sort_types(v0: i32, v1: i32, v2: i32) -> [usize; 3] {
    let d = v0 - v1;
    if v0 > 480 {
        return [0, 0, 0];
    }
    if v0 > 280 {
        return [0, 0, 2];
    }
    if v0 > 105 && d > 105 {
        return [0, 0, 2];
    }
    let split = if (100..=105).contains(&v0) {
        d >= 80 && v1 <= 21
    } else if (90..100).contains(&v0) {
        d >= 78 && v1 <= 16
    } else if (80..90).contains(&v0) {
        d >= 74 && v1 <= 9
    } else if (74..80).contains(&v0) {
        d >= 72 && v1 <= 5
    } else {
        false
    };
    if split {
        [0, 2, 0]
    } else {
        [0, 2, 1]
    }
}

fn compute_levels(v0: i32, v1: i32, v2: i32) -> [u8; 3] {
    if v0 < 180 {
        [1, 1, 1]
    } else if v0 <= 280 {
        if v1 >= 180 && v2 >= 180 {
            [2, 2, 1]
        } else {
            [2, 1, 1]
        }
    } else if v0 < 380 {
        if v2 >= 180 {
            [2, 2, 2]
        } else {
            [2, 2, 1]
        }
    } else if v0 < 460 {
        if v1 >= 380 && v2 >= 380 {
            [3, 3, 3]
        } else {
            [3, 3, 2]
        }
    } else {
        [3, 3, 3]
    }
}

/// pure, deterministic, infallible: malformed recipes still produce three slots,
/// callers are expected to gate on `Recipe::is_legal` before trusting the result.
pub fn evaluate(recipe: &Recipe) -> [Effect; 3] {
    let mut flavor_sum = [0i32; Flavor::COUNT];
    let mut power_sum = [0i32; Power::COUNT];
    let mut type_sum = [0i32; Type::COUNT];

    for i in recipe.ingredient_indices() {
        let ing = TABLE.get(i);
        let w = recipe.count(i) as i32 * ing.pieces;
        for f in 0..Flavor::COUNT {
            flavor_sum[f] += w * ing.flavor[f];
        }
        for p in 0..Power::COUNT {
            power_sum[p] += w * ing.power[p];
        }
        for t in 0..Type::COUNT {
            type_sum[t] += w * ing.pokemon_type[t];
        }
    }

    let flavor_rank = rank_descending(&flavor_sum);
    let f1 = Flavor::ALL[flavor_rank[0]];
    let f2 = Flavor::ALL[flavor_rank[1]];
    if let Some(bonus_power) = combo_bonus(f1, f2) {
        power_sum[bonus_power as usize] += COMBO_BONUS;
    }

    if power_sum[Power::Sparkling as usize] < SPARKLING_GATE {
        power_sum[Power::Sparkling as usize] = 0;
    }

    let power_rank = rank_descending(&power_sum);
    let top_powers = [power_rank[0], power_rank[1], power_rank[2]];

    let type_rank = rank_descending(&type_sum);
    let (t0, t1, t2) = (type_rank[0], type_rank[1], type_rank[2]);
    let (v0, v1, v2) = (type_sum[t0], type_sum[t1], type_sum[t2]);
    let order = sort_types(v0, v1, v2);
    let sorted_types = [
        [t0, t1, t2][order[0]],
        [t0, t1, t2][order[1]],
        [t0, t1, t2][order[2]],
    ];
    let levels = compute_levels(v0, v1, v2);

    let mut effects = [Effect {
        power: Power::Egg,
        pokemon_type: None,
        level: 1,
    }; 3];
    for slot in 0..3 {
        let power = Power::ALL[top_powers[slot]];
        let pokemon_type = if power == Power::Egg {
            None
        } else {
            Some(Type::ALL[sorted_types[slot]])
        };
        effects[slot] = Effect {
            power,
            pokemon_type,
            level: levels[slot],
        };
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::TABLE;

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

    fn tuple(e: &Effect) -> (Power, Option<Type>, u8) {
        (e.power, e.pokemon_type, e.level)
    }

    #[test]
    fn seed_scenario_1() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::Title, Some(Type::Normal), 3),
                (Power::Humungo, Some(Type::Normal), 3),
                (Power::ItemDrop, Some(Type::Flying), 3),
            ]
        );
    }

    #[test]
    fn seed_scenario_2() {
        let r = recipe_of(&[("Rice", 4), ("Bitter Herba Mystica", 1)]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::Title, Some(Type::Normal), 2),
                (Power::ItemDrop, Some(Type::Normal), 2),
                (Power::Humungo, Some(Type::Flying), 2),
            ]
        );
    }

    #[test]
    fn seed_scenario_3() {
        let r = recipe_of(&[
            ("Herbed Sausage", 2),
            ("Rice", 2),
            ("Horseradish", 1),
            ("Spicy Herba Mystica", 1),
        ]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::Title, Some(Type::Fighting), 3),
                (Power::Humungo, Some(Type::Fighting), 3),
                (Power::Encounter, Some(Type::Ground), 2),
            ]
        );
    }

    #[test]
    fn seed_scenario_4() {
        let r = recipe_of(&[("Rice", 6), ("Wasabi", 2), ("Curry Powder", 2)]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::Encounter, Some(Type::Fire), 2),
                (Power::Humungo, Some(Type::Grass), 2),
                (Power::Raid, Some(Type::Water), 1),
            ]
        );
    }

    #[test]
    fn seed_scenario_5_type_split() {
        let r = recipe_of(&[("Hamburger", 5), ("Butter", 1)]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::ExpPoint, Some(Type::Steel), 1),
                (Power::Encounter, Some(Type::Ghost), 1),
                (Power::Catching, Some(Type::Steel), 1),
            ]
        );
    }

    #[test]
    fn seed_scenario_6_type_split() {
        let r = recipe_of(&[("Prosciutto", 4), ("Ketchup", 1)]);
        let effects = evaluate(&r);
        assert_eq!(
            effects.map(|e| tuple(&e)),
            [
                (Power::Encounter, Some(Type::Flying), 1),
                (Power::Catching, Some(Type::Normal), 1),
                (Power::ExpPoint, Some(Type::Flying), 1),
            ]
        );
    }

    #[test]
    fn levels_non_increasing() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let effects = evaluate(&r);
        assert!(effects[0].level >= effects[1].level);
        assert!(effects[1].level >= effects[2].level);
    }

    #[test]
    fn powers_pairwise_distinct() {
        let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
        let effects = evaluate(&r);
        assert_ne!(effects[0].power, effects[1].power);
        assert_ne!(effects[1].power, effects[2].power);
        assert_ne!(effects[0].power, effects[2].power);
    }

    #[test]
    fn boundary_levels_upper_branch() {
        assert_eq!(compute_levels(180, 0, 0), [2, 1, 1]);
        assert_eq!(compute_levels(280, 280, 280), [2, 2, 1]);
        assert_eq!(compute_levels(380, 0, 0), [3, 3, 2]);
        assert_eq!(compute_levels(460, 0, 0), [3, 3, 3]);
        assert_eq!(compute_levels(480, 0, 0), [3, 3, 3]);
    }

    #[test]
    fn boundary_105_105_triggers_split() {
        // v0 = 105, d = 105 => v1 = 0: 100 <= v0 <= 105, d >= 80, v1 <= 21 all hold.
        // see DESIGN.md for why this differs from a conflicting prose summary elsewhere.
        let order = sort_types(105, 0, 0);
        assert_eq!(order, [0, 2, 0]);
    }

    #[test]
    fn boundary_105_24_does_not_trigger_split() {
        // v0 = 105, v1 = 24 (d = 81): d >= 80 holds but v1 <= 21 fails, so no split.
        let order = sort_types(105, 24, 0);
        assert_eq!(order, [0, 2, 1]);
    }
}
