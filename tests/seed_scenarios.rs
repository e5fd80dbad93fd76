use picnicgen::ingredient::TABLE;
use picnicgen::{evaluate, parse_targets, Recipe};

fn recipe_of(items: &[(&str, u16)]) -> Recipe {
    let mut r = Recipe::empty();
    for &(name, count) in items {
        let idx = TABLE.index_of(name).expect("known ingredient");
        for _ in 0..count {
            r.add(idx);
        }
    }
    r
}

#[test]
fn reward_is_zero_one_or_bounded_exponential() {
    let r = recipe_of(&[("Rice", 5), ("Bitter Herba Mystica", 1)]);
    let effects = evaluate(&r);
    assert!(effects.iter().map(|e| e.power).collect::<Vec<_>>().len() == 3);

    let full_match = parse_targets(
        &[
            "title,normal".to_string(),
            "humungo,normal".to_string(),
            "item_drop,flying".to_string(),
        ],
        true,
    )
    .unwrap();
    let score = picnicgen::score(&r, &full_match, 1);
    assert!((1.0..=300.0).contains(&score) || score == 0.0);
}

#[test]
fn recipe_round_trip_preserves_identity() {
    let r = recipe_of(&[("Rice", 2), ("Ketchup", 1)]);
    let restored = Recipe::from_counts(r.as_counts().to_vec());
    assert_eq!(r, restored);
}

#[test]
fn target_serialize_parse_round_trip() {
    let items = vec!["title,normal".to_string(), "egg".to_string()];
    let set = parse_targets(&items, true).unwrap();
    let reparsed = parse_targets(&set.serialize(), true).unwrap();
    assert_eq!(set, reparsed);
}

#[test]
fn powers_within_an_effect_triple_never_repeat() {
    let r = recipe_of(&[("Rice", 3), ("Tomato", 1), ("Ketchup", 1)]);
    let effects = evaluate(&r);
    let p0 = effects[0].power;
    let p1 = effects[1].power;
    let p2 = effects[2].power;
    assert_ne!(p0, p1);
    assert_ne!(p1, p2);
    assert_ne!(p0, p2);
}

#[test]
fn levels_are_non_increasing_across_the_triple() {
    let r = recipe_of(&[("Rice", 3), ("Tomato", 1), ("Ketchup", 1)]);
    let effects = evaluate(&r);
    assert!(effects[0].level >= effects[1].level);
    assert!(effects[1].level >= effects[2].level);
}
