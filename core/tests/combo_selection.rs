//! Selector properties: optimality against brute force, conflict
//! freedom, and selection drawn only from satisfied combos.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::HashSet;
use valuation_core::{
    account::Account,
    catalog::{ComboRule, RequiredChar, RuleCatalog},
    combo_selection::{satisfied_combos, select_best_combos},
};

const POOL: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

fn random_combos(rng: &mut Pcg64Mcg, count: usize) -> Vec<ComboRule> {
    (0..count)
        .map(|i| {
            let width = rng.gen_range(1..=3);
            let required_chars = POOL
                .choose_multiple(rng, width)
                .map(|name| RequiredChar { name: (*name).into(), min_const: 0, max_const: 6 })
                .collect();
            ComboRule {
                name: format!("combo-{i}"),
                // Whole tens keep every subset sum exact.
                value: f64::from(rng.gen_range(1..=20u32) * 10),
                required_chars,
            }
        })
        .collect()
}

fn conflicts(a: &ComboRule, b: &ComboRule) -> bool {
    a.required_chars.iter().any(|req| b.requires(&req.name))
}

fn brute_force_best(combos: &[ComboRule]) -> f64 {
    let n = combos.len();
    let mut best = 0.0;
    for mask in 0u32..(1 << n) {
        let chosen: Vec<&ComboRule> = (0..n)
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| &combos[i])
            .collect();
        let conflict_free = chosen
            .iter()
            .enumerate()
            .all(|(i, a)| chosen[i + 1..].iter().all(|b| !conflicts(a, b)));
        if conflict_free {
            let total: f64 = chosen.iter().map(|c| c.value).sum();
            if total > best {
                best = total;
            }
        }
    }
    best
}

#[test]
fn selector_matches_brute_force_on_small_catalogs() {
    let mut rng = Pcg64Mcg::seed_from_u64(0x5E1E_C702);

    for round in 0..200 {
        let count = rng.gen_range(0..=10);
        let combos = random_combos(&mut rng, count);
        let refs: Vec<&ComboRule> = combos.iter().collect();

        let selection = select_best_combos(&refs);
        let expected = brute_force_best(&combos);

        assert_eq!(
            selection.total_value, expected,
            "round {round}: selector found {} but brute force found {expected}",
            selection.total_value
        );

        let reported: f64 = selection.combos.iter().map(|c| c.value).sum();
        assert_eq!(reported, selection.total_value, "round {round}: selection does not add up");
    }
}

#[test]
fn selection_is_always_conflict_free() {
    let mut rng = Pcg64Mcg::seed_from_u64(42);

    for round in 0..200 {
        let count = rng.gen_range(1..=12);
        let combos = random_combos(&mut rng, count);
        let refs: Vec<&ComboRule> = combos.iter().collect();
        let selection = select_best_combos(&refs);

        let mut claimed = HashSet::new();
        for combo in &selection.combos {
            for req in &combo.required_chars {
                assert!(
                    claimed.insert(req.name.clone()),
                    "round {round}: '{}' claimed twice",
                    req.name
                );
            }
        }
    }
}

#[test]
fn satisfied_filter_checks_presence_and_range() {
    let catalog = RuleCatalog::default_test();

    // Cyra at C6 is outside the 2..=5 range of the Aria/Cyra/Eira combo.
    let account = Account::new()
        .with_character("Aria", 6)
        .with_character("Bram", 6)
        .with_character("Cyra", 6)
        .with_character("Eira", 3);
    let names: Vec<&str> = satisfied_combos(&account, &catalog)
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["C6 Aria + C6 Bram"]);

    let missing = Account::new().with_character("Aria", 6);
    assert!(satisfied_combos(&missing, &catalog).is_empty());
}

#[test]
fn selection_is_a_subset_of_satisfied_combos() {
    let catalog = RuleCatalog::default_test();
    let account = Account::new()
        .with_character("Aria", 6)
        .with_character("Bram", 6)
        .with_character("Cyra", 2)
        .with_character("Dax", 4)
        .with_character("Eira", 2);

    let satisfied = satisfied_combos(&account, &catalog);
    assert_eq!(satisfied.len(), 3);

    let selection = select_best_combos(&satisfied);
    // 500 (Aria+Bram) + 80 (Dax+Eira) beats 300 (Aria+Cyra+Eira).
    assert_eq!(selection.total_value, 580.0);
    for combo in &selection.combos {
        assert!(satisfied.iter().any(|s| s.name == combo.name));
    }
}
