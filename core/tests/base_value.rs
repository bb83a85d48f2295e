use valuation_core::{
    account::Account,
    base_value::calculate_base_value,
    catalog::RuleCatalog,
    combo_selection::{satisfied_combos, select_best_combos},
    report::{Adjustment, BaseValueRecord, Bucket, ItemKind},
};

fn value(account: &Account) -> BaseValueRecord {
    let catalog = RuleCatalog::default_test();
    let selection = select_best_combos(&satisfied_combos(account, &catalog));
    calculate_base_value(account, &catalog, &selection)
}

#[test]
fn missing_specialized_weapon_costs_twenty_percent() {
    let without = value(&Account::new().with_character("Cyra", 3));
    let cyra = without.item(ItemKind::Character, "Cyra").unwrap();
    assert_eq!(cyra.value, 48.0);
    assert_eq!(cyra.adjustments, vec![Adjustment::NoSpecializedWeapon { factor: 0.8 }]);
    assert_eq!(without.applicable, 48.0);

    let with = value(
        &Account::new()
            .with_character("Cyra", 3)
            .with_weapon("Tidecaller", 1),
    );
    assert_eq!(with.item(ItemKind::Character, "Cyra").unwrap().value, 60.0);
    assert_eq!(with.applicable, 65.0);
}

#[test]
fn low_constellations_are_never_penalized() {
    let record = value(&Account::new().with_character("Cyra", 1));
    let cyra = record.item(ItemKind::Character, "Cyra").unwrap();
    assert_eq!(cyra.value, 10.0);
    assert!(cyra.adjustments.is_empty());
}

#[test]
fn penalty_applies_to_exempt_c6_characters_too() {
    let record = value(&Account::new().with_character("Aria", 6));
    let aria = record.item(ItemKind::Character, "Aria").unwrap();
    assert_eq!(aria.bucket, Bucket::Exempt);
    assert_eq!(aria.value, 400.0);
    assert_eq!(record.exempt, 400.0);
    assert_eq!(record.applicable, 0.0);
}

#[test]
fn c6_characters_are_always_exempt() {
    for constellation in 0..=6u8 {
        let record = value(
            &Account::new()
                .with_character("Aria", constellation)
                .with_weapon("Dawnbreaker", 1),
        );
        let aria = record.item(ItemKind::Character, "Aria").unwrap();
        let expected = if constellation == 6 { Bucket::Exempt } else { Bucket::Applicable };
        assert_eq!(aria.bucket, expected, "Aria at C{constellation}");
    }
}

#[test]
fn r5_weapon_of_non_c6_owner_is_priced_at_r4() {
    let record = value(
        &Account::new()
            .with_character("Aria", 5)
            .with_weapon("Dawnbreaker", 5),
    );
    let weapon = record.item(ItemKind::Weapon, "Dawnbreaker").unwrap();
    assert_eq!(weapon.value, 20.0);
    assert_eq!(weapon.bucket, Bucket::Applicable);
    assert_eq!(weapon.adjustments, vec![Adjustment::RepricedAtR4 { owner: "Aria".into() }]);
}

#[test]
fn r5_weapon_without_owner_in_account_is_priced_at_r4() {
    let record = value(&Account::new().with_weapon("Ironbloom", 5));
    assert_eq!(record.item(ItemKind::Weapon, "Ironbloom").unwrap().value, 20.0);
}

#[test]
fn c6_owner_makes_weapon_exempt_without_any_combo() {
    let record = value(
        &Account::new()
            .with_character("Aria", 6)
            .with_weapon("Dawnbreaker", 5),
    );
    let weapon = record.item(ItemKind::Weapon, "Dawnbreaker").unwrap();
    assert_eq!(weapon.value, 250.0, "no combo selected, so no doubling");
    assert_eq!(weapon.bucket, Bucket::Exempt);
    assert_eq!(record.exempt, 750.0);
}

#[test]
fn combo_c6_members_double_their_r5_weapons() {
    let record = value(
        &Account::new()
            .with_character("Aria", 6)
            .with_character("Bram", 6)
            .with_weapon("Dawnbreaker", 5)
            .with_weapon("Ironbloom", 5),
    );
    assert_eq!(record.item(ItemKind::Weapon, "Dawnbreaker").unwrap().value, 500.0);
    assert_eq!(record.item(ItemKind::Weapon, "Ironbloom").unwrap().value, 300.0);
    assert_eq!(record.exempt, 500.0 + 400.0 + 500.0 + 300.0);
    assert_eq!(record.applicable, 0.0);
}

#[test]
fn hot_c6_weapon_doubles_only_when_a_combo_was_selected() {
    let alone = value(
        &Account::new()
            .with_character("Dax", 6)
            .with_weapon("Emberfang", 5),
    );
    assert_eq!(alone.item(ItemKind::Weapon, "Emberfang").unwrap().value, 150.0);

    // Dax + Eira satisfies a combo, so the hot C6 rule kicks in.
    let with_combo = value(
        &Account::new()
            .with_character("Dax", 6)
            .with_character("Eira", 2)
            .with_weapon("Emberfang", 5)
            .with_weapon("Frostwhisper", 1),
    );
    let weapon = with_combo.item(ItemKind::Weapon, "Emberfang").unwrap();
    assert_eq!(weapon.value, 300.0);
    assert_eq!(
        weapon.adjustments,
        vec![Adjustment::PremiumC6Doubled { owner: "Dax".into() }]
    );
}

#[test]
fn refinement_below_five_is_never_adjusted() {
    let record = value(
        &Account::new()
            .with_character("Aria", 6)
            .with_character("Bram", 6)
            .with_weapon("Dawnbreaker", 4),
    );
    let weapon = record.item(ItemKind::Weapon, "Dawnbreaker").unwrap();
    assert_eq!(weapon.value, 20.0);
    assert!(weapon.adjustments.is_empty());
}
