//! Special bonuses keyed off the winning combo selection.
//!
//! RULE: Nothing here fires unless at least one combo was selected.
//!
//!   - Each winning combo with a C6 requirement earns a bonus for the
//!     special characters it requires that the account holds at C2..=C5:
//!     three or more pays the trio bonus, exactly two the pair bonus.
//!   - Every hot character held at C6 earns the hot C6 bonus once.

use crate::{
    account::Account,
    catalog::{ComboRule, RuleCatalog},
    report::{ComboSelection, SpecialAward, SpecialBonusRecord},
    types::MAX_CONSTELLATION,
};

pub fn apply_special_bonuses(
    account: &Account,
    catalog: &RuleCatalog,
    selection: &ComboSelection,
) -> SpecialBonusRecord {
    let mut record = SpecialBonusRecord::default();
    if selection.is_empty() {
        return record;
    }
    let params = catalog.params();

    for combo in &selection.combos {
        if !combo.requires_max_constellation() {
            continue;
        }
        let count = special_characters_in(combo, account, catalog);
        let bonus = match count {
            n if n >= 3 => params.special_trio_bonus,
            2 => params.special_pair_bonus,
            _ => continue,
        };
        record.awards.push(SpecialAward::SpecialCharacters {
            combo: combo.name.clone(),
            count,
            bonus,
        });
    }

    for hot in catalog.hot_c6_chars() {
        if account.holds_at(hot, MAX_CONSTELLATION) {
            record.awards.push(SpecialAward::HotC6 {
                character: hot.clone(),
                bonus: params.hot_c6_bonus,
            });
        }
    }

    record.total = record
        .awards
        .iter()
        .fold(0.0, |total, award| total + award.bonus());
    log::debug!(
        "special bonus: {} awards, total={:.2}",
        record.awards.len(),
        record.total
    );
    record
}

/// Special characters the combo requires that the account holds at C2..=C5.
fn special_characters_in(combo: &ComboRule, account: &Account, catalog: &RuleCatalog) -> usize {
    catalog
        .special_c2c5_chars()
        .iter()
        .filter(|name| combo.requires(name))
        .filter(|name| {
            account
                .constellation_of(name)
                .is_some_and(|c| (2..=5).contains(&c))
        })
        .count()
}
