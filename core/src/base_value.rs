//! Base value: prices every owned character and weapon and
//! routes each into the applicable or exempt bucket.
//!
//! RULES:
//!   - Names missing from the catalog are skipped, never an error.
//!   - A C6 character is always exempt.
//!   - A weapon is exempt when its owner is held at C6.
//!   - The no-weapon penalty applies to C2..=C6 regardless of bucket.

use crate::{
    account::Account,
    catalog::RuleCatalog,
    report::{Adjustment, BaseValueRecord, Bucket, ComboSelection, ItemKind, ItemValuation},
    types::{MAX_CONSTELLATION, MAX_REFINEMENT},
};
use std::collections::BTreeSet;

/// Characters whose R5 specialized weapon is doubled.
///
/// Union of the C6 requirements of the winning combos that the
/// account holds at C6, and, when anything was selected at all,
/// every hot C6 character held at C6.
pub fn premium_c6_characters(
    account: &Account,
    catalog: &RuleCatalog,
    selection: &ComboSelection,
) -> BTreeSet<String> {
    let mut premium = BTreeSet::new();

    for combo in &selection.combos {
        for req in &combo.required_chars {
            if req.min_const == MAX_CONSTELLATION && account.holds_at(&req.name, MAX_CONSTELLATION) {
                premium.insert(req.name.clone());
            }
        }
    }

    if !selection.is_empty() {
        for hot in catalog.hot_c6_chars() {
            if account.holds_at(hot, MAX_CONSTELLATION) {
                premium.insert(hot.clone());
            }
        }
    }

    premium
}

pub fn calculate_base_value(
    account: &Account,
    catalog: &RuleCatalog,
    selection: &ComboSelection,
) -> BaseValueRecord {
    let premium = premium_c6_characters(account, catalog, selection);
    let penalty = catalog.params().no_weapon_penalty;
    let mut record = BaseValueRecord::default();

    for (name, &constellation) in &account.characters {
        let Some(info) = catalog.character(name) else {
            log::debug!("base value: skipping unknown character '{name}'");
            continue;
        };

        let mut value = info.price_at(constellation);
        let mut adjustments = Vec::new();

        if constellation >= 2 {
            let has_weapon = info
                .specialized_weapon
                .as_deref()
                .is_some_and(|w| account.holds_weapon(w));
            if !has_weapon {
                value *= penalty;
                adjustments.push(Adjustment::NoSpecializedWeapon { factor: penalty });
            }
        }

        let bucket = if constellation == MAX_CONSTELLATION {
            Bucket::Exempt
        } else {
            Bucket::Applicable
        };
        record.push(ItemValuation {
            kind: ItemKind::Character,
            name: name.clone(),
            level: constellation,
            value,
            bucket,
            adjustments,
        });
    }

    for name in account.weapons.keys() {
        let Some(info) = catalog.weapon(name) else {
            log::debug!("base value: skipping unknown weapon '{name}'");
            continue;
        };
        let Some(refinement) = account.refinement_of(name) else {
            continue;
        };

        let mut value = info.price_at(refinement);
        let mut adjustments = Vec::new();
        let owner = catalog.owner_of(name);
        let owner_at_c6 = owner.is_some_and(|o| account.holds_at(o, MAX_CONSTELLATION));

        if refinement == MAX_REFINEMENT {
            if let Some(owner) = owner {
                if !owner_at_c6 {
                    value = info.price_at(MAX_REFINEMENT - 1);
                    adjustments.push(Adjustment::RepricedAtR4 { owner: owner.to_string() });
                }
                if premium.contains(owner) {
                    value *= 2.0;
                    adjustments.push(Adjustment::PremiumC6Doubled { owner: owner.to_string() });
                }
            }
        }

        let bucket = if owner_at_c6 { Bucket::Exempt } else { Bucket::Applicable };
        record.push(ItemValuation {
            kind: ItemKind::Weapon,
            name: name.clone(),
            level: refinement,
            value,
            bucket,
            adjustments,
        });
    }

    log::debug!(
        "base value: {} items, applicable={:.2}, exempt={:.2}",
        record.items.len(),
        record.applicable,
        record.exempt
    );
    record
}

impl BaseValueRecord {
    fn push(&mut self, item: ItemValuation) {
        match item.bucket {
            Bucket::Applicable => self.applicable += item.value,
            Bucket::Exempt => self.exempt += item.value,
        }
        self.items.push(item);
    }
}
