//! Combo satisfaction and maximum-value selection.
//!
//! Selection is weighted set packing: each combo claims its required
//! characters, two combos conflict when their claims intersect, and
//! the winner is the conflict-free subset with the largest total value.
//!
//! The search is exhaustive. Every combo is tried both excluded and
//! (when nothing it needs is claimed) included. The include branch wins
//! only when strictly greater, so ties always keep the exclusion.
//! Results are memoized on (position, claimed set); the recursion is a
//! pure function of that key, so memoization never changes the answer.
//!
//! Worst case is still exponential in the number of satisfied combos.
//! The catalog caps the rule count at MAX_COMBO_RULES.

use crate::{
    account::Account,
    catalog::{ComboRule, RuleCatalog},
    report::ComboSelection,
    types::Money,
};
use std::collections::HashMap;

/// Above this many satisfied combos the search is logged as expensive.
pub const SATISFIED_COMBO_WARN_LIMIT: usize = 24;

/// Combos whose requirements the account meets, in catalog order.
pub fn satisfied_combos<'a>(account: &Account, catalog: &'a RuleCatalog) -> Vec<&'a ComboRule> {
    catalog
        .combos()
        .iter()
        .filter(|combo| combo.is_satisfied_by(account))
        .collect()
}

/// Find the maximum-value conflict-free subset of `satisfied`.
pub fn select_best_combos(satisfied: &[&ComboRule]) -> ComboSelection {
    if satisfied.is_empty() {
        return ComboSelection::default();
    }
    if satisfied.len() > SATISFIED_COMBO_WARN_LIMIT {
        log::warn!(
            "combo selection: {} satisfied combos exceeds {}; exhaustive search may be slow",
            satisfied.len(),
            SATISFIED_COMBO_WARN_LIMIT
        );
    }

    let mut search = Search::new(satisfied);
    let root = search.empty_claims();
    let total_value = search.best(0, &root);
    let chosen = search.winning_indices();

    log::debug!(
        "combo selection: {} satisfied, {} selected, value={:.2}, memo={}",
        satisfied.len(),
        chosen.len(),
        total_value,
        search.memo.len()
    );

    ComboSelection {
        total_value,
        combos: chosen.into_iter().map(|i| satisfied[i].clone()).collect(),
    }
}

/// Fixed-width bitset over the characters named by the satisfied combos.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClaimSet {
    words: Vec<u64>,
}

impl ClaimSet {
    fn with_bits(bits: usize) -> Self {
        Self { words: vec![0; bits.div_ceil(64).max(1)] }
    }

    fn insert(&mut self, bit: usize) {
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    fn intersects(&self, other: &ClaimSet) -> bool {
        self.words.iter().zip(&other.words).any(|(a, b)| a & b != 0)
    }

    fn union(&self, other: &ClaimSet) -> ClaimSet {
        ClaimSet {
            words: self.words.iter().zip(&other.words).map(|(a, b)| a | b).collect(),
        }
    }
}

struct Search<'a> {
    combos: &'a [&'a ComboRule],
    claims: Vec<ClaimSet>,
    width:  usize,
    memo:   HashMap<(usize, ClaimSet), Money>,
}

impl<'a> Search<'a> {
    fn new(combos: &'a [&'a ComboRule]) -> Self {
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        for combo in combos {
            for req in &combo.required_chars {
                let next = index_of.len();
                index_of.entry(req.name.as_str()).or_insert(next);
            }
        }
        let width = index_of.len();

        let claims = combos
            .iter()
            .map(|combo| {
                let mut set = ClaimSet::with_bits(width);
                for req in &combo.required_chars {
                    set.insert(index_of[req.name.as_str()]);
                }
                set
            })
            .collect();

        Self { combos, claims, width, memo: HashMap::new() }
    }

    fn empty_claims(&self) -> ClaimSet {
        ClaimSet::with_bits(self.width)
    }

    /// Best achievable value from `index` onward given `claimed`.
    fn best(&mut self, index: usize, claimed: &ClaimSet) -> Money {
        if index == self.combos.len() {
            return 0.0;
        }
        let key = (index, claimed.clone());
        if let Some(value) = self.memo.get(&key) {
            return *value;
        }

        let exclude = self.best(index + 1, claimed);
        let mut best = exclude;
        if !self.claims[index].intersects(claimed) {
            let next = claimed.union(&self.claims[index]);
            let include = self.best(index + 1, &next) + self.combos[index].value;
            if include > exclude {
                best = include;
            }
        }

        self.memo.insert(key, best);
        best
    }

    /// Replay the branch decisions `best` made from the root.
    fn winning_indices(&mut self) -> Vec<usize> {
        let mut claimed = self.empty_claims();
        let mut chosen = Vec::new();

        for index in 0..self.combos.len() {
            if self.claims[index].intersects(&claimed) {
                continue;
            }
            let exclude = self.best(index + 1, &claimed);
            let next = claimed.union(&self.claims[index]);
            let include = self.best(index + 1, &next) + self.combos[index].value;
            if include > exclude {
                chosen.push(index);
                claimed = next;
            }
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RequiredChar;

    fn combo(name: &str, value: Money, chars: &[&str]) -> ComboRule {
        ComboRule {
            name: name.into(),
            value,
            required_chars: chars
                .iter()
                .map(|c| RequiredChar { name: (*c).into(), min_const: 0, max_const: 6 })
                .collect(),
        }
    }

    fn names(selection: &ComboSelection) -> Vec<&str> {
        selection.combos.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn empty_input_selects_nothing() {
        let selection = select_best_combos(&[]);
        assert_eq!(selection.total_value, 0.0);
        assert!(selection.is_empty());
    }

    #[test]
    fn two_small_disjoint_combos_beat_one_overlapping_large_one() {
        let big = combo("big", 500.0, &["A", "B"]);
        let left = combo("left", 300.0, &["A", "C"]);
        let right = combo("right", 250.0, &["B", "D"]);
        let selection = select_best_combos(&[&big, &left, &right]);
        assert_eq!(selection.total_value, 550.0);
        assert_eq!(names(&selection), vec!["left", "right"]);
    }

    #[test]
    fn ties_keep_the_excluded_branch() {
        // Both single combos are worth the same and conflict on A.
        // Excluding the first and taking the second is found first
        // and never displaced by an equal total.
        let first = combo("first", 100.0, &["A"]);
        let second = combo("second", 100.0, &["A", "B"]);
        let selection = select_best_combos(&[&first, &second]);
        assert_eq!(selection.total_value, 100.0);
        assert_eq!(names(&selection), vec!["second"]);
    }

    #[test]
    fn zero_value_combo_is_never_selected() {
        let free = combo("free", 0.0, &["A"]);
        let selection = select_best_combos(&[&free]);
        assert!(selection.is_empty());
    }

    #[test]
    fn claim_set_spans_multiple_words() {
        let mut a = ClaimSet::with_bits(130);
        let mut b = ClaimSet::with_bits(130);
        a.insert(129);
        b.insert(3);
        assert!(!a.intersects(&b));
        let both = a.union(&b);
        assert!(both.intersects(&a));
        assert!(both.intersects(&b));
    }
}
