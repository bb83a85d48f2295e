//! Character count multiplier: scales the applicable bucket by the
//! factor of the tier that covers the account's character count.

use crate::{catalog::CountMultiplierTier, report::MultiplierRecord, types::Money};

pub fn apply_count_multiplier(
    applicable: Money,
    character_count: usize,
    tiers: &[CountMultiplierTier],
) -> MultiplierRecord {
    let tier = tiers.iter().find(|t| t.contains(character_count)).copied();

    // Unreachable with a validated catalog, kept for hand-built tier lists.
    let adjusted = match tier {
        Some(t) => applicable * t.factor,
        None => {
            log::warn!("count multiplier: no tier covers {character_count} characters");
            applicable
        }
    };

    log::debug!(
        "count multiplier: count={character_count} factor={:?} {:.2} -> {:.2}",
        tier.map(|t| t.factor),
        applicable,
        adjusted
    );

    MultiplierRecord {
        character_count,
        tier,
        input: applicable,
        adjusted,
    }
}
