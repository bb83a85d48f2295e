//! Resource value: converts currency holdings into pulls and prices
//! them at the unit price of the highest threshold reached.
//!
//! Tiers are not cumulative: every pull is priced at one rate.

use crate::{account::Account, catalog::RuleCatalog, report::ResourceRecord};

pub fn total_pulls(account: &Account, primary_per_pull: u64) -> u64 {
    // Fractional pulls are discarded.
    let from_primary = account
        .primary_currency
        .checked_div(primary_per_pull)
        .unwrap_or(0);
    account.secondary_currency.saturating_add(from_primary)
}

pub fn calculate_resource_value(account: &Account, catalog: &RuleCatalog) -> ResourceRecord {
    let params = catalog.params();
    let pulls = total_pulls(account, params.primary_per_pull);

    let mut record = ResourceRecord {
        primary_currency: account.primary_currency,
        secondary_currency: account.secondary_currency,
        total_pulls: pulls,
        below_floor: pulls < params.resource_floor_pulls,
        tier: None,
        value: 0.0,
    };

    if record.below_floor {
        log::debug!(
            "resource value: {pulls} pulls below floor of {}",
            params.resource_floor_pulls
        );
        return record;
    }

    // resource_value_tiers() is ordered highest threshold first.
    if let Some(tier) = catalog
        .resource_value_tiers()
        .iter()
        .find(|t| pulls >= t.min_pulls)
    {
        record.tier = Some(*tier);
        record.value = pulls as f64 * tier.unit_price;
    }

    log::debug!(
        "resource value: {pulls} pulls at {:?} = {:.2}",
        record.tier.map(|t| t.unit_price),
        record.value
    );
    record
}
