//! Shared primitive types used across the valuation pipeline.

/// A character's constellation level, 0..=6. C6 is the maximum.
pub type Constellation = u8;

/// A weapon's refinement level, 1..=5.
pub type Refinement = u8;

/// Monetary value. All prices, bonuses and totals use this unit.
pub type Money = f64;

pub const MAX_CONSTELLATION: Constellation = 6;
pub const MIN_REFINEMENT: Refinement = 1;
pub const MAX_REFINEMENT: Refinement = 5;
