//! Structured per-stage records.
//!
//! RULE: Stages produce records, renderers consume them.
//! Nothing in this module formats text, and nothing in
//! render.rs computes a number.

use crate::{
    catalog::{ComboRule, CountMultiplierTier, ResourceValueTier},
    types::Money,
};
use serde::{Deserialize, Serialize};

/// The winning combo selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboSelection {
    pub total_value: Money,
    /// In satisfied (catalog) order.
    pub combos: Vec<ComboRule>,
}

impl ComboSelection {
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Character,
    Weapon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Scaled by the character count multiplier.
    Applicable,
    /// Added as-is.
    Exempt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Adjustment {
    /// C2+ character held without its specialized weapon.
    NoSpecializedWeapon { factor: f64 },
    /// R5 weapon whose owner is not C6, priced at R4.
    RepricedAtR4 { owner: String },
    /// R5 weapon of a premium C6 owner.
    PremiumC6Doubled { owner: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemValuation {
    pub kind: ItemKind,
    pub name: String,
    /// Constellation for characters, refinement for weapons.
    pub level: u8,
    pub value: Money,
    pub bucket: Bucket,
    pub adjustments: Vec<Adjustment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseValueRecord {
    pub items: Vec<ItemValuation>,
    pub applicable: Money,
    pub exempt: Money,
}

impl BaseValueRecord {
    pub fn item(&self, kind: ItemKind, name: &str) -> Option<&ItemValuation> {
        self.items.iter().find(|i| i.kind == kind && i.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierRecord {
    pub character_count: usize,
    /// None when no tier covers the count; the value is left unchanged.
    pub tier: Option<CountMultiplierTier>,
    pub input: Money,
    pub adjusted: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub primary_currency: u64,
    pub secondary_currency: u64,
    pub total_pulls: u64,
    pub below_floor: bool,
    pub tier: Option<ResourceValueTier>,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialAward {
    SpecialCharacters { combo: String, count: usize, bonus: Money },
    HotC6 { character: String, bonus: Money },
}

impl SpecialAward {
    pub fn bonus(&self) -> Money {
        match self {
            SpecialAward::SpecialCharacters { bonus, .. } => *bonus,
            SpecialAward::HotC6 { bonus, .. } => *bonus,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialBonusRecord {
    pub awards: Vec<SpecialAward>,
    pub total: Money,
}

/// Every stage's record, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub selection: ComboSelection,
    pub base: BaseValueRecord,
    pub multiplier: MultiplierRecord,
    /// Adjusted applicable value plus exempt value.
    pub base_subtotal: Money,
    pub resource: ResourceRecord,
    pub special: SpecialBonusRecord,
    pub final_total: Money,
}

/// The programmatic contract: a number and a rendered breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub final_total: Money,
    pub breakdown: String,
}
