//! Account holdings: the input to a valuation.
//!
//! RULE: The pipeline never mutates an Account.
//! Maps are ordered by name so every stage walks them
//! in the same order on every run.

use crate::{
    error::{EvalResult, ValuationError},
    types::{Constellation, Refinement, MAX_CONSTELLATION, MAX_REFINEMENT, MIN_REFINEMENT},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub characters: BTreeMap<String, Constellation>,
    #[serde(default)]
    pub weapons: BTreeMap<String, Refinement>,
    /// Raw gacha currency, converted to pulls at a fixed ratio.
    #[serde(default)]
    pub primary_currency: u64,
    /// Already denominated in pulls.
    #[serde(default)]
    pub secondary_currency: u64,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let account: Account = serde_json::from_str(&content)?;
        Ok(account)
    }

    pub fn with_character(mut self, name: impl Into<String>, constellation: Constellation) -> Self {
        self.characters.insert(name.into(), constellation);
        self
    }

    pub fn with_weapon(mut self, name: impl Into<String>, refinement: Refinement) -> Self {
        self.weapons.insert(name.into(), refinement);
        self
    }

    pub fn with_currency(mut self, primary: u64, secondary: u64) -> Self {
        self.primary_currency = primary;
        self.secondary_currency = secondary;
        self
    }

    pub fn constellation_of(&self, character: &str) -> Option<Constellation> {
        self.characters.get(character).copied()
    }

    pub fn holds_weapon(&self, weapon: &str) -> bool {
        self.weapons.contains_key(weapon)
    }

    pub fn holds_at(&self, character: &str, constellation: Constellation) -> bool {
        self.constellation_of(character) == Some(constellation)
    }

    /// Refinement of an owned weapon, with 0 read as 1.
    pub fn refinement_of(&self, weapon: &str) -> Option<Refinement> {
        self.weapons.get(weapon).map(|r| (*r).max(MIN_REFINEMENT))
    }

    /// Number of distinct characters, recognized by the catalog or not.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Reject levels the price tables cannot index.
    /// Refinement 0 is accepted and read as 1.
    pub fn validate(&self) -> EvalResult<()> {
        for (name, constellation) in &self.characters {
            if *constellation > MAX_CONSTELLATION {
                return Err(ValuationError::InvalidInput {
                    field: format!("characters.{name}"),
                    reason: format!(
                        "constellation {constellation} is above the maximum of {MAX_CONSTELLATION}"
                    ),
                });
            }
        }
        for (name, refinement) in &self.weapons {
            if *refinement > MAX_REFINEMENT {
                return Err(ValuationError::InvalidInput {
                    field: format!("weapons.{name}"),
                    reason: format!(
                        "refinement {refinement} is above the maximum of {MAX_REFINEMENT}"
                    ),
                });
            }
        }
        Ok(())
    }
}
