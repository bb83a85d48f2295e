//! Rule catalog: every price table and rule the valuation reads.
//!
//! RULE: The catalog is validated when built and never mutated
//! afterwards. Evaluations only borrow it; one instance may be shared
//! across threads behind an Arc.

use crate::{
    account::Account,
    error::{EvalResult, ValuationError},
    types::{Constellation, Money, Refinement, MAX_CONSTELLATION, MAX_REFINEMENT, MIN_REFINEMENT},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Upper bound on combo rules. The selector is exhaustive, so the
/// catalog must stay small.
pub const MAX_COMBO_RULES: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterInfo {
    pub name: String,
    /// Value at C0..=C6.
    pub prices: [Money; 7],
    #[serde(default)]
    pub specialized_weapon: Option<String>,
}

impl CharacterInfo {
    pub fn price_at(&self, constellation: Constellation) -> Money {
        self.prices[usize::from(constellation.min(MAX_CONSTELLATION))]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeaponInfo {
    pub name: String,
    /// Value at R1..=R5.
    pub prices: [Money; 5],
}

impl WeaponInfo {
    pub fn price_at(&self, refinement: Refinement) -> Money {
        let r = refinement.clamp(MIN_REFINEMENT, MAX_REFINEMENT);
        self.prices[usize::from(r - 1)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredChar {
    pub name: String,
    pub min_const: Constellation,
    pub max_const: Constellation,
}

impl RequiredChar {
    pub fn admits(&self, constellation: Constellation) -> bool {
        constellation >= self.min_const && constellation <= self.max_const
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboRule {
    pub name: String,
    pub value: Money,
    pub required_chars: Vec<RequiredChar>,
}

impl ComboRule {
    pub fn is_satisfied_by(&self, account: &Account) -> bool {
        self.required_chars.iter().all(|req| {
            account
                .constellation_of(&req.name)
                .is_some_and(|c| req.admits(c))
        })
    }

    /// True if any requirement demands C6.
    pub fn requires_max_constellation(&self) -> bool {
        self.required_chars
            .iter()
            .any(|req| req.min_const == MAX_CONSTELLATION)
    }

    pub fn requires(&self, character: &str) -> bool {
        self.required_chars.iter().any(|req| req.name == character)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CountMultiplierTier {
    pub min_count: usize,
    pub max_count: usize,
    pub factor: f64,
}

impl CountMultiplierTier {
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min_count && count <= self.max_count
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResourceValueTier {
    pub min_pulls: u64,
    pub unit_price: Money,
}

/// Fixed constants of the valuation model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValuationParams {
    /// Applied to C2+ characters held without their specialized weapon.
    pub no_weapon_penalty: f64,
    /// Primary currency per pull.
    pub primary_per_pull: u64,
    /// Holdings below this many pulls are worth nothing.
    pub resource_floor_pulls: u64,
    pub special_pair_bonus: Money,
    pub special_trio_bonus: Money,
    pub hot_c6_bonus: Money,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            no_weapon_penalty:    0.8,
            primary_per_pull:     160,
            resource_floor_pulls: 200,
            special_pair_bonus:   200.0,
            special_trio_bonus:   400.0,
            hot_c6_bonus:         250.0,
        }
    }
}

/// Raw catalog contents before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    pub characters: Vec<CharacterInfo>,
    pub weapons: Vec<WeaponInfo>,
    pub combos: Vec<ComboRule>,
    pub count_multiplier_tiers: Vec<CountMultiplierTier>,
    pub resource_value_tiers: Vec<ResourceValueTier>,
    pub hot_c6_chars: Vec<String>,
    pub special_c2c5_chars: Vec<String>,
    #[serde(default)]
    pub params: ValuationParams,
}

#[derive(Debug, Clone, Deserialize)]
struct CharactersFile {
    characters: Vec<CharacterInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeaponsFile {
    weapons: Vec<WeaponInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct CombosFile {
    combos: Vec<ComboRule>,
}

#[derive(Debug, Clone, Deserialize)]
struct TiersFile {
    count_multiplier_tiers: Vec<CountMultiplierTier>,
    resource_value_tiers: Vec<ResourceValueTier>,
}

#[derive(Debug, Clone, Deserialize)]
struct RostersFile {
    hot_c6_chars: Vec<String>,
    special_c2c5_chars: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RuleCatalog {
    characters:      HashMap<String, CharacterInfo>,
    weapons:         HashMap<String, WeaponInfo>,
    /// weapon name -> the character it is specialized for
    weapon_owners:   HashMap<String, String>,
    /// Sorted by value, highest first.
    combos:          Vec<ComboRule>,
    count_tiers:     Vec<CountMultiplierTier>,
    /// Sorted by threshold, highest first.
    resource_tiers:  Vec<ResourceValueTier>,
    hot_c6_chars:    Vec<String>,
    special_chars:   Vec<String>,
    params:          ValuationParams,
}

impl RuleCatalog {
    /// Load from the data/ directory.
    /// In tests, use RuleCatalog::default_test().
    pub fn load(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = data_dir.as_ref().join("catalog");

        let characters: CharactersFile = read_json(&dir.join("characters.json"))?;
        let weapons: WeaponsFile = read_json(&dir.join("weapons.json"))?;
        let combos: CombosFile = read_json(&dir.join("combos.json"))?;
        let tiers: TiersFile = read_json(&dir.join("tiers.json"))?;
        let rosters: RostersFile = read_json(&dir.join("rosters.json"))?;

        let params_path = dir.join("params.json");
        let params = if params_path.exists() {
            read_json(&params_path)?
        } else {
            ValuationParams::default()
        };

        let catalog = Self::build(CatalogSource {
            characters: characters.characters,
            weapons: weapons.weapons,
            combos: combos.combos,
            count_multiplier_tiers: tiers.count_multiplier_tiers,
            resource_value_tiers: tiers.resource_value_tiers,
            hot_c6_chars: rosters.hot_c6_chars,
            special_c2c5_chars: rosters.special_c2c5_chars,
            params,
        })?;

        log::info!(
            "catalog: loaded {} characters, {} weapons, {} combos from {}",
            catalog.characters.len(),
            catalog.weapons.len(),
            catalog.combos.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Validate a source and build the lookup indexes.
    pub fn build(source: CatalogSource) -> EvalResult<Self> {
        let CatalogSource {
            characters: character_list,
            weapons: weapon_list,
            mut combos,
            count_multiplier_tiers,
            mut resource_value_tiers,
            hot_c6_chars,
            special_c2c5_chars,
            params,
        } = source;

        let mut characters = HashMap::with_capacity(character_list.len());
        for info in character_list {
            if characters.contains_key(&info.name) {
                return Err(ValuationError::DuplicateEntry { kind: "character", name: info.name });
            }
            characters.insert(info.name.clone(), info);
        }

        let mut weapons = HashMap::with_capacity(weapon_list.len());
        for info in weapon_list {
            if weapons.contains_key(&info.name) {
                return Err(ValuationError::DuplicateEntry { kind: "weapon", name: info.name });
            }
            weapons.insert(info.name.clone(), info);
        }

        let weapon_owners = build_owner_index(&characters, &weapons)?;

        validate_combos(&combos, &characters)?;
        // Highest value first. Stable, so equal values keep file order.
        combos.sort_by(|a, b| b.value.total_cmp(&a.value));

        validate_count_tiers(&count_multiplier_tiers)?;
        validate_resource_tiers(&resource_value_tiers)?;
        resource_value_tiers.sort_by(|a, b| b.min_pulls.cmp(&a.min_pulls));

        for name in &hot_c6_chars {
            if !characters.contains_key(name) {
                return Err(ValuationError::UnknownRosterCharacter {
                    roster: "hot_c6_chars",
                    character: name.clone(),
                });
            }
        }
        for name in &special_c2c5_chars {
            if !characters.contains_key(name) {
                return Err(ValuationError::UnknownRosterCharacter {
                    roster: "special_c2c5_chars",
                    character: name.clone(),
                });
            }
        }

        Ok(Self {
            characters,
            weapons,
            weapon_owners,
            combos,
            count_tiers: count_multiplier_tiers,
            resource_tiers: resource_value_tiers,
            hot_c6_chars,
            special_chars: special_c2c5_chars,
            params,
        })
    }

    pub fn character(&self, name: &str) -> Option<&CharacterInfo> {
        self.characters.get(name)
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponInfo> {
        self.weapons.get(name)
    }

    /// The character this weapon is specialized for, if any.
    pub fn owner_of(&self, weapon: &str) -> Option<&str> {
        self.weapon_owners.get(weapon).map(String::as_str)
    }

    pub fn combos(&self) -> &[ComboRule] {
        &self.combos
    }

    pub fn count_multiplier_tiers(&self) -> &[CountMultiplierTier] {
        &self.count_tiers
    }

    /// Highest threshold first.
    pub fn resource_value_tiers(&self) -> &[ResourceValueTier] {
        &self.resource_tiers
    }

    pub fn hot_c6_chars(&self) -> &[String] {
        &self.hot_c6_chars
    }

    pub fn special_c2c5_chars(&self) -> &[String] {
        &self.special_chars
    }

    pub fn params(&self) -> &ValuationParams {
        &self.params
    }

    /// A small self-contained catalog for unit and integration tests.
    pub fn default_test() -> Self {
        let character = |name: &str, c6: Money, weapon: &str| CharacterInfo {
            name: name.into(),
            prices: [5.0, 10.0, 50.0, 60.0, 70.0, 100.0, c6],
            specialized_weapon: Some(weapon.into()),
        };
        let weapon = |name: &str, r5: Money| WeaponInfo {
            name: name.into(),
            prices: [5.0, 10.0, 15.0, 20.0, r5],
        };
        let req = |name: &str, min: Constellation, max: Constellation| RequiredChar {
            name: name.into(),
            min_const: min,
            max_const: max,
        };

        let source = CatalogSource {
            characters: vec![
                character("Aria", 500.0, "Dawnbreaker"),
                character("Bram", 400.0, "Ironbloom"),
                character("Cyra", 300.0, "Tidecaller"),
                character("Dax", 380.0, "Emberfang"),
                character("Eira", 200.0, "Frostwhisper"),
            ],
            weapons: vec![
                weapon("Dawnbreaker", 250.0),
                weapon("Ironbloom", 150.0),
                weapon("Tidecaller", 100.0),
                weapon("Emberfang", 150.0),
                weapon("Frostwhisper", 50.0),
            ],
            combos: vec![
                ComboRule {
                    name: "C6 Aria + C6 Bram".into(),
                    value: 500.0,
                    required_chars: vec![req("Aria", 6, 6), req("Bram", 6, 6)],
                },
                ComboRule {
                    name: "C6 Aria + C2 Cyra + C2 Eira".into(),
                    value: 300.0,
                    required_chars: vec![req("Aria", 6, 6), req("Cyra", 2, 5), req("Eira", 2, 5)],
                },
                ComboRule {
                    name: "C2 Dax + C2 Eira".into(),
                    value: 80.0,
                    required_chars: vec![req("Dax", 2, 6), req("Eira", 2, 6)],
                },
            ],
            count_multiplier_tiers: standard_count_tiers(),
            resource_value_tiers: standard_resource_tiers(),
            hot_c6_chars: vec!["Dax".into()],
            special_c2c5_chars: vec!["Bram".into(), "Cyra".into(), "Eira".into()],
            params: ValuationParams::default(),
        };

        match Self::build(source) {
            Ok(catalog) => catalog,
            Err(e) => panic!("default_test catalog is invalid: {e}"),
        }
    }
}

/// Count tiers shipped with the standard rule set.
pub fn standard_count_tiers() -> Vec<CountMultiplierTier> {
    [(0, 10, 0.6), (11, 20, 0.8), (21, 39, 1.0), (40, 45, 1.2), (46, 50, 1.4), (51, 999, 1.6)]
        .into_iter()
        .map(|(min_count, max_count, factor)| CountMultiplierTier { min_count, max_count, factor })
        .collect()
}

/// Resource tiers shipped with the standard rule set.
pub fn standard_resource_tiers() -> Vec<ResourceValueTier> {
    [
        (1000, 1.8),
        (900, 1.7),
        (800, 1.6),
        (700, 1.4),
        (600, 1.3),
        (500, 1.2),
        (300, 1.0),
        (200, 0.5),
    ]
    .into_iter()
    .map(|(min_pulls, unit_price)| ResourceValueTier { min_pulls, unit_price })
    .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))
}

fn build_owner_index(
    characters: &HashMap<String, CharacterInfo>,
    weapons: &HashMap<String, WeaponInfo>,
) -> EvalResult<HashMap<String, String>> {
    let mut owners: HashMap<String, String> = HashMap::new();

    // Sorted walk so a conflict always reports the same pair.
    let mut names: Vec<&String> = characters.keys().collect();
    names.sort();

    for name in names {
        let Some(weapon) = characters[name].specialized_weapon.as_deref() else {
            continue;
        };
        if weapon.is_empty() {
            continue;
        }
        if let Some(first) = owners.get(weapon) {
            return Err(ValuationError::SharedSpecializedWeapon {
                weapon: weapon.to_string(),
                first: first.clone(),
                second: name.clone(),
            });
        }
        if !weapons.contains_key(weapon) {
            log::warn!("catalog: specialized weapon '{weapon}' of '{name}' has no price entry");
        }
        owners.insert(weapon.to_string(), name.clone());
    }
    Ok(owners)
}

fn validate_combos(
    combos: &[ComboRule],
    characters: &HashMap<String, CharacterInfo>,
) -> EvalResult<()> {
    if combos.len() > MAX_COMBO_RULES {
        return Err(ValuationError::ComboCatalogTooLarge {
            count: combos.len(),
            limit: MAX_COMBO_RULES,
        });
    }

    let mut seen_names = HashSet::new();
    for combo in combos {
        if !seen_names.insert(combo.name.as_str()) {
            return Err(ValuationError::DuplicateEntry { kind: "combo", name: combo.name.clone() });
        }
        if combo.required_chars.is_empty() {
            return Err(ValuationError::EmptyCombo { combo: combo.name.clone() });
        }

        let mut seen_chars = HashSet::new();
        for req in &combo.required_chars {
            if !seen_chars.insert(req.name.as_str()) {
                return Err(ValuationError::DuplicateComboCharacter {
                    combo: combo.name.clone(),
                    character: req.name.clone(),
                });
            }
            if req.min_const > req.max_const || req.max_const > MAX_CONSTELLATION {
                return Err(ValuationError::InvalidConstellationRange {
                    combo: combo.name.clone(),
                    character: req.name.clone(),
                    min: req.min_const,
                    max: req.max_const,
                });
            }
            if !characters.contains_key(&req.name) {
                log::warn!(
                    "catalog: combo '{}' requires '{}' which has no price entry",
                    combo.name,
                    req.name
                );
            }
        }
    }
    Ok(())
}

fn validate_count_tiers(tiers: &[CountMultiplierTier]) -> EvalResult<()> {
    const TABLE: &str = "count_multiplier_tiers";
    if tiers.is_empty() {
        return Err(ValuationError::EmptyTierTable { table: TABLE });
    }

    let mut expected = 0;
    for tier in tiers {
        if tier.min_count != expected {
            return Err(ValuationError::TierGap {
                table: TABLE,
                expected,
                found: tier.min_count,
            });
        }
        if tier.max_count < tier.min_count {
            return Err(ValuationError::InvalidTier {
                table: TABLE,
                reason: format!("max_count {} below min_count {}", tier.max_count, tier.min_count),
            });
        }
        expected = tier.max_count.saturating_add(1);
    }
    Ok(())
}

fn validate_resource_tiers(tiers: &[ResourceValueTier]) -> EvalResult<()> {
    const TABLE: &str = "resource_value_tiers";
    if tiers.is_empty() {
        return Err(ValuationError::EmptyTierTable { table: TABLE });
    }

    let mut seen = HashSet::new();
    for tier in tiers {
        if !seen.insert(tier.min_pulls) {
            return Err(ValuationError::InvalidTier {
                table: TABLE,
                reason: format!("threshold {} appears more than once", tier.min_pulls),
            });
        }
    }
    Ok(())
}
