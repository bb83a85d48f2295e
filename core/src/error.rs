use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Duplicate {kind} '{name}' in catalog")]
    DuplicateEntry { kind: &'static str, name: String },

    #[error("Combo '{combo}' has no required characters")]
    EmptyCombo { combo: String },

    #[error("Combo '{combo}' lists character '{character}' more than once")]
    DuplicateComboCharacter { combo: String, character: String },

    #[error("Combo '{combo}' has invalid constellation range {min}..={max} for '{character}'")]
    InvalidConstellationRange {
        combo: String,
        character: String,
        min: u8,
        max: u8,
    },

    #[error("Weapon '{weapon}' is the specialized weapon of both '{first}' and '{second}'")]
    SharedSpecializedWeapon {
        weapon: String,
        first: String,
        second: String,
    },

    #[error("Roster '{roster}' names unknown character '{character}'")]
    UnknownRosterCharacter { roster: &'static str, character: String },

    #[error("Tier table '{table}' is not contiguous: expected a tier starting at {expected}, found {found}")]
    TierGap {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Tier table '{table}' has an invalid tier: {reason}")]
    InvalidTier { table: &'static str, reason: String },

    #[error("Tier table '{table}' is empty")]
    EmptyTierTable { table: &'static str },

    #[error("Combo catalog has {count} rules, limit is {limit}")]
    ComboCatalogTooLarge { count: usize, limit: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EvalResult<T> = Result<T, ValuationError>;
