//! Account valuation: prices a game account's characters, weapons and
//! currency against an immutable rule catalog.
//!
//! Entry point is [`engine::ValuationEngine`]; see engine.rs for the
//! fixed stage order.

pub mod account;
pub mod base_value;
pub mod catalog;
pub mod combo_selection;
pub mod count_multiplier;
pub mod engine;
pub mod error;
pub mod render;
pub mod report;
pub mod resource_value;
pub mod special_bonus;
pub mod types;

pub use account::Account;
pub use catalog::RuleCatalog;
pub use engine::{AccountEvaluator, ValuationEngine};
pub use error::{EvalResult, ValuationError};
pub use report::{ValuationReport, ValuationResult};
