//! The valuation engine: runs the pipeline for one account.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Combo satisfaction filter
//!   2. Combo selector             (winning selection)
//!   3. Base value                 (reads the winning selection)
//!   4. Count multiplier           (applicable bucket only)
//!   5. Base subtotal              (adjusted applicable + exempt)
//!   6. Resource value             (independent of 2-5)
//!   7. Special bonuses            (reads the winning selection)
//!   8. Final total                (subtotal + combo + resource + special)
//!
//! RULES:
//!   - The engine holds the catalog read-only; evaluations never mutate it.
//!   - Each stage produces a record; rendering happens after the last stage.
//!   - Same account + same catalog = same report, every time.

use crate::{
    account::Account,
    base_value::calculate_base_value,
    catalog::RuleCatalog,
    combo_selection::{satisfied_combos, select_best_combos},
    count_multiplier::apply_count_multiplier,
    error::EvalResult,
    render::{BreakdownRenderer, HtmlRenderer},
    report::{ValuationReport, ValuationResult},
    resource_value::calculate_resource_value,
    special_bonus::apply_special_bonuses,
};
use std::path::Path;
use std::sync::Arc;

/// The contract every rule set must fulfill.
pub trait AccountEvaluator {
    fn calculate_valuation(&self, account: &Account) -> EvalResult<ValuationResult>;
}

#[derive(Debug, Clone)]
pub struct ValuationEngine {
    catalog: Arc<RuleCatalog>,
}

impl ValuationEngine {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// Engine over the shipped catalog in `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(RuleCatalog::load(data_dir)?)))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Run every stage and return the structured records.
    pub fn evaluate(&self, account: &Account) -> EvalResult<ValuationReport> {
        account.validate()?;
        let catalog = self.catalog.as_ref();

        let satisfied = satisfied_combos(account, catalog);
        let selection = select_best_combos(&satisfied);

        let base = calculate_base_value(account, catalog, &selection);
        let multiplier = apply_count_multiplier(
            base.applicable,
            account.character_count(),
            catalog.count_multiplier_tiers(),
        );
        let base_subtotal = multiplier.adjusted + base.exempt;

        let resource = calculate_resource_value(account, catalog);
        let special = apply_special_bonuses(account, catalog, &selection);

        let final_total = base_subtotal + selection.total_value + resource.value + special.total;

        log::debug!(
            "valuation: subtotal={:.2} combo={:.2} resource={:.2} special={:.2} total={:.2}",
            base_subtotal,
            selection.total_value,
            resource.value,
            special.total,
            final_total
        );

        Ok(ValuationReport {
            selection,
            base,
            multiplier,
            base_subtotal,
            resource,
            special,
            final_total,
        })
    }

    pub fn calculate_valuation_with(
        &self,
        account: &Account,
        renderer: &dyn BreakdownRenderer,
    ) -> EvalResult<ValuationResult> {
        let report = self.evaluate(account)?;
        Ok(ValuationResult {
            final_total: report.final_total,
            breakdown: renderer.render(&report),
        })
    }
}

impl AccountEvaluator for ValuationEngine {
    fn calculate_valuation(&self, account: &Account) -> EvalResult<ValuationResult> {
        self.calculate_valuation_with(account, &HtmlRenderer)
    }
}
