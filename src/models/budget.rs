//! Per-category budget thresholds
//!
//! Budgets are soft ceilings used only to draw progress bars. They live for
//! as long as the charts view does and are never written to disk.

use serde::Serialize;
use std::collections::BTreeMap;

use super::amount::Amount;
use super::category::Category;
use crate::config::Settings;
use crate::error::ValidationError;

/// Mapping from category to its spending ceiling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetMap {
    limits: BTreeMap<Category, Amount>,
}

impl BudgetMap {
    /// Create an empty map (every category unbudgeted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the configured defaults
    ///
    /// Non-positive configured values are skipped rather than failing, so a
    /// hand-edited config cannot stop the charts view from opening.
    pub fn from_settings(settings: &Settings) -> Self {
        let limits = settings
            .default_budgets
            .iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(category, amount)| (*category, *amount))
            .collect();
        Self { limits }
    }

    /// Budget for a category, zero when none is set
    pub fn get(&self, category: Category) -> Amount {
        self.limits.get(&category).copied().unwrap_or_default()
    }

    /// Check whether a category has a budget
    pub fn contains(&self, category: Category) -> bool {
        self.limits.contains_key(&category)
    }

    /// Set a category's budget
    pub fn set(&mut self, category: Category, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveBudget(amount));
        }
        self.limits.insert(category, Amount::new(amount));
        Ok(())
    }

    /// Remove a category's budget, returning the old value
    pub fn unset(&mut self, category: Category) -> Option<Amount> {
        self.limits.remove(&category)
    }

    /// Iterate over budgeted categories in enum order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Amount)> + '_ {
        self.limits.iter().map(|(c, a)| (*c, *a))
    }

    /// Number of budgeted categories
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// Check whether no category is budgeted
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
