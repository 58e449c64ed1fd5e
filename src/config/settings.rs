//! User settings for expense-watch
//!
//! Holds the injectable configuration consumed by the charts view: which
//! categories are offered, their default budgets, the default date filter and
//! how many top expenses to rank.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Amount, Category, DateFilter};
use crate::reports::DEFAULT_TOP_N;

/// Newest settings layout this build understands
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// User settings for expense-watch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used when printing (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Filter selected when the charts view opens
    #[serde(default)]
    pub default_filter: DateFilter,

    /// Number of entries in the top expenses ranking
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Categories offered by the entry form, in presentation order
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Budgets the charts view starts with
    #[serde(default = "default_budgets")]
    pub default_budgets: BTreeMap<Category, Amount>,
}

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_top_count() -> usize {
    DEFAULT_TOP_N
}

fn default_categories() -> Vec<Category> {
    Category::all().to_vec()
}

fn default_budgets() -> BTreeMap<Category, Amount> {
    BTreeMap::from([
        (Category::Food, Amount::new(500)),
        (Category::Transport, Amount::new(300)),
        (Category::Entertainment, Amount::new(400)),
        (Category::Other, Amount::new(200)),
    ])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_filter: DateFilter::default(),
            top_count: default_top_count(),
            categories: default_categories(),
            default_budgets: default_budgets(),
        }
    }
}

impl Settings {
    /// Load settings from the standard location, or defaults if absent
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ExpenseError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            ExpenseError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ExpenseError::Config(format!(
                "schema_version {} is newer than supported version {}",
                self.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }

        if self.top_count == 0 {
            return Err(ExpenseError::Config("top_count must be at least 1".into()));
        }

        if self.categories.is_empty() {
            return Err(ExpenseError::Config(
                "categories must offer at least one category".into(),
            ));
        }

        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ExpenseError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
