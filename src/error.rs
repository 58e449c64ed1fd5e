//! Custom error types for expense-watch
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Reasons an expense (or a budget threshold) is refused at construction time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount must be strictly positive
    #[error("amount must be greater than 0 (got {0})")]
    NonPositiveAmount(i64),

    /// Amount above the largest single expense accepted
    #[error("amount must be at most {max} (got {got})")]
    AmountTooLarge { got: i64, max: i64 },

    /// No category was chosen
    #[error("a category must be selected")]
    BlankCategory,

    /// Category is not one of the fixed list
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The note describing the expense is empty
    #[error("a note describing the expense is required")]
    BlankNote,

    /// Budget thresholds must be strictly positive
    #[error("budget must be greater than 0 (got {0})")]
    NonPositiveBudget(i64),

    /// Category exists but is not offered by the current settings
    #[error("category not offered: {0}")]
    CategoryNotOffered(String),

    /// Date filter name not recognised
    #[error("unknown date filter: {0}")]
    UnknownFilter(String),
}

/// The main error type for expense-watch operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Input rejected before it reached the store
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Shared store errors (lock poisoning)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses addressed by list position
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for expense-watch operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
