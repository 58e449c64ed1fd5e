//! expense-watch - Expense tracking core for a wrist-worn companion app
//!
//! This library keeps an in-memory list of expenses and derives everything the
//! charts view shows from a snapshot of it: per-category totals, the biggest
//! spending day, the top expenses, the running total and budget progress, all
//! scoped by a date filter.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data types (amounts, categories, expenses, filters, budgets)
//! - `store`: The observable expense list and its change notifications
//! - `reports`: Pure aggregation functions and the charts summary
//! - `clock`: Injectable source of "now"
//! - `config`: Configuration and path management
//! - `import`: CSV import into a store
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expwatch` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_watch::clock::SystemClock;
//! use expense_watch::models::{BudgetMap, DateFilter};
//! use expense_watch::reports::ExpenseSummary;
//! use expense_watch::store::ExpenseStore;
//!
//! let mut store = ExpenseStore::new();
//! store.add_now(120, "Food", "lunch", &SystemClock)?;
//! let summary = ExpenseSummary::generate(
//!     &store.snapshot(),
//!     DateFilter::Today,
//!     chrono::Local::now().date_naive(),
//!     &BudgetMap::new(),
//!     3,
//! );
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod store;

pub use error::{ExpenseError, ExpenseResult, ValidationError};
