//! Core data models for expense-watch
//!
//! This module contains the data structures of the expense domain: amounts,
//! categories, expense records, date filters and budget thresholds.

pub mod amount;
pub mod budget;
pub mod category;
pub mod expense;
pub mod filter;

pub use amount::Amount;
pub use budget::BudgetMap;
pub use category::Category;
pub use expense::{ExpenseRecord, NewExpense};
pub use filter::DateFilter;
