//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and summaries for terminal
//! display, including tables and progress bars.

pub mod expense;
pub mod report;

pub use expense::{format_expense_table, format_removed, format_saved, format_total};
