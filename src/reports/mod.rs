//! Reports module for expense-watch
//!
//! Provides the aggregations behind the charts view and the summary that
//! bundles them for one filter selection.

pub mod aggregate;
pub mod summary;

pub use aggregate::{
    budget_progress, category_totals, filter_records, max_spend_day, top_n, total,
    BudgetProgress, CategoryTotal, CategoryTotals, DaySpend, DEFAULT_TOP_N,
};
pub use summary::ExpenseSummary;
