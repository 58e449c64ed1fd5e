//! Expense Summary
//!
//! Everything the charts view shows for one filter selection: the total,
//! per-category totals with their budget progress, the heaviest day and the
//! top expenses.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use super::aggregate::{
    budget_progress, category_totals, filter_records, max_spend_day, top_n, total,
    BudgetProgress, CategoryTotals, DaySpend,
};
use crate::config::Settings;
use crate::display::report::{format_share, progress_bar, rule, truncate};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, BudgetMap, DateFilter, ExpenseRecord};

const WIDTH: usize = 44;
const BAR_WIDTH: usize = 16;

/// Derived view of a filtered expense list
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    /// Filter applied before aggregation
    pub filter: DateFilter,
    /// Date the filter was anchored at
    pub today: NaiveDate,
    /// Number of expenses inside the window
    pub expense_count: usize,
    /// Total spent inside the window
    pub total: Amount,
    /// Spending per category, first-appearance order
    pub categories: CategoryTotals,
    /// Day with the most spending, absent when there is nothing to show
    pub max_spend_day: Option<DaySpend>,
    /// Largest expenses, highest first
    pub top: Vec<ExpenseRecord>,
    /// Budget progress for each category with spending, same order as `categories`
    pub budgets: Vec<BudgetProgress>,
}

impl ExpenseSummary {
    /// Build a summary from a snapshot of the list
    pub fn generate(
        records: &[ExpenseRecord],
        filter: DateFilter,
        today: NaiveDate,
        budgets: &BudgetMap,
        top: usize,
    ) -> Self {
        let filtered = filter_records(records, filter, today);

        let categories = category_totals(filtered.iter().copied());
        let progress = categories
            .iter()
            .map(|entry| budget_progress(entry.category, entry.amount, budgets))
            .collect();

        Self {
            filter,
            today,
            expense_count: filtered.len(),
            total: total(filtered.iter().copied()),
            max_spend_day: max_spend_day(filtered.iter().copied()),
            top: top_n(filtered.iter().copied(), top)
                .into_iter()
                .cloned()
                .collect(),
            categories,
            budgets: progress,
        }
    }

    /// Check whether the window holds no expenses
    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Format the summary for terminal display
    ///
    /// Amounts carry the configured currency symbol and dates follow the
    /// configured strftime format.
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |amount: Amount| amount.format_with_symbol(&settings.currency_symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Expense Summary: {} (as of {})\n",
            self.filter,
            self.today.format(&settings.date_format)
        ));
        output.push_str(&rule(WIDTH));
        output.push('\n');
        output.push_str(&format!("Total spent: {}\n", money(self.total)));

        if let Some(day) = &self.max_spend_day {
            output.push_str(&format!(
                "Biggest day: {} ({})\n",
                day.date.format(&settings.date_format),
                money(day.amount)
            ));
        }

        if self.is_empty() {
            output.push_str("\nNo expenses to show.\n");
            return output;
        }

        output.push_str("\nBy category\n");
        for (entry, progress) in self.categories.iter().zip(&self.budgets) {
            let share = self
                .categories
                .share(entry.category)
                .map(format_share)
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<14} {:>8} {:>6}\n",
                entry.category.name(),
                money(entry.amount),
                share
            ));

            if progress.budget.is_positive() {
                let flag = if progress.is_over_budget() {
                    format!(" over by {}", money(progress.overspend()))
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "  {} {} of {}{}\n",
                    progress_bar(progress.display_ratio(), BAR_WIDTH),
                    money(progress.spent),
                    money(progress.budget),
                    flag
                ));
            } else {
                output.push_str(&format!("  {} no budget\n", progress_bar(0.0, BAR_WIDTH)));
            }
        }

        output.push_str(&format!("\nTop {} expenses\n", self.top.len()));
        for (rank, record) in self.top.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {:<24} {:>8}\n",
                rank + 1,
                truncate(record.note(), 24),
                money(record.amount())
            ));
        }

        output
    }

    /// Export the per-category rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(["filter", "today", "category", "spent", "count", "budget", "progress"])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for (entry, progress) in self.categories.iter().zip(&self.budgets) {
            out.write_record([
                self.filter.label().to_string(),
                self.today.to_string(),
                entry.category.name().to_string(),
                entry.amount.units().to_string(),
                entry.count.to_string(),
                progress.budget.units().to_string(),
                format!("{:.4}", progress.ratio),
            ])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        out.write_record([
            self.filter.label().to_string(),
            self.today.to_string(),
            "TOTAL".to_string(),
            self.total.units().to_string(),
            self.expense_count.to_string(),
            String::new(),
            String::new(),
        ])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

        out.flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        Ok(())
    }
}
