//! Aggregations behind the charts view
//!
//! Every function here is a pure function of its inputs. Callers filter once
//! with `filter_records` and pass the filtered slice to the others; nothing
//! reads the unfiltered list after that.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Amount, BudgetMap, Category, DateFilter, ExpenseRecord};

/// Number of expenses ranked when the caller does not say otherwise
pub const DEFAULT_TOP_N: usize = 3;

/// Keep the records inside the filter window, preserving order
pub fn filter_records(
    records: &[ExpenseRecord],
    filter: DateFilter,
    today: NaiveDate,
) -> Vec<&ExpenseRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r.date(), today))
        .collect()
}

/// Spending for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Amount,
    pub count: usize,
}

/// Per-category totals in order of each category's first appearance
///
/// Categories without spending are absent rather than present with zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Total for a category, if it has any spending
    pub fn get(&self, category: Category) -> Option<Amount> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    /// Entries in first-appearance order
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Iterate entries
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    /// Sum across categories
    pub fn total(&self) -> Amount {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Fraction of the total spent in `category`
    ///
    /// `None` when the total is zero; there is no slice to draw.
    pub fn share(&self, category: Category) -> Option<f64> {
        let amount = self.get(category)?;
        amount.ratio_of(self.total())
    }

    /// Number of categories with spending
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there is no spending at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Group by category and sum amounts
pub fn category_totals<'a, I>(records: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for record in records {
        match entries.iter_mut().find(|e| e.category == record.category()) {
            Some(entry) => {
                entry.amount += record.amount();
                entry.count += 1;
            }
            None => entries.push(CategoryTotal {
                category: record.category(),
                amount: record.amount(),
                count: 1,
            }),
        }
    }

    CategoryTotals { entries }
}

/// The date with the highest combined spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySpend {
    pub date: NaiveDate,
    pub amount: Amount,
}

/// Find the date with the largest summed spending
///
/// Dates are visited in order of first appearance and a later date only
/// replaces the leader when its sum is strictly greater, so the earliest
/// appearing date wins ties. Returns `None` for empty input.
pub fn max_spend_day<'a, I>(records: I) -> Option<DaySpend>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut days: Vec<DaySpend> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        match index.get(&record.date()) {
            Some(&slot) => days[slot].amount += record.amount(),
            None => {
                index.insert(record.date(), days.len());
                days.push(DaySpend {
                    date: record.date(),
                    amount: record.amount(),
                });
            }
        }
    }

    days.into_iter().fold(None, |best, day| match best {
        Some(leader) if day.amount <= leader.amount => Some(leader),
        _ => Some(day),
    })
}

/// The `n` largest expenses, highest first, ties in list order
pub fn top_n<'a, I>(records: I, n: usize) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut sorted: Vec<&ExpenseRecord> = records.into_iter().collect();
    // sort_by is stable, which keeps insertion order among equal amounts
    sorted.sort_by(|a, b| b.amount().cmp(&a.amount()));
    sorted.truncate(n);
    sorted
}

/// Sum of amounts
pub fn total<'a, I>(records: I) -> Amount
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().map(|r| r.amount()).sum()
}

/// Spending measured against a category budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub category: Category,
    pub spent: Amount,
    pub budget: Amount,
    /// `spent / budget`, unclamped; zero when there is no budget
    pub ratio: f64,
}

impl BudgetProgress {
    /// Ratio clamped to `[0, 1]` for drawing a progress bar
    pub fn display_ratio(&self) -> f64 {
        self.ratio.clamp(0.0, 1.0)
    }

    /// Check whether spending exceeds a set budget
    pub fn is_over_budget(&self) -> bool {
        self.budget.is_positive() && self.spent > self.budget
    }

    /// How far spending exceeds the budget, zero when within it
    pub fn overspend(&self) -> Amount {
        if self.is_over_budget() {
            self.spent - self.budget
        } else {
            Amount::zero()
        }
    }

    /// Budget left before reaching the ceiling, zero when exhausted or unset
    pub fn remaining(&self) -> Amount {
        if self.budget.is_positive() && self.spent < self.budget {
            self.budget - self.spent
        } else {
            Amount::zero()
        }
    }
}

/// Compare a category's spending to its budget
///
/// A missing or zero budget yields a ratio of zero instead of dividing by it.
pub fn budget_progress(category: Category, spent: Amount, budgets: &BudgetMap) -> BudgetProgress {
    let budget = budgets.get(category);
    BudgetProgress {
        category,
        spent,
        budget,
        ratio: spent.ratio_of(budget).unwrap_or(0.0),
    }
}
