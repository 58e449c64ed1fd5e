//! Expense record model
//!
//! An expense is a single spending event logged from the watch: how much,
//! what for, and when. Records are validated once, at construction, and are
//! never mutated afterwards.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

use super::amount::Amount;
use super::category::Category;
use crate::error::ValidationError;

/// A validated, immutable expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExpenseRecord {
    amount: Amount,
    category: Category,
    note: String,
    date: NaiveDate,
    #[serde(serialize_with = "hh_mm::serialize")]
    time: NaiveTime,
}

impl ExpenseRecord {
    /// Validate and build a record
    ///
    /// The note is trimmed; the time is truncated to the minute.
    pub fn new(
        amount: i64,
        category: &str,
        note: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        if amount > Amount::MAX_EXPENSE {
            return Err(ValidationError::AmountTooLarge {
                got: amount,
                max: Amount::MAX_EXPENSE,
            });
        }
        let category = Category::parse(category)?;
        let note = note.trim();
        if note.is_empty() {
            return Err(ValidationError::BlankNote);
        }

        Ok(Self {
            amount: Amount::new(amount),
            category,
            note: note.to_string(),
            date,
            time: truncate_to_minute(time),
        })
    }

    /// Amount spent
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Category the expense was filed under
    pub fn category(&self) -> Category {
        self.category
    }

    /// Free-text description
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Local calendar date of entry
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Local wall-clock time of entry (minute resolution)
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Date and time combined
    pub fn logged_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) {}",
            self.date.format("%Y-%m-%d"),
            self.time.format("%H:%M"),
            self.amount,
            self.category,
            self.note
        )
    }
}

/// Raw input as submitted by the entry form, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: i64,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl NewExpense {
    /// Collect form input stamped with the given instant
    pub fn at(
        amount: i64,
        category: impl Into<String>,
        note: impl Into<String>,
        logged_at: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            note: note.into(),
            date: logged_at.date(),
            time: logged_at.time(),
        }
    }
}

impl TryFrom<NewExpense> for ExpenseRecord {
    type Error = ValidationError;

    fn try_from(input: NewExpense) -> Result<Self, Self::Error> {
        ExpenseRecord::new(
            input.amount,
            &input.category,
            &input.note,
            input.date,
            input.time,
        )
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Serde adapter writing times as "HH:MM"
mod hh_mm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_new_valid_record() {
        let record =
            ExpenseRecord::new(100, "Food", "  lunch ", date(2024, 6, 10), time(12, 30)).unwrap();
        assert_eq!(record.amount(), Amount::new(100));
        assert_eq!(record.category(), Category::Food);
        assert_eq!(record.note(), "lunch");
        assert_eq!(record.date(), date(2024, 6, 10));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let zero = ExpenseRecord::new(0, "Food", "x", date(2024, 6, 10), time(9, 0));
        assert_eq!(zero, Err(ValidationError::NonPositiveAmount(0)));

        let negative = ExpenseRecord::new(-4, "Food", "x", date(2024, 6, 10), time(9, 0));
        assert_eq!(negative, Err(ValidationError::NonPositiveAmount(-4)));
    }

    #[test]
    fn test_rejects_amount_above_ceiling() {
        let on = date(2024, 6, 10);
        let at_max = ExpenseRecord::new(Amount::MAX_EXPENSE, "Housing", "house", on, time(9, 0));
        assert!(at_max.is_ok());

        let huge = ExpenseRecord::new(i64::MAX, "Housing", "mansion", on, time(9, 0));
        assert_eq!(
            huge,
            Err(ValidationError::AmountTooLarge {
                got: i64::MAX,
                max: Amount::MAX_EXPENSE
            })
        );
    }

    #[test]
    fn test_rejects_blank_category_and_note() {
        let blank_cat = ExpenseRecord::new(5, "", "bus", date(2024, 6, 10), time(9, 0));
        assert_eq!(blank_cat, Err(ValidationError::BlankCategory));

        let blank_note = ExpenseRecord::new(5, "Transport", "   ", date(2024, 6, 10), time(9, 0));
        assert_eq!(blank_note, Err(ValidationError::BlankNote));
    }

    #[test]
    fn test_time_truncated_to_minute() {
        let t = NaiveTime::from_hms_opt(8, 15, 42).unwrap();
        let record = ExpenseRecord::new(5, "Other", "gum", date(2024, 1, 1), t).unwrap();
        assert_eq!(record.time(), time(8, 15));
    }

    #[test]
    fn test_structural_equality() {
        let a = ExpenseRecord::new(5, "Other", "gum", date(2024, 1, 1), time(8, 15)).unwrap();
        let b = ExpenseRecord::new(5, "other", "gum ", date(2024, 1, 1), time(8, 15)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_from_new_expense() {
        let input = NewExpense::at(50, "Transport", "bus", date(2024, 6, 10).and_time(time(7, 45)));
        let record = ExpenseRecord::try_from(input).unwrap();
        assert_eq!(record.logged_at(), date(2024, 6, 10).and_time(time(7, 45)));
    }

    #[test]
    fn test_json_time_format() {
        let record = ExpenseRecord::new(5, "Other", "gum", date(2024, 1, 1), time(8, 5)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["time"], "08:05");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["category"], "Other");
    }
}
