//! Expense list display formatting
//!
//! Renders the running list the way the watch shows it: newest entry on top,
//! each numbered by its position in entry order so it can be removed by number.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::config::Settings;
use crate::models::{Amount, ExpenseRecord};

const NOTE_WIDTH: usize = 28;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Format a list of expenses as a table, newest first
///
/// Positions count from 1 in entry order, matching the session's `remove`.
pub fn format_expense_table(records: &[ExpenseRecord], settings: &Settings) -> String {
    if records.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows = records.iter().enumerate().rev().map(|(i, r)| ExpenseRow {
        position: i + 1,
        date: r.date().format(&settings.date_format).to_string(),
        time: r.time().format("%H:%M").to_string(),
        category: r.category().to_string(),
        amount: r.amount().format_with_symbol(&settings.currency_symbol),
        note: truncate(r.note(), NOTE_WIDTH),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// One-line confirmation shown after an expense is saved
pub fn format_saved(record: &ExpenseRecord, settings: &Settings) -> String {
    format!("Saved: {}", describe(record, settings))
}

/// One-line confirmation shown after an expense is removed
pub fn format_removed(record: &ExpenseRecord, settings: &Settings) -> String {
    format!("Removed: {}", describe(record, settings))
}

/// Running total line
pub fn format_total(total: Amount, count: usize, currency_symbol: &str) -> String {
    format!(
        "Total: {} across {} expense(s)",
        total.format_with_symbol(currency_symbol),
        count
    )
}

fn describe(record: &ExpenseRecord, settings: &Settings) -> String {
    format!(
        "{} on {} {} | {} | {}",
        record.amount().format_with_symbol(&settings.currency_symbol),
        record.date().format(&settings.date_format),
        record.time().format("%H:%M"),
        record.category(),
        record.note()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record(amount: i64, note: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            amount,
            "Transport",
            note,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(7, 45, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], &Settings::default()),
            "No expenses recorded.\n"
        );
    }

    #[test]
    fn test_table_contains_rows() {
        let table = format_expense_table(
            &[record(50, "bus"), record(12, "metro card")],
            &Settings::default(),
        );
        assert!(table.contains("Category"));
        assert!(table.contains("bus"));
        assert!(table.contains("$50"));
        assert!(table.contains("07:45"));
        assert!(table.contains("2024-06-10"));
        assert!(table.contains("metro card"));
    }

    #[test]
    fn test_table_newest_first() {
        let table = format_expense_table(
            &[record(50, "first"), record(12, "second"), record(8, "third")],
            &Settings::default(),
        );
        let third = table.find("third").unwrap();
        let second = table.find("second").unwrap();
        let first = table.find("first").unwrap();
        assert!(third < second && second < first);

        let top_row = table.lines().find(|l| l.contains("third")).unwrap();
        assert!(top_row.contains(" 3 "));
        let bottom_row = table.lines().find(|l| l.contains("first")).unwrap();
        assert!(bottom_row.contains(" 1 "));
    }

    #[test]
    fn test_saved_and_removed_lines() {
        let settings = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        assert_eq!(
            format_saved(&record(50, "bus"), &settings),
            "Saved: €50 on 2024-06-10 07:45 | Transport | bus"
        );
        assert_eq!(
            format_removed(&record(50, "bus"), &settings),
            "Removed: €50 on 2024-06-10 07:45 | Transport | bus"
        );
    }

    #[test]
    fn test_custom_date_format() {
        let settings = Settings {
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        assert!(format_saved(&record(5, "bus"), &settings).contains("on 10/06/2024 07:45"));
        assert!(format_expense_table(&[record(5, "bus")], &settings).contains("10/06/2024"));
    }

    #[test]
    fn test_total_line() {
        assert_eq!(
            format_total(Amount::new(62), 2, "$"),
            "Total: $62 across 2 expense(s)"
        );
    }
}
