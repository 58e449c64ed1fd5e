//! CSV import into an expense store
//!
//! Reads rows of `amount,category,note,date[,time]` and feeds each through
//! `ExpenseStore::add`, so imported rows obey exactly the same validation as
//! rows typed on the watch. Rows filed under a category the settings do not
//! offer are refused too. Bad rows are skipped and reported, never fatal.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::{Amount, Category, NewExpense};
use crate::store::ExpenseStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct CsvRow {
    amount: String,
    category: String,
    note: String,
    date: String,
    #[serde(default)]
    time: Option<String>,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows added to the store
    pub imported: usize,
    /// Rows skipped, with their 1-based data row number and the reason
    pub skipped: Vec<(usize, String)>,
}

impl ImportReport {
    /// Check whether every row made it in
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Import expenses from CSV data
pub fn import_csv<R: Read>(
    store: &mut ExpenseStore,
    reader: R,
    offered: &[Category],
) -> ExpenseResult<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in ["amount", "category", "note", "date"] {
        if !headers.iter().any(|h| h == required) {
            return Err(ExpenseError::Import(format!(
                "missing required column '{}'",
                required
            )));
        }
    }

    let mut report = ImportReport::default();

    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let row_number = idx + 1;
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|row| parse_row(&row, offered))
            .and_then(|input| store.add(input).map_err(|e| e.to_string()));

        match outcome {
            Ok(_) => report.imported += 1,
            Err(reason) => {
                warn!(row = row_number, %reason, "skipping CSV row");
                report.skipped.push((row_number, reason));
            }
        }
    }

    info!(
        imported = report.imported,
        skipped = report.skipped.len(),
        "CSV import finished"
    );
    Ok(report)
}

/// Import expenses from a CSV file
pub fn import_csv_file(
    store: &mut ExpenseStore,
    path: &Path,
    offered: &[Category],
) -> ExpenseResult<ImportReport> {
    let file = std::fs::File::open(path).map_err(|e| {
        ExpenseError::Import(format!("Failed to open {}: {}", path.display(), e))
    })?;
    import_csv(store, file, offered)
}

fn parse_row(row: &CsvRow, offered: &[Category]) -> Result<NewExpense, String> {
    if let Err(err @ ValidationError::CategoryNotOffered(_)) =
        Category::parse_offered(&row.category, offered)
    {
        return Err(ExpenseError::Validation(err).to_string());
    }
    let amount = Amount::parse(&row.amount).map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", row.date))?;
    let time = match row.time.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|_| format!("Invalid time '{}', expected HH:MM", raw))?,
        None => NaiveTime::MIN,
    };

    Ok(NewExpense {
        amount: amount.units(),
        category: row.category.clone(),
        note: row.note.clone(),
        date,
        time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_valid_rows() {
        let data = "amount,category,note,date,time\n\
                    100,Food,lunch,2024-06-10,12:30\n\
                    50,Transport,bus,2024-06-10,08:05\n\
                    200,Comida,dinner,2024-06-09,\n";
        let mut store = ExpenseStore::new();
        let report = import_csv(&mut store, data.as_bytes(), Category::all()).unwrap();

        assert_eq!(report.imported, 3);
        assert!(report.is_clean());
        assert_eq!(store.total(), Amount::new(350));
        assert_eq!(store.list()[2].category(), Category::Food);
        assert_eq!(store.list()[2].time(), NaiveTime::MIN);
    }

    #[test]
    fn test_import_without_time_column() {
        let data = "amount,category,note,date\n5,Other,gum,2024-01-01\n";
        let mut store = ExpenseStore::new();
        let report = import_csv(&mut store, data.as_bytes(), Category::all()).unwrap();
        assert_eq!(report.imported, 1);
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let data = "amount,category,note,date,time\n\
                    0,Food,free sample,2024-06-10,12:00\n\
                    ten,Food,typo,2024-06-10,12:00\n\
                    10,Gadgets,watch strap,2024-06-10,12:00\n\
                    10,Food,,2024-06-10,12:00\n\
                    10,Food,tea,06/10/2024,12:00\n\
                    10,Food,tea,2024-06-10,noon\n\
                    10,Food,tea,2024-06-10,16:00\n";
        let mut store = ExpenseStore::new();
        let report = import_csv(&mut store, data.as_bytes(), Category::all()).unwrap();

        assert_eq!(report.imported, 1);
        let rows: Vec<usize> = report.skipped.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, vec![1, 2, 3, 4, 5, 6]);
        assert!(report.skipped[0].1.contains("greater than 0"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_refuses_categories_not_offered() {
        let data = "amount,category,note,date\n\
                    10,Food,tea,2024-06-10\n\
                    900,Vivienda,rent,2024-06-01\n";
        let mut store = ExpenseStore::new();
        let report = import_csv(&mut store, data.as_bytes(), &[Category::Food]).unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 2);
        assert!(report.skipped[0].1.contains("category not offered: Housing"));
    }

    #[test]
    fn test_import_refuses_oversized_amounts() {
        let data = "amount,category,note,date\n\
                    9223372036854775807,Housing,castle,2024-06-10\n\
                    9223372036854775807,Housing,castle,2024-06-10\n\
                    25,Food,soup,2024-06-10\n";
        let mut store = ExpenseStore::new();
        let report = import_csv(&mut store, data.as_bytes(), Category::all()).unwrap();

        assert_eq!(report.imported, 1);
        assert!(report.skipped[0].1.contains("must be at most"));
        assert_eq!(store.total(), Amount::new(25));
    }

    #[test]
    fn test_import_missing_column() {
        let data = "amount,category,date\n10,Food,2024-06-10\n";
        let mut store = ExpenseStore::new();
        let err = import_csv(&mut store, data.as_bytes(), Category::all()).unwrap_err();
        assert!(matches!(err, ExpenseError::Import(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "amount,category,note,date").unwrap();
        writeln!(file, "30,Medicine,aspirin,2024-03-02").unwrap();

        let mut store = ExpenseStore::new();
        let report = import_csv_file(&mut store, file.path(), Category::all()).unwrap();
        assert_eq!(report.imported, 1);

        let missing = import_csv_file(
            &mut store,
            Path::new("/definitely/not/here.csv"),
            Category::all(),
        );
        assert!(matches!(missing, Err(ExpenseError::Import(_))));
    }
}
