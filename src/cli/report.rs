//! CLI commands for one-shot reports over a CSV of expenses

use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::parse_budget;
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_expense_table, format_total};
use crate::error::{ExpenseError, ExpenseResult};
use crate::import::import_csv_file;
use crate::models::{BudgetMap, Category, DateFilter, ExpenseRecord};
use crate::reports::{filter_records, total, ExpenseSummary};
use crate::store::ExpenseStore;

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// CSV file with columns amount,category,note,date[,time]
    #[arg(short, long)]
    pub input: PathBuf,

    /// Date filter: today, week, month or all
    #[arg(short, long)]
    pub filter: Option<DateFilter>,

    /// Number of top expenses to rank
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Budget override such as Food=250 (repeatable)
    #[arg(short, long = "budget", value_parser = parse_budget)]
    pub budgets: Vec<(Category, i64)>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Also export the per-category rows to a CSV file
    #[arg(long = "csv")]
    pub csv_output: Option<PathBuf>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// CSV file with columns amount,category,note,date[,time]
    #[arg(short, long)]
    pub input: PathBuf,

    /// Date filter: today, week, month or all
    #[arg(short, long)]
    pub filter: Option<DateFilter>,
}

/// Handle `summary`
pub fn handle_summary_command<W: Write>(
    args: &SummaryArgs,
    settings: &Settings,
    clock: &impl Clock,
    out: &mut W,
) -> ExpenseResult<()> {
    let store = load_store(&args.input, settings, out, !args.json)?;

    let mut budgets = BudgetMap::from_settings(settings);
    for (category, amount) in &args.budgets {
        budgets.set(*category, *amount)?;
    }

    let summary = ExpenseSummary::generate(
        store.list(),
        args.filter.unwrap_or(settings.default_filter),
        clock.today(),
        &budgets,
        args.top.unwrap_or(settings.top_count),
    );

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(out, "{}", summary.format_terminal(settings))?;
    }

    if let Some(path) = &args.csv_output {
        let file = File::create(path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        summary.export_csv(BufWriter::new(file))?;
        if !args.json {
            writeln!(out, "\nExported summary to: {}", path.display())?;
        }
    }

    Ok(())
}

/// Handle `list`
pub fn handle_list_command<W: Write>(
    args: &ListArgs,
    settings: &Settings,
    clock: &impl Clock,
    out: &mut W,
) -> ExpenseResult<()> {
    let store = load_store(&args.input, settings, out, true)?;
    let filter = args.filter.unwrap_or(settings.default_filter);

    let shown: Vec<ExpenseRecord> = filter_records(store.list(), filter, clock.today())
        .into_iter()
        .cloned()
        .collect();

    writeln!(out, "Expenses: {}", filter)?;
    write!(out, "{}", format_expense_table(&shown, settings))?;
    writeln!(
        out,
        "{}",
        format_total(total(&shown), shown.len(), &settings.currency_symbol)
    )?;

    Ok(())
}

/// Import the input file into a fresh store, noting skipped rows
///
/// Rows in categories the settings do not offer are skipped like any other
/// invalid row.
fn load_store<W: Write>(
    input: &std::path::Path,
    settings: &Settings,
    out: &mut W,
    report_skipped: bool,
) -> ExpenseResult<ExpenseStore> {
    let mut store = ExpenseStore::new();
    let report = import_csv_file(&mut store, input, &settings.categories)?;

    if report_skipped && !report.is_clean() {
        for (row, reason) in &report.skipped {
            writeln!(out, "Skipped row {}: {}", row, reason)?;
        }
        writeln!(out)?;
    }

    Ok(store)
}
