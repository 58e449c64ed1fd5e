//! Interactive expense session
//!
//! A line-oriented stand-in for the watch UI: expenses are entered, listed and
//! removed against an in-memory store, and the charts summary is recomputed
//! from a fresh snapshot each time it is asked for. Nothing is persisted.

use clap::{CommandFactory, Parser, Subcommand};
use std::io::{BufRead, Write};

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_expense_table, format_removed, format_saved, format_total};
use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::{BudgetMap, Category, DateFilter};
use crate::reports::ExpenseSummary;
use crate::store::{EventLog, ExpenseStore};

const PROMPT: &str = "expwatch> ";
const DEFAULT_HISTORY: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Commands accepted inside a session
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Record an expense: add <amount> <category> <note...>
    Add {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        category: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Remove the expense at a list position (1-based)
    #[command(alias = "rm")]
    Remove { position: usize },
    /// Show every expense, newest first, numbered for `remove`
    #[command(alias = "ls")]
    List,
    /// Remove every expense
    Clear,
    /// Show the running total
    Total,
    /// Show the charts summary, optionally for another filter
    Summary { filter: Option<DateFilter> },
    /// Change the filter used by `summary`
    Filter { filter: DateFilter },
    /// Set a category budget for this session
    Budget {
        category: Category,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Show recent changes to the list
    History { count: Option<usize> },
    /// Show available commands
    Help,
    /// End the session
    #[command(aliases = ["exit", "q"])]
    Quit,
}

impl SessionCommand {
    /// Parse one input line
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        SessionLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}

/// State held for the lifetime of a session
struct Session<'a, C: Clock> {
    store: ExpenseStore,
    budgets: BudgetMap,
    filter: DateFilter,
    history: EventLog,
    settings: &'a Settings,
    clock: &'a C,
}

impl<'a, C: Clock> Session<'a, C> {
    fn new(settings: &'a Settings, clock: &'a C) -> Self {
        let history = EventLog::new();
        let mut store = ExpenseStore::new();
        store.subscribe(history.listener());

        Self {
            store,
            budgets: BudgetMap::from_settings(settings),
            filter: settings.default_filter,
            history,
            settings,
            clock,
        }
    }

    /// Run one command. Returns `false` when the session should end.
    fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> ExpenseResult<bool> {
        let settings = self.settings;
        let symbol = settings.currency_symbol.as_str();

        match command {
            SessionCommand::Add {
                amount,
                category,
                note,
            } => {
                if let Err(err @ ValidationError::CategoryNotOffered(_)) =
                    Category::parse_offered(&category, &settings.categories)
                {
                    return Err(err.into());
                }
                let record = self
                    .store
                    .add_now(amount, &category, &note.join(" "), self.clock)?;
                writeln!(out, "{}", format_saved(&record, settings))?;
            }
            SessionCommand::Remove { position } => {
                let index = position
                    .checked_sub(1)
                    .ok_or_else(|| ExpenseError::expense_not_found("#0"))?;
                let record = self.store.remove_at(index)?;
                writeln!(out, "{}", format_removed(&record, settings))?;
            }
            SessionCommand::List => {
                write!(out, "{}", format_expense_table(self.store.list(), settings))?;
            }
            SessionCommand::Clear => {
                let removed = self.store.clear();
                writeln!(out, "Cleared {} expense(s)", removed)?;
            }
            SessionCommand::Total => {
                writeln!(
                    out,
                    "{}",
                    format_total(self.store.total(), self.store.len(), symbol)
                )?;
            }
            SessionCommand::Summary { filter } => {
                let summary = ExpenseSummary::generate(
                    &self.store.snapshot(),
                    filter.unwrap_or(self.filter),
                    self.clock.today(),
                    &self.budgets,
                    settings.top_count,
                );
                write!(out, "{}", summary.format_terminal(settings))?;
            }
            SessionCommand::Filter { filter } => {
                self.filter = filter;
                writeln!(out, "Filter: {}", filter)?;
            }
            SessionCommand::Budget { category, amount } => {
                self.budgets.set(category, amount)?;
                writeln!(
                    out,
                    "Budget for {} set to {}",
                    category,
                    self.budgets.get(category).format_with_symbol(symbol)
                )?;
            }
            SessionCommand::History { count } => {
                let events = self.history.recent(count.unwrap_or(DEFAULT_HISTORY));
                if events.is_empty() {
                    writeln!(out, "No changes yet.")?;
                }
                for event in events {
                    writeln!(out, "{}", event)?;
                }
            }
            SessionCommand::Help => {
                writeln!(out, "{}", SessionLine::command().render_help())?;
            }
            SessionCommand::Quit => return Ok(false),
        }

        Ok(true)
    }
}

/// Run a session reading commands line by line until `quit` or end of input
///
/// Failed commands are reported and the session carries on.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    settings: &Settings,
    clock: &impl Clock,
) -> ExpenseResult<()> {
    let mut session = Session::new(settings, clock);

    writeln!(out, "expense-watch session. Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(out)?;
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match SessionCommand::parse_line(line) {
            Ok(command) => match session.execute(command, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => writeln!(out, "Error: {}", err)?,
            },
            Err(err) => write!(out, "{}", err.render())?,
        }
    }

    writeln!(
        out,
        "Session ended with {} expense(s), {}",
        session.store.len(),
        session.store.total().format_with_symbol(&settings.currency_symbol)
    )?;
    Ok(())
}
