use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use expense_watch::cli::{
    handle_config_command, handle_list_command, handle_summary_command, parse_date, run_session,
    ListArgs, SummaryArgs,
};
use expense_watch::clock::{Clock, FixedClock, SystemClock};
use expense_watch::config::{ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expwatch",
    version,
    about = "Expense tracking for a wrist-sized screen",
    long_about = "expense-watch records small expenses and shows where the money \
                  went: totals per category, the biggest spending day, the top \
                  expenses and progress against per-category budgets."
)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize expenses from a CSV file
    Summary(SummaryArgs),

    /// List expenses from a CSV file
    #[command(alias = "ls")]
    List(ListArgs),

    /// Start an interactive session reading commands from stdin
    Session,

    /// Show current configuration and paths
    Config {
        /// Write default settings if none exist yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(io::stderr),
        )
        .init();

    let paths = ExpensePaths::new()?;
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_or_create(&paths)?,
    };
    debug!(config_dir = %paths.base_dir().display(), "settings loaded");

    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::on(date, SystemClock.now().time())),
        None => Box::new(SystemClock),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Some(Commands::Summary(args)) => {
            handle_summary_command(&args, &settings, &clock, &mut out)?;
        }
        Some(Commands::List(args)) => {
            handle_list_command(&args, &settings, &clock, &mut out)?;
        }
        Some(Commands::Session) => {
            let stdin = io::stdin();
            run_session(stdin.lock(), &mut out, &settings, &clock)?;
        }
        Some(Commands::Config { init }) => {
            handle_config_command(&paths, &settings, init, &mut out)?;
        }
        None => {
            writeln!(out, "expense-watch - expense tracking for a wrist-sized screen")?;
            writeln!(out)?;
            writeln!(out, "Run 'expwatch --help' for usage information.")?;
            writeln!(out, "Run 'expwatch session' to start recording expenses.")?;
        }
    }

    out.flush()?;
    Ok(())
}
